//! Plain-text rendering for console output

use std::fmt::Write;

use crate::models::{
    Announcement, Event, EventAnalytics, Participation, Submission, Team, TeamLeaderboardEntry,
};
use crate::state::Feature;
use crate::utils::helpers::{
    format_answer_value, format_date, format_date_time, truncate_text, EMPTY_PLACEHOLDER,
};

const DESCRIPTION_PREVIEW: usize = 100;

/// Error banner shown in place of a failed view
pub fn banner(message: &str) -> String {
    format!("[!] {}", message)
}

pub fn event_line(event: &Event) -> String {
    format!(
        "{:<26} {:<40} {:<18} {}",
        event.id,
        truncate_text(&event.title, 40),
        event.status.as_str(),
        format_date(event.start_date)
    )
}

pub fn event_detail(event: &Event) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", event.title, event.status);
    let _ = writeln!(out, "  id:        {}", event.id);
    let _ = writeln!(out, "  organizer: {}", event.created_by.display_name());
    let _ = writeln!(
        out,
        "  dates:     {} - {}",
        format_date(event.start_date),
        format_date(event.end_date)
    );
    if event.registration_start_date.is_some() || event.registration_end_date.is_some() {
        let _ = writeln!(
            out,
            "  register:  {} - {}",
            format_date_time(event.registration_start_date),
            format_date_time(event.registration_end_date)
        );
    }
    if let Some(location) = &event.location {
        let _ = writeln!(out, "  location:  {}", location);
    }
    let enabled: Vec<&str> = event
        .capabilities
        .flags()
        .iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name)
        .collect();
    let _ = writeln!(
        out,
        "  features:  {}",
        if enabled.is_empty() { "none".to_string() } else { enabled.join(", ") }
    );
    if !event.description.is_empty() {
        let _ = writeln!(out, "\n{}", truncate_text(&event.description, DESCRIPTION_PREVIEW * 5));
    }
    out
}

pub fn feature_list(features: &[Feature]) -> String {
    features
        .iter()
        .map(|f| format!("  * {}", f.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn participant_line(event: &Event, participation: &Participation) -> String {
    let mut line = format!(
        "{:<24} {:<30} {}",
        participation.user.name.as_deref().unwrap_or("Unknown"),
        participation.user.email.as_deref().unwrap_or("-"),
        participation.status.as_str()
    );
    for (field_id, value) in &participation.answers {
        let _ = write!(line, "\n    {}: {}", event.answer_label(field_id), format_answer_value(value));
    }
    line
}

pub fn team_block(team: &Team) -> String {
    let mut out = format!("{} ({} pts)\n", team.name, team.total_points);
    for member in &team.members {
        let category = member
            .category
            .as_ref()
            .map(|c| c.display_name().to_string())
            .unwrap_or_else(|| EMPTY_PLACEHOLDER.to_string());
        let _ = writeln!(
            out,
            "  {:<24} {:<13} {}",
            member.user.display_name(),
            member.role.as_str(),
            category
        );
    }
    out
}

pub fn submission_line(submission: &Submission) -> String {
    let mut line = format!(
        "{:<26} {:<36} {:<13} {}",
        submission.id,
        truncate_text(&submission.title, 36),
        submission.status,
        format_date(submission.submitted_at)
    );
    if let Some(review) = &submission.review {
        let _ = write!(line, "\n    review: {}/100 {}", review.score, review.comment);
    }
    line
}

pub fn announcement_block(announcement: &Announcement) -> String {
    format!(
        "[{}] {} ({})\n  {}",
        announcement.priority.as_str(),
        announcement.title,
        format_date_time(announcement.created_at),
        announcement.content
    )
}

pub fn leaderboard(rows: &[TeamLeaderboardEntry]) -> String {
    rows.iter()
        .enumerate()
        .map(|(i, row)| format!("{:>3}. {:<30} {}", i + 1, row.name, row.total_points))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn analytics(analytics: &EventAnalytics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Registrations: {}", analytics.total_registrations);
    let _ = writeln!(out, "Submissions:   {}", analytics.total_submissions);
    if let Some(rate) = analytics.conversion_rate {
        let _ = writeln!(out, "Conversion:    {:.1}%", rate);
    }
    for (status, count) in &analytics.submissions_by_status {
        let _ = writeln!(
            out,
            "  {:<13} {:>4} ({:.0}%)",
            status,
            count,
            analytics.submission_share(status)
        );
    }
    if let Some(score) = analytics.average_score {
        let _ = writeln!(out, "Average score: {:.1}", score);
    }
    if let Some(teams) = analytics.total_teams {
        let _ = writeln!(out, "Teams:         {}", teams);
    }
    out
}
