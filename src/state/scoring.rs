//! Scoring dashboard helpers

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{CompetitionEntry, CompetitionItem, SubmitResultRequest};
use crate::utils::errors::{EventHubError, Result};

/// A selectable place or grade with the points it awards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreOption {
    pub value: String,
    pub points: u32,
}

impl ScoreOption {
    fn new(value: &str, points: u32) -> Self {
        Self { value: value.to_string(), points }
    }
}

pub fn place_options(item: &CompetitionItem) -> Vec<ScoreOption> {
    let points = item.place_points.unwrap_or_default();
    vec![
        ScoreOption::new("1", points.first),
        ScoreOption::new("2", points.second),
        ScoreOption::new("3", points.third),
    ]
}

pub fn grade_options(item: &CompetitionItem) -> Vec<ScoreOption> {
    let points = item.grade_points.unwrap_or_default();
    vec![
        ScoreOption::new("A", points.a),
        ScoreOption::new("B", points.b),
        ScoreOption::new("C", points.c),
    ]
}

/// Drop entries without a team and keep the last copy of each id
pub fn dedupe_entries(entries: Vec<CompetitionEntry>) -> Vec<CompetitionEntry> {
    let mut seen = HashSet::new();
    let mut kept: Vec<CompetitionEntry> = entries
        .into_iter()
        .rev()
        .filter(|entry| !entry.id.is_empty() && entry.team_id().is_some())
        .filter(|entry| seen.insert(entry.id.clone()))
        .collect();
    kept.reverse();
    kept
}

pub fn entry_label(entry: &CompetitionEntry, item: &CompetitionItem) -> String {
    let team = entry
        .team
        .as_ref()
        .map(|t| t.name.as_deref().unwrap_or(t.id.as_str()))
        .unwrap_or("Unnamed Team");

    if item.item_type.is_individual_like() {
        let participant = entry
            .participants
            .first()
            .and_then(|p| p.name.as_deref().or(p.email.as_deref()))
            .unwrap_or("Unnamed participant");
        format!("{} ({})", participant, team)
    } else {
        format!("{} (Group)", team)
    }
}

/// Participant credited with a result
pub fn resolve_result_participant(
    item: &CompetitionItem,
    entry: &CompetitionEntry,
    chosen: Option<&str>,
) -> Result<String> {
    let resolved = if item.item_type.is_individual_like() {
        chosen.filter(|id| !id.is_empty()).map(str::to_string)
    } else {
        entry.participant_ids().next().map(str::to_string)
    };
    resolved.ok_or_else(|| EventHubError::Validation("Please select a participant.".to_string()))
}

/// Build the result payload for one entry of `item`
pub fn build_result(
    event_id: &str,
    item: &CompetitionItem,
    entry: &CompetitionEntry,
    participant: Option<&str>,
    place: Option<u32>,
    grade: Option<&str>,
) -> Result<SubmitResultRequest> {
    let team_id = entry.team_id().ok_or_else(|| {
        EventHubError::Validation("Selected team entry not found for this item.".to_string())
    })?;
    let participant_id = resolve_result_participant(item, entry, participant)?;

    Ok(SubmitResultRequest {
        event_id: event_id.to_string(),
        item_id: item.id.clone(),
        team_id: team_id.to_string(),
        entry_id: Some(entry.id.clone()),
        participant_id: Some(participant_id),
        place,
        grade: grade.filter(|g| !g.is_empty()).map(str::to_string),
    })
}
