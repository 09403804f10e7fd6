//! Command handlers module
//!
//! One handler per console command. Every handler loads what it needs,
//! prints it, and returns errors to the dispatcher, which shows them as a
//! banner.

pub mod announcements;
pub mod auth;
pub mod events;
pub mod participation;
pub mod results;
pub mod submissions;
pub mod teams;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::models::{
    AnnouncementPriority, ContentType, EventStatus, EventType, ParticipationStatus, SubmissionStatus,
    TeamRole, UserRole,
};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Console client for the EventHub API
#[derive(Parser, Debug)]
#[command(name = "eventhub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file name, extension optional
    #[arg(long, global = true, default_value = "eventhub", env = "EVENTHUB_CONFIG")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with email and password, or a Google credential
    Login {
        #[arg(long, required_unless_present = "google")]
        email: Option<String>,
        #[arg(long, env = "EVENTHUB_PASSWORD", required_unless_present = "google")]
        password: Option<String>,
        /// Google ID token to exchange instead of a password
        #[arg(long, conflicts_with_all = ["email", "password"])]
        google: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "EVENTHUB_PASSWORD")]
        password: String,
        #[arg(long, default_value = "PARTICIPANT")]
        role: UserRole,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Browse and manage events
    Events {
        #[command(subcommand)]
        action: EventsCommand,
    },
    /// Register for an event
    RegisterEvent {
        event_id: String,
        /// Registration answer as field_id=value, repeatable
        #[arg(short = 'a', long = "answer")]
        answers: Vec<String>,
    },
    /// Withdraw from an event
    Withdraw { event_id: String },
    /// List or moderate an event's participants
    Participants {
        event_id: String,
        /// Filter by name or email
        #[arg(long)]
        search: Option<String>,
        /// Set a participation's status: PARTICIPATION_ID=STATUS
        #[arg(long, value_parser = parse_status_update)]
        set_status: Option<(String, ParticipationStatus)>,
    },
    /// Teams and item enrollment
    Teams {
        #[command(subcommand)]
        action: TeamsCommand,
    },
    /// Competition categories and items
    Competition {
        #[command(subcommand)]
        action: CompetitionCommand,
    },
    /// Submissions and reviews
    Submissions {
        #[command(subcommand)]
        action: SubmissionsCommand,
    },
    /// Event announcements
    Announcements {
        #[command(subcommand)]
        action: AnnouncementsCommand,
    },
    /// Scoring and leaderboards
    Results {
        #[command(subcommand)]
        action: ResultsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventsCommand {
    /// All visible events
    List,
    /// Event details with the actions available to you
    Show { event_id: String },
    /// Events you organize
    Mine,
    /// Events you registered for
    Registered,
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "type")]
        event_type: Option<EventType>,
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        #[arg(long)]
        end: Option<DateTime<Utc>>,
        #[arg(long)]
        public: bool,
        #[arg(long)]
        competition: bool,
        /// Capability to enable, repeatable (registration, submissions, review, teams, scoring, sessions, realtime)
        #[arg(long = "capability")]
        capabilities: Vec<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Move an event to another status
    Transition { event_id: String, status: EventStatus },
    /// Publish or hide the leaderboard
    Leaderboard {
        event_id: String,
        #[arg(long)]
        hide: bool,
    },
    Delete { event_id: String },
    Analytics { event_id: String },
}

#[derive(Subcommand, Debug)]
pub enum TeamsCommand {
    List { event_id: String },
    Create {
        event_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        manager_email: String,
    },
    AddMember {
        team_id: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "MEMBER")]
        role: TeamRole,
        #[arg(long)]
        category: String,
    },
    /// Show or submit your team's participants for an item
    Enroll {
        event_id: String,
        item_id: String,
        /// Participant user id per slot, in order; omit to show the form
        #[arg(short = 'p', long = "participant")]
        participants: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CompetitionCommand {
    Categories { event_id: String },
    AddCategory {
        event_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    RemoveCategory { category_id: String },
    Items { event_id: String },
    AddItem {
        event_id: String,
        #[arg(long)]
        name: String,
        #[arg(long = "type", default_value = "INDIVIDUAL")]
        item_type: crate::models::CompetitionItemType,
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long, default_value_t = 1)]
        max_participants: u32,
    },
    RemoveItem { item_id: String },
}

#[derive(Subcommand, Debug)]
pub enum SubmissionsCommand {
    /// Your submission for an event
    Mine { event_id: String },
    /// Every submission for an event you organize
    List { event_id: String },
    Show { event_id: String, submission_id: String },
    Create {
        event_id: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "type", default_value = "ABSTRACT")]
        content_type: ContentType,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long = "link")]
        links: Vec<String>,
    },
    Submit { event_id: String, submission_id: String },
    Review {
        event_id: String,
        submission_id: String,
        #[arg(long)]
        score: f64,
        #[arg(long, default_value = "")]
        comment: String,
        #[arg(long, default_value = "ACCEPTED")]
        status: SubmissionStatus,
    },
}

#[derive(Subcommand, Debug)]
pub enum AnnouncementsCommand {
    List { event_id: String },
    Post {
        event_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value = "INFO")]
        priority: AnnouncementPriority,
    },
    Delete { announcement_id: String },
}

#[derive(Subcommand, Debug)]
pub enum ResultsCommand {
    /// Record a place and/or grade for an entry
    Submit {
        event_id: String,
        item_id: String,
        entry_id: String,
        /// Participant credited for individual and single items
        #[arg(long)]
        participant: Option<String>,
        #[arg(long)]
        place: Option<u32>,
        #[arg(long)]
        grade: Option<String>,
    },
    /// Entries for an item with their scoring options
    Entries { event_id: String, item_id: String },
    Leaderboard { event_id: String },
}

fn parse_status_update(raw: &str) -> std::result::Result<(String, ParticipationStatus), String> {
    let (id, status) = raw
        .split_once('=')
        .ok_or_else(|| "expected PARTICIPATION_ID=STATUS".to_string())?;
    Ok((id.trim().to_string(), status.parse()?))
}

/// Main command dispatcher
pub async fn handle_command(command: Command, services: &ServiceFactory) -> Result<()> {
    match command {
        Command::Login { email, password, google } => match google {
            Some(credential) => auth::handle_google_login(services, &credential).await,
            None => {
                auth::handle_login(
                    services,
                    email.as_deref().unwrap_or_default(),
                    password.as_deref().unwrap_or_default(),
                )
                .await
            }
        },
        Command::Register { name, email, password, role } => {
            auth::handle_register(services, &name, &email, &password, role).await
        }
        Command::Logout => auth::handle_logout(services).await,
        Command::Whoami => auth::handle_whoami(services),
        Command::Events { action } => events::handle_events(services, action).await,
        Command::RegisterEvent { event_id, answers } => {
            participation::handle_register(services, &event_id, &answers).await
        }
        Command::Withdraw { event_id } => participation::handle_withdraw(services, &event_id).await,
        Command::Participants { event_id, search, set_status } => {
            participation::handle_participants(services, &event_id, search.as_deref(), set_status).await
        }
        Command::Teams { action } => teams::handle_teams(services, action).await,
        Command::Competition { action } => results::handle_competition(services, action).await,
        Command::Submissions { action } => submissions::handle_submissions(services, action).await,
        Command::Announcements { action } => {
            announcements::handle_announcements(services, action).await
        }
        Command::Results { action } => results::handle_results(services, action).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_transition_target() {
        let cli = Cli::parse_from(["eventhub", "events", "transition", "e1", "registration-open"]);
        match cli.command {
            Command::Events { action: EventsCommand::Transition { event_id, status } } => {
                assert_eq!(event_id, "e1");
                assert_eq!(status, EventStatus::RegistrationOpen);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_status_update_argument() {
        assert_eq!(
            parse_status_update("p1=approved"),
            Ok(("p1".to_string(), ParticipationStatus::Approved))
        );
        assert!(parse_status_update("p1").is_err());
    }
}
