//! Event command handlers

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::handlers::render;
use crate::models::{Capabilities, CreateEventRequest, Event, EventStatus, EventType, Participation, UpdateEventRequest};
use crate::services::ServiceFactory;
use crate::state::{transition_buttons, ViewScope, Viewer};
use crate::utils::errors::{EventHubError, Result};

use super::EventsCommand;

pub async fn handle_events(services: &ServiceFactory, action: EventsCommand) -> Result<()> {
    match action {
        EventsCommand::List => print_events(&services.events.list().await?),
        EventsCommand::Mine => print_events(&services.events.my_events().await?),
        EventsCommand::Registered => {
            let events = services.participation.my_registrations().await?;
            if events.is_empty() {
                println!("You have not registered for any events yet.");
            } else {
                print_events(&events);
            }
        }
        EventsCommand::Show { event_id } => handle_show(services, &event_id).await?,
        EventsCommand::Create {
            title,
            description,
            event_type,
            start,
            end,
            public,
            competition,
            capabilities,
            location,
        } => {
            let request = build_create_request(
                title,
                description,
                event_type,
                (start, end),
                public,
                competition,
                &capabilities,
                location,
            )?;
            let event = services.events.create(&request).await?;
            println!("Created event {} ({})", event.title, event.id);
        }
        EventsCommand::Transition { event_id, status } => {
            handle_transition(services, &event_id, status).await?
        }
        EventsCommand::Leaderboard { event_id, hide } => {
            let update = UpdateEventRequest {
                is_leaderboard_published: Some(!hide),
                ..Default::default()
            };
            let event = services.events.update(&event_id, &update).await?;
            println!(
                "Leaderboard for {} is now {}.",
                event.title,
                if event.is_leaderboard_published { "published" } else { "hidden" }
            );
        }
        EventsCommand::Delete { event_id } => {
            services.events.delete(&event_id).await?;
            println!("Event deleted.");
        }
        EventsCommand::Analytics { event_id } => {
            let analytics = services.events.analytics(&event_id).await?;
            print!("{}", render::analytics(&analytics));
        }
    }
    Ok(())
}

fn print_events(events: &[Event]) {
    if events.is_empty() {
        println!("No events found.");
        return;
    }
    for event in events {
        println!("{}", render::event_line(event));
    }
}

#[derive(Default)]
struct EventPage {
    participation: Option<Participation>,
    has_submission: bool,
}

async fn handle_show(services: &ServiceFactory, event_id: &str) -> Result<()> {
    let event = services.events.get(event_id).await?;
    let user = services.auth.current_user();
    let scope = ViewScope::new();
    let mut page = EventPage::default();

    if user.is_some() {
        let (participation, submission) = futures::join!(
            services.participation.my_participation(event_id),
            services.submissions.my_submission(event_id),
        );

        match participation {
            Ok(found) => {
                scope.commit(&mut page.participation, found);
            }
            Err(EventHubError::SessionExpired) => return Err(EventHubError::SessionExpired),
            Err(e) => warn!(error = %e, "Could not load participation"),
        }
        if let Ok(found) = submission {
            scope.commit(&mut page.has_submission, found.is_some());
        }
    }
    scope.unmount();

    print!("{}", render::event_detail(&event));

    let viewer = Viewer::new(&event, user.as_ref(), page.participation.as_ref());
    println!("\nAvailable:");
    println!("{}", render::feature_list(&viewer.visible_features()));
    if page.has_submission && viewer.can_open_my_submission() {
        println!("  (you already have a submission)");
    }

    if viewer.can_manage_event() {
        let buttons = transition_buttons(&event);
        if buttons.is_empty() {
            println!("\nThis event is {} and cannot change status.", event.status);
        } else {
            println!("\nStatus actions:");
            for target in buttons {
                println!("  [{}] eventhub events transition {} {}", target.action_label(), event.id, target);
            }
        }
    }
    Ok(())
}

async fn handle_transition(services: &ServiceFactory, event_id: &str, target: EventStatus) -> Result<()> {
    let event = services.events.get(event_id).await?;

    match services.events.transition_checked(&event, target).await {
        Ok(updated) => {
            println!("{} is now {}.", updated.title, updated.status);
            Ok(())
        }
        Err(e @ EventHubError::InvalidStateTransition { .. }) => Err(e),
        Err(e) => {
            debug!(status = %event.status, "Transition rejected, keeping current status");
            println!("{} remains {}.", event.title, event.status);
            Err(e)
        }
    }
}

fn parse_capabilities(names: &[String]) -> Result<Capabilities> {
    let mut caps = Capabilities::default();
    for name in names {
        let flag = match name.trim().to_ascii_lowercase().as_str() {
            "registration" => &mut caps.registration,
            "submissions" => &mut caps.submissions,
            "review" => &mut caps.review,
            "teams" => &mut caps.teams,
            "scoring" => &mut caps.scoring,
            "sessions" => &mut caps.sessions,
            "realtime" => &mut caps.realtime,
            other => {
                return Err(EventHubError::InvalidInput(format!("unknown capability '{}'", other)))
            }
        };
        *flag = true;
    }
    Ok(caps)
}

#[allow(clippy::too_many_arguments)]
fn build_create_request(
    title: String,
    description: String,
    event_type: Option<EventType>,
    (start, end): (Option<DateTime<Utc>>, Option<DateTime<Utc>>),
    public: bool,
    competition: bool,
    capabilities: &[String],
    location: Option<String>,
) -> Result<CreateEventRequest> {
    Ok(CreateEventRequest {
        title,
        description,
        event_type: Some(event_type.unwrap_or(if competition { EventType::Fest } else { EventType::Custom })),
        start_date: start,
        end_date: end,
        is_public: public,
        is_competition: competition,
        capabilities: parse_capabilities(capabilities)?,
        location,
        ..Default::default()
    })
}
