//! Registration and participant list handlers

use tracing::info;

use crate::handlers::render;
use crate::models::{Event, ParticipationStatus};
use crate::services::ServiceFactory;
use crate::state::{parse_answers, validate_answers, Viewer};
use crate::utils::errors::{EventHubError, Result};

fn print_form(event: &Event) {
    if event.registration_form.is_empty() {
        return;
    }
    println!("Registration form for {}:", event.title);
    for field in &event.registration_form {
        let mut line = format!("  {:<16} {}", field.id, field.label);
        if field.required {
            line.push_str(" *");
        }
        if let Some(options) = &field.options {
            line.push_str(&format!(" [{}]", options.join(" | ")));
        }
        println!("{}", line);
    }
}

pub async fn handle_register(services: &ServiceFactory, event_id: &str, answers: &[String]) -> Result<()> {
    let user = services.auth.require_user()?;
    let event = services.events.get(event_id).await?;
    let participation = services.participation.my_participation(event_id).await?;

    let viewer = Viewer::new(&event, Some(&user), participation.as_ref());
    if viewer.is_registered() {
        println!("You are already registered for {}.", event.title);
        return Ok(());
    }
    if !viewer.can_register() {
        return Err(EventHubError::Validation(format!(
            "Registration is not open for {}.",
            event.title
        )));
    }

    let answers = parse_answers(&event.registration_form, answers)?;
    let errors = validate_answers(&event.registration_form, &answers);
    if !errors.is_empty() {
        print_form(&event);
        for message in errors.values() {
            println!("  - {}", message);
        }
        return Err(EventHubError::Validation(
            "Please fill in all required fields.".to_string(),
        ));
    }

    let participation = services.participation.register(&event, answers).await?;
    info!(event_id = %event.id, status = participation.status.as_str(), "Registered for event");
    println!("Registered for {} ({}).", event.title, participation.status.as_str());
    Ok(())
}

pub async fn handle_withdraw(services: &ServiceFactory, event_id: &str) -> Result<()> {
    services.auth.require_user()?;
    services.participation.withdraw(event_id).await?;
    println!("You have withdrawn from the event.");
    Ok(())
}

pub async fn handle_participants(
    services: &ServiceFactory,
    event_id: &str,
    search: Option<&str>,
    set_status: Option<(String, ParticipationStatus)>,
) -> Result<()> {
    let user = services.auth.require_user()?;
    let event = services.events.get(event_id).await?;
    if !Viewer::new(&event, Some(&user), None).can_view_participants() {
        return Err(EventHubError::Validation(
            "Only the organizer can view participants.".to_string(),
        ));
    }

    if let Some((participation_id, status)) = set_status {
        let updated = services.participation.update_status(&participation_id, status).await?;
        println!("{} is now {}.", updated.user.display_name(), updated.status.as_str());
        return Ok(());
    }

    let participants = services.participation.list_participants(event_id).await?;
    let query = search.unwrap_or_default();
    let shown: Vec<_> = participants.iter().filter(|p| p.matches_search(query)).collect();

    if shown.is_empty() {
        println!("No participants found.");
        return Ok(());
    }
    println!("{} of {} participants", shown.len(), participants.len());
    for participation in shown {
        println!("{}", render::participant_line(&event, participation));
    }
    Ok(())
}
