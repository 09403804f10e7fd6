//! Announcement handlers

use crate::handlers::render;
use crate::services::ServiceFactory;
use crate::state::Viewer;
use crate::utils::errors::{EventHubError, Result};

use super::AnnouncementsCommand;

pub async fn handle_announcements(services: &ServiceFactory, action: AnnouncementsCommand) -> Result<()> {
    match action {
        AnnouncementsCommand::List { event_id } => {
            let announcements = services.announcements.list_for_event(&event_id).await?;
            if announcements.is_empty() {
                println!("No announcements yet.");
            }
            for announcement in &announcements {
                println!("{}\n", render::announcement_block(announcement));
            }
        }
        AnnouncementsCommand::Post { event_id, title, content, priority } => {
            let user = services.auth.require_user()?;
            let event = services.events.get(&event_id).await?;
            if !Viewer::new(&event, Some(&user), None).can_post_announcements() {
                return Err(EventHubError::Validation(
                    "Only the organizer can post announcements.".to_string(),
                ));
            }
            let announcement = services
                .announcements
                .create(&event_id, &title, &content, priority)
                .await?;
            println!("Posted: {}", announcement.title);
        }
        AnnouncementsCommand::Delete { announcement_id } => {
            services.announcements.delete(&announcement_id).await?;
            println!("Announcement deleted.");
        }
    }
    Ok(())
}
