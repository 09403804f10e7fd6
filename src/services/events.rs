//! Event service

use tracing::info;

use crate::models::event::TransitionRequest;
use crate::models::{CreateEventRequest, Deleted, Event, EventAnalytics, EventStatus, UpdateEventRequest};
use crate::utils::errors::{EventHubError, Result};
use crate::utils::logging::log_event_action;

use super::http::ApiClient;

#[derive(Clone, Debug)]
pub struct EventService {
    client: ApiClient,
}

impl EventService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        self.client.get("/events").await
    }

    pub async fn get(&self, event_id: &str) -> Result<Event> {
        self.client.get(&format!("/events/{}", event_id)).await
    }

    /// Events created by the signed-in organizer
    pub async fn my_events(&self) -> Result<Vec<Event>> {
        self.client.get("/events/my-events").await
    }

    pub async fn create(&self, request: &CreateEventRequest) -> Result<Event> {
        if request.title.trim().is_empty() {
            return Err(EventHubError::Validation("Title is required".to_string()));
        }
        if let (Some(start), Some(end)) = (request.start_date, request.end_date) {
            if end < start {
                return Err(EventHubError::Validation(
                    "End date must be after the start date".to_string(),
                ));
            }
        }

        let event: Event = self.client.post("/events", request).await?;
        log_event_action(&event.id, "created", Some(&event.title));
        Ok(event)
    }

    pub async fn update(&self, event_id: &str, request: &UpdateEventRequest) -> Result<Event> {
        let event: Event = self.client.put(&format!("/events/{}", event_id), request).await?;
        log_event_action(event_id, "updated", None);
        Ok(event)
    }

    pub async fn delete(&self, event_id: &str) -> Result<Deleted> {
        let deleted: Deleted = self.client.delete(&format!("/events/{}", event_id)).await?;
        log_event_action(event_id, "deleted", None);
        Ok(deleted)
    }

    /// Ask the server to move the event to `target`.
    ///
    /// No local check is made against the transition table; the server
    /// decides and the returned event replaces whatever the caller held.
    pub async fn transition(&self, event_id: &str, target: EventStatus) -> Result<Event> {
        let event: Event = self
            .client
            .patch(&format!("/events/{}/status", event_id), &TransitionRequest { status: target })
            .await?;
        info!(event_id = %event_id, status = %event.status, "Event status changed");
        log_event_action(event_id, "transition", Some(event.status.as_str()));
        Ok(event)
    }

    /// Transition only along the advertised table, without touching the network otherwise
    pub async fn transition_checked(&self, event: &Event, target: EventStatus) -> Result<Event> {
        if !event.status.can_transition_to(target) {
            return Err(EventHubError::InvalidStateTransition {
                from: event.status.to_string(),
                to: target.to_string(),
            });
        }
        self.transition(&event.id, target).await
    }

    pub async fn analytics(&self, event_id: &str) -> Result<EventAnalytics> {
        self.client.get(&format!("/events/{}/analytics", event_id)).await
    }
}
