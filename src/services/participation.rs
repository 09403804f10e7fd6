//! Participation service

use serde_json::Value;

use crate::models::participation::{RegisterForEventRequest, UpdateParticipationStatusRequest};
use crate::models::{Answers, Event, IndividualLeaderboardEntry, Participation, ParticipationStatus};
use crate::state::validate_answers;
use crate::utils::errors::{EventHubError, Result};
use crate::utils::logging::log_event_action;

use super::http::ApiClient;

#[derive(Clone, Debug)]
pub struct ParticipationService {
    client: ApiClient,
}

impl ParticipationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Register for `event` after checking required form answers locally
    pub async fn register(&self, event: &Event, answers: Answers) -> Result<Participation> {
        let errors = validate_answers(&event.registration_form, &answers);
        if let Some(message) = errors.values().next() {
            return Err(EventHubError::Validation(message.clone()));
        }

        let participation: Participation = self
            .client
            .post(
                &format!("/participation/{}/register", event.id),
                &RegisterForEventRequest { answers },
            )
            .await?;
        log_event_action(&event.id, "registered", None);
        Ok(participation)
    }

    /// The caller's participation, `None` when not registered
    pub async fn my_participation(&self, event_id: &str) -> Result<Option<Participation>> {
        match self
            .client
            .get::<Option<Participation>>(&format!("/participation/{}/me", event_id))
            .await
        {
            Ok(participation) => Ok(participation),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Events the caller is registered for
    pub async fn my_registrations(&self) -> Result<Vec<Event>> {
        self.client.get("/participations/me").await
    }

    pub async fn withdraw(&self, event_id: &str) -> Result<()> {
        self.client
            .post::<_, Value>(&format!("/participation/{}/withdraw", event_id), &serde_json::json!({}))
            .await?;
        log_event_action(event_id, "withdrawn", None);
        Ok(())
    }

    pub async fn list_participants(&self, event_id: &str) -> Result<Vec<Participation>> {
        self.client.get(&format!("/participation/{}/list", event_id)).await
    }

    pub async fn update_status(&self, participation_id: &str, status: ParticipationStatus) -> Result<Participation> {
        self.client
            .patch(
                &format!("/participation/{}/status", participation_id),
                &UpdateParticipationStatusRequest { status },
            )
            .await
    }

    pub async fn event_leaderboard(&self, event_id: &str) -> Result<Vec<IndividualLeaderboardEntry>> {
        self.client.get(&format!("/participation/{}/leaderboard", event_id)).await
    }
}
