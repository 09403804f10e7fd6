//! Team service

use tracing::info;

use crate::models::{AddMemberRequest, CreateTeamRequest, Team};
use crate::utils::errors::{EventHubError, Result};

use super::http::ApiClient;

#[derive(Clone, Debug)]
pub struct TeamService {
    client: ApiClient,
}

impl TeamService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &CreateTeamRequest) -> Result<Team> {
        if request.name.trim().is_empty() {
            return Err(EventHubError::Validation("Team name is required.".to_string()));
        }
        if request.manager_email.trim().is_empty() {
            return Err(EventHubError::Validation("Manager email is required.".to_string()));
        }
        let team: Team = self.client.post("/teams", request).await?;
        info!(team_id = %team.id, event_id = %request.event_id, "Team created");
        Ok(team)
    }

    pub async fn add_member(&self, team_id: &str, request: &AddMemberRequest) -> Result<Team> {
        if request.email.trim().is_empty() {
            return Err(EventHubError::Validation("Member email is required.".to_string()));
        }
        let team: Team = self
            .client
            .post(&format!("/teams/{}/members", team_id), request)
            .await?;
        info!(team_id = %team_id, role = request.role.as_str(), "Team member added");
        Ok(team)
    }

    pub async fn list_for_event(&self, event_id: &str) -> Result<Vec<Team>> {
        self.client.get(&format!("/teams/event/{}", event_id)).await
    }
}
