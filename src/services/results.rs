//! Result recording and team standings

use serde_json::Value;
use tracing::info;

use crate::models::{SubmitResultRequest, TeamLeaderboardEntry};
use crate::utils::errors::{EventHubError, Result};

use super::http::ApiClient;

#[derive(Clone, Debug)]
pub struct ResultService {
    client: ApiClient,
}

impl ResultService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn submit(&self, request: &SubmitResultRequest) -> Result<Value> {
        if request.item_id.is_empty() || request.entry_id.as_deref().unwrap_or_default().is_empty() {
            return Err(EventHubError::Validation(
                "Please select both item and entry.".to_string(),
            ));
        }
        let recorded = self.client.post("/results", request).await?;
        info!(item_id = %request.item_id, team_id = %request.team_id, "Result submitted");
        Ok(recorded)
    }

    /// Teams ordered by total points, highest first
    pub async fn team_leaderboard(&self, event_id: &str) -> Result<Vec<TeamLeaderboardEntry>> {
        let mut rows: Vec<TeamLeaderboardEntry> = self
            .client
            .get(&format!("/results/event/{}/leaderboards/teams", event_id))
            .await?;
        rows.sort_by(|a, b| b.total_points.total_cmp(&a.total_points));
        Ok(rows)
    }
}
