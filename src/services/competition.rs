//! Competition setup: categories, items and team entries

use serde_json::Value;
use tracing::info;

use crate::models::{
    Category, CompetitionEntry, CompetitionItem, CreateCategoryRequest, CreateItemRequest, Deleted,
    SyncEntriesRequest,
};
use crate::utils::errors::{EventHubError, Result};

use super::http::{ApiClient, ApiRequest};

#[derive(Clone, Debug)]
pub struct CompetitionService {
    client: ApiClient,
}

impl CompetitionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create_category(&self, request: &CreateCategoryRequest) -> Result<Category> {
        if request.name.trim().is_empty() {
            return Err(EventHubError::Validation("Category name is required.".to_string()));
        }
        self.client.post("/categories", request).await
    }

    pub async fn categories(&self, event_id: &str) -> Result<Vec<Category>> {
        self.client.get(&format!("/categories/event/{}", event_id)).await
    }

    pub async fn delete_category(&self, category_id: &str) -> Result<Deleted> {
        self.client.delete(&format!("/categories/{}", category_id)).await
    }

    pub async fn create_item(&self, request: &CreateItemRequest) -> Result<CompetitionItem> {
        if request.name.trim().is_empty() {
            return Err(EventHubError::Validation("Item name is required.".to_string()));
        }
        if request.max_participants_per_team < 1 {
            return Err(EventHubError::Validation(
                "Max participants per team must be at least 1.".to_string(),
            ));
        }
        self.client.post("/competition-items", request).await
    }

    pub async fn items(&self, event_id: &str) -> Result<Vec<CompetitionItem>> {
        self.client.get(&format!("/competition-items/event/{}", event_id)).await
    }

    pub async fn delete_item(&self, item_id: &str) -> Result<Deleted> {
        self.client.delete(&format!("/competition-items/{}", item_id)).await
    }

    pub async fn entries_for_item(&self, item_id: &str) -> Result<Vec<CompetitionEntry>> {
        self.client.send(ApiRequest::get("/entries").query("item", item_id)).await
    }

    pub async fn entries_for_event(&self, event_id: &str) -> Result<Vec<CompetitionEntry>> {
        self.client.send(ApiRequest::get("/entries").query("event", event_id)).await
    }

    /// Replace the team's participant list for one item
    pub async fn sync_entries(&self, request: &SyncEntriesRequest) -> Result<Value> {
        let synced = self.client.put("/entries/sync", request).await?;
        info!(
            item_id = %request.item,
            team_id = %request.team,
            participants = request.participants.len(),
            "Entries synced"
        );
        Ok(synced)
    }
}
