//! Announcement service

use tracing::info;

use crate::models::{Announcement, AnnouncementPriority, CreateAnnouncementRequest, Deleted};
use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers::normalize_whitespace;

use super::http::ApiClient;

#[derive(Clone, Debug)]
pub struct AnnouncementService {
    client: ApiClient,
}

impl AnnouncementService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_for_event(&self, event_id: &str) -> Result<Vec<Announcement>> {
        self.client.get(&format!("/announcements/{}", event_id)).await
    }

    pub async fn create(
        &self,
        event_id: &str,
        title: &str,
        content: &str,
        priority: AnnouncementPriority,
    ) -> Result<Announcement> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(EventHubError::Validation(
                "Title and content are required.".to_string(),
            ));
        }
        let request = CreateAnnouncementRequest {
            title: normalize_whitespace(title),
            content: content.trim().to_string(),
            priority,
        };
        let announcement: Announcement = self
            .client
            .post(&format!("/announcements/{}", event_id), &request)
            .await?;
        info!(event_id = %event_id, priority = priority.as_str(), "Announcement posted");
        Ok(announcement)
    }

    pub async fn delete(&self, announcement_id: &str) -> Result<Deleted> {
        self.client.delete(&format!("/announcements/{}", announcement_id)).await
    }
}
