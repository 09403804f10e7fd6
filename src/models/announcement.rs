//! Announcement model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnouncementPriority {
    #[default]
    Info,
    Warning,
    Urgent,
}

impl AnnouncementPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementPriority::Info => "INFO",
            AnnouncementPriority::Warning => "WARNING",
            AnnouncementPriority::Urgent => "URGENT",
        }
    }
}

impl std::str::FromStr for AnnouncementPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INFO" => Ok(AnnouncementPriority::Info),
            "WARNING" => Ok(AnnouncementPriority::Warning),
            "URGENT" => Ok(AnnouncementPriority::Urgent),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub priority: AnnouncementPriority,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    pub priority: AnnouncementPriority,
}
