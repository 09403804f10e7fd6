//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::EntityRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Abstract,
    Paper,
    File,
    Link,
    Custom,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Abstract => "ABSTRACT",
            ContentType::Paper => "PAPER",
            ContentType::File => "FILE",
            ContentType::Link => "LINK",
            ContentType::Custom => "CUSTOM",
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ABSTRACT" => Ok(ContentType::Abstract),
            "PAPER" => Ok(ContentType::Paper),
            "FILE" => Ok(ContentType::File),
            "LINK" => Ok(ContentType::Link),
            "CUSTOM" => Ok(ContentType::Custom),
            other => Err(format!("unknown content type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Draft,
    Submitted,
    UnderReview,
    /// Older servers report acceptance as `APPROVED`
    #[serde(alias = "APPROVED")]
    Accepted,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Draft => "DRAFT",
            SubmissionStatus::Submitted => "SUBMITTED",
            SubmissionStatus::UnderReview => "UNDER_REVIEW",
            SubmissionStatus::Accepted => "ACCEPTED",
            SubmissionStatus::Rejected => "REJECTED",
        }
    }

    pub fn is_draft(&self) -> bool {
        *self == SubmissionStatus::Draft
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().replace('_', " "))
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(' ', "_").as_str() {
            "DRAFT" => Ok(SubmissionStatus::Draft),
            "SUBMITTED" => Ok(SubmissionStatus::Submitted),
            "UNDER_REVIEW" => Ok(SubmissionStatus::UnderReview),
            "ACCEPTED" | "APPROVED" => Ok(SubmissionStatus::Accepted),
            "REJECTED" => Ok(SubmissionStatus::Rejected),
            other => Err(format!("unknown submission status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub score: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewer: Option<EntityRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub event: EntityRef,
    #[serde(default)]
    pub participation: Option<EntityRef>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "type")]
    pub content_type: ContentType,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub file: Option<UploadedFile>,
    #[serde(default)]
    pub files: Vec<UploadedFile>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub review: Option<Review>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields for creating or editing a submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDraft {
    pub title: String,
    pub description: String,
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

/// In-memory file attached to a new submission
#[derive(Debug, Clone)]
pub struct FileAttachment {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRequest {
    pub score: f64,
    pub comment: String,
    pub status: SubmissionStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionStatusRequest {
    pub status: SubmissionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_approved_is_read_as_accepted() {
        let sub: Submission = serde_json::from_value(json!({
            "_id": "s1",
            "event": "e1",
            "title": "Paper",
            "type": "PAPER",
            "status": "APPROVED",
            "review": {"score": 88, "comment": "solid"}
        }))
        .unwrap();

        assert_eq!(sub.status, SubmissionStatus::Accepted);
        assert_eq!(sub.content_type, ContentType::Paper);
        assert_eq!(sub.review.map(|r| r.score), Some(88.0));
        assert_eq!(serde_json::to_value(sub.status).unwrap(), json!("ACCEPTED"));
    }

    #[test]
    fn test_status_display_uses_spaces() {
        assert_eq!(SubmissionStatus::UnderReview.to_string(), "UNDER REVIEW");
        assert_eq!("under review".parse::<SubmissionStatus>(), Ok(SubmissionStatus::UnderReview));
    }
}
