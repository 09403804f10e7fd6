//! Participation model

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::EntityRef;

/// Answers to an event's registration form, keyed by field id
pub type Answers = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationRole {
    Participant,
    Organizer,
    Judge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationStatus {
    Registered,
    Approved,
    Rejected,
    Withdrawn,
}

impl ParticipationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationStatus::Registered => "REGISTERED",
            ParticipationStatus::Approved => "APPROVED",
            ParticipationStatus::Rejected => "REJECTED",
            ParticipationStatus::Withdrawn => "WITHDRAWN",
        }
    }
}

impl std::str::FromStr for ParticipationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REGISTERED" => Ok(ParticipationStatus::Registered),
            "APPROVED" => Ok(ParticipationStatus::Approved),
            "REJECTED" => Ok(ParticipationStatus::Rejected),
            "WITHDRAWN" => Ok(ParticipationStatus::Withdrawn),
            other => Err(format!("unknown participation status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub user: EntityRef,
    pub event: EntityRef,
    #[serde(default = "default_role")]
    pub role: ParticipationRole,
    pub status: ParticipationStatus,
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,
}

fn default_role() -> ParticipationRole {
    ParticipationRole::Participant
}

impl Participation {
    /// Case-insensitive match on participant name or email
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let name = self.user.name.as_deref().unwrap_or_default().to_lowercase();
        let email = self.user.email.as_deref().unwrap_or_default().to_lowercase();
        name.contains(&needle) || email.contains(&needle)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterForEventRequest {
    pub answers: Answers,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateParticipationStatusRequest {
    pub status: ParticipationStatus,
}

/// Row of the per-participant leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualLeaderboardEntry {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub total_points: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn participation(name: &str, email: &str) -> Participation {
        serde_json::from_value(json!({
            "_id": "p1",
            "user": {"_id": "u1", "name": name, "email": email},
            "event": "e1",
            "status": "REGISTERED",
            "answers": {"tshirt": "M"}
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_defaults_role() {
        let p = participation("Asha Rao", "asha@example.com");
        assert_eq!(p.role, ParticipationRole::Participant);
        assert_eq!(p.event.id, "e1");
        assert_eq!(p.answers.get("tshirt"), Some(&json!("M")));
    }

    #[test]
    fn test_search_matches_name_or_email() {
        let p = participation("Asha Rao", "asha@example.com");
        assert!(p.matches_search("asha"));
        assert!(p.matches_search("EXAMPLE.COM"));
        assert!(p.matches_search("  "));
        assert!(!p.matches_search("bob"));
    }
}
