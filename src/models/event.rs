//! Event model

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::EntityRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Conference,
    Fest,
    Program,
    Custom,
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONFERENCE" => Ok(EventType::Conference),
            "FEST" => Ok(EventType::Fest),
            "PROGRAM" => Ok(EventType::Program),
            "CUSTOM" => Ok(EventType::Custom),
            other => Err(format!("unknown event type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Draft,
    Published,
    RegistrationOpen,
    Ongoing,
    Completed,
    Cancelled,
    Archived,
}

impl EventStatus {
    pub const ALL: [EventStatus; 7] = [
        EventStatus::Draft,
        EventStatus::Published,
        EventStatus::RegistrationOpen,
        EventStatus::Ongoing,
        EventStatus::Completed,
        EventStatus::Cancelled,
        EventStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "DRAFT",
            EventStatus::Published => "PUBLISHED",
            EventStatus::RegistrationOpen => "REGISTRATION_OPEN",
            EventStatus::Ongoing => "ONGOING",
            EventStatus::Completed => "COMPLETED",
            EventStatus::Cancelled => "CANCELLED",
            EventStatus::Archived => "ARCHIVED",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(|c: char| c == '-' || c == ' ', "_");
        EventStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("unknown event status: {}", s))
    }
}

/// Optional feature areas an organizer can switch on per event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub registration: bool,
    pub submissions: bool,
    pub review: bool,
    pub teams: bool,
    pub scoring: bool,
    pub sessions: bool,
    pub realtime: bool,
}

impl Capabilities {
    /// Flag names paired with their values, in display order
    pub fn flags(&self) -> [(&'static str, bool); 7] {
        [
            ("registration", self.registration),
            ("submissions", self.submissions),
            ("review", self.review),
            ("teams", self.teams),
            ("scoring", self.scoring),
            ("sessions", self.sessions),
            ("realtime", self.realtime),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventLimits {
    pub max_individual_items_per_participant: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldType {
    Text,
    Number,
    Email,
    Select,
    Checkbox,
    Textarea,
}

/// One field of an event's registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FormFieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_type: EventType,
    pub status: EventStatus,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub is_competition: bool,
    #[serde(default)]
    pub is_leaderboard_published: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub registration_start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub registration_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub registration_form: Vec<FormField>,
    pub created_by: EntityRef,
    #[serde(default)]
    pub limits: Option<EventLimits>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default, alias = "venue")]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Event-wide cap on individual/single item enrollments, if any
    pub fn max_individual_items_per_participant(&self) -> Option<u32> {
        self.limits.and_then(|l| l.max_individual_items_per_participant)
    }

    /// Label of the registration field with this id, falling back to the id
    pub fn answer_label<'a>(&'a self, field_id: &'a str) -> &'a str {
        self.registration_form
            .iter()
            .find(|field| field.id == field_id)
            .map(|field| field.label.as_str())
            .unwrap_or(field_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub event_type: Option<EventType>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_public: bool,
    pub is_competition: bool,
    pub capabilities: Capabilities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_end_date: Option<DateTime<Utc>>,
    pub registration_form: Vec<FormField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_competition: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_leaderboard_published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Capabilities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_form: Option<Vec<FormField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<EventLimits>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionRequest {
    pub status: EventStatus,
}

/// Organizer dashboard numbers for one event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventAnalytics {
    pub total_registrations: u64,
    pub total_submissions: u64,
    pub submissions_by_status: BTreeMap<String, u64>,
    pub average_score: Option<f64>,
    pub total_teams: Option<u64>,
    /// Percentage of registrants who submitted
    pub conversion_rate: Option<f64>,
}

impl EventAnalytics {
    /// Share of submissions in `status`, as a percentage
    pub fn submission_share(&self, status: &str) -> f64 {
        if self.total_submissions == 0 {
            return 0.0;
        }
        let count = self.submissions_by_status.get(status).copied().unwrap_or(0);
        count as f64 / self.total_submissions as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_deserializes_with_embedded_creator_and_venue() {
        let event: Event = serde_json::from_value(json!({
            "_id": "e1",
            "title": "Spring Fest",
            "eventType": "FEST",
            "status": "REGISTRATION_OPEN",
            "capabilities": {"registration": true, "teams": true},
            "isCompetition": true,
            "createdBy": {"_id": "u1", "name": "Org"},
            "limits": {"maxIndividualItemsPerParticipant": 2},
            "venue": "Main Hall",
            "startDate": "2025-03-07T09:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(event.status, EventStatus::RegistrationOpen);
        assert!(event.capabilities.registration);
        assert!(!event.capabilities.scoring);
        assert_eq!(event.created_by.id, "u1");
        assert_eq!(event.max_individual_items_per_participant(), Some(2));
        assert_eq!(event.location.as_deref(), Some("Main Hall"));
        assert!(event.start_date.is_some());
    }

    #[test]
    fn test_status_parsing_is_lenient() {
        assert_eq!("registration-open".parse::<EventStatus>(), Ok(EventStatus::RegistrationOpen));
        assert_eq!("archived".parse::<EventStatus>(), Ok(EventStatus::Archived));
        assert!("finished".parse::<EventStatus>().is_err());
    }

    #[test]
    fn test_analytics_reads_conversion_rate() {
        let analytics: EventAnalytics = serde_json::from_value(json!({
            "totalRegistrations": 40,
            "totalSubmissions": 10,
            "conversionRate": 25.0
        }))
        .unwrap();
        assert_eq!(analytics.conversion_rate, Some(25.0));
        assert_eq!(EventAnalytics::default().conversion_rate, None);
    }

    #[test]
    fn test_analytics_share() {
        let mut analytics = EventAnalytics { total_submissions: 4, ..Default::default() };
        analytics.submissions_by_status.insert("DRAFT".to_string(), 1);
        assert_eq!(analytics.submission_share("DRAFT"), 25.0);
        assert_eq!(analytics.submission_share("ACCEPTED"), 0.0);
        assert_eq!(EventAnalytics::default().submission_share("DRAFT"), 0.0);
    }
}
