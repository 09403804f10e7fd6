//! Competition structure: categories, items, entries and results

use serde::{Deserialize, Serialize};

use super::common::{EntityRef, ItemRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompetitionItemType {
    Individual,
    Group,
    Single,
}

impl CompetitionItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitionItemType::Individual => "INDIVIDUAL",
            CompetitionItemType::Group => "GROUP",
            CompetitionItemType::Single => "SINGLE",
        }
    }

    /// Individual and single items are scored per participant
    pub fn is_individual_like(&self) -> bool {
        matches!(self, CompetitionItemType::Individual | CompetitionItemType::Single)
    }
}

impl std::str::FromStr for CompetitionItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INDIVIDUAL" => Ok(CompetitionItemType::Individual),
            "GROUP" => Ok(CompetitionItemType::Group),
            "SINGLE" => Ok(CompetitionItemType::Single),
            other => Err(format!("unknown item type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacePoints {
    pub first: u32,
    pub second: u32,
    pub third: u32,
}

impl Default for PlacePoints {
    fn default() -> Self {
        Self { first: 10, second: 6, third: 2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradePoints {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Default for GradePoints {
    fn default() -> Self {
        Self { a: 5, b: 3, c: 1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: CompetitionItemType,
    #[serde(default)]
    pub allowed_categories: Vec<EntityRef>,
    #[serde(default, alias = "minParticipants")]
    pub min_participants_per_team: Option<u32>,
    #[serde(default, alias = "maxParticipants")]
    pub max_participants_per_team: Option<u32>,
    #[serde(default)]
    pub place_points: Option<PlacePoints>,
    #[serde(default)]
    pub grade_points: Option<GradePoints>,
}

impl CompetitionItem {
    pub fn min_participants(&self) -> u32 {
        self.min_participants_per_team.unwrap_or(1)
    }

    pub fn max_participants(&self) -> u32 {
        self.max_participants_per_team.unwrap_or(1)
    }

    pub fn restricts_categories(&self) -> bool {
        self.allowed_categories.iter().any(EntityRef::has_id)
    }

    pub fn allows_category(&self, category_id: &str) -> bool {
        self.allowed_categories.iter().any(|c| c.id == category_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionEntry {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub item: Option<ItemRef>,
    #[serde(default)]
    pub team: Option<EntityRef>,
    #[serde(default)]
    pub participants: Vec<EntityRef>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CompetitionEntry {
    pub fn team_id(&self) -> Option<&str> {
        self.team.as_ref().map(|t| t.id.as_str()).filter(|id| !id.is_empty())
    }

    /// Known item type, `None` when the item arrived as a bare id
    pub fn item_type(&self) -> Option<CompetitionItemType> {
        self.item.as_ref().and_then(|item| item.item_type)
    }

    /// Participant ids, skipping references that carry none
    pub fn participant_ids(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().filter(|p| p.has_id()).map(|p| p.id.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub event_id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub event_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: CompetitionItemType,
    pub allowed_categories: Vec<String>,
    pub max_participants_per_team: u32,
    pub place_points: PlacePoints,
    pub grade_points: GradePoints,
}

/// Replaces a team's participants for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncEntriesRequest {
    pub event: String,
    pub item: String,
    pub team: String,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultRequest {
    pub event_id: String,
    pub item_id: String,
    pub team_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLeaderboardEntry {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub total_points: f64,
}
