//! Team model

use serde::{Deserialize, Serialize};

use super::common::EntityRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamRole {
    Manager,
    AsstManager,
    Captain,
    Member,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Manager => "MANAGER",
            TeamRole::AsstManager => "ASST_MANAGER",
            TeamRole::Captain => "CAPTAIN",
            TeamRole::Member => "MEMBER",
        }
    }

    /// Managers and assistant managers may add members and enroll them
    pub fn can_manage_members(&self) -> bool {
        matches!(self, TeamRole::Manager | TeamRole::AsstManager)
    }
}

impl std::str::FromStr for TeamRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "MANAGER" => Ok(TeamRole::Manager),
            "ASST_MANAGER" => Ok(TeamRole::AsstManager),
            "CAPTAIN" => Ok(TeamRole::Captain),
            "MEMBER" => Ok(TeamRole::Member),
            other => Err(format!("unknown team role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub user: EntityRef,
    pub role: TeamRole,
    #[serde(default)]
    pub category: Option<EntityRef>,
}

impl TeamMember {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// Category id, or `None` when unassigned
    pub fn category_id(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|c| c.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub event: EntityRef,
    #[serde(default)]
    pub members: Vec<TeamMember>,
    #[serde(default)]
    pub total_points: f64,
}

impl Team {
    pub fn member(&self, user_id: &str) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.user.has_id() && m.user_id() == user_id)
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.member(user_id).is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub event_id: String,
    pub name: String,
    pub manager_email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub email: String,
    pub role: TeamRole,
    pub category_id: String,
}
