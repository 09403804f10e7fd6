//! Shared wire types
//!
//! The API sometimes returns a referenced document as a bare id and sometimes
//! embeds it. Both shapes are normalized here so callers never re-check them.

use serde::{Deserialize, Serialize};

use super::competition::CompetitionItemType;

/// Standard response envelope `{ success, data, message? }`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned alongside non-2xx statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of delete endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Deleted {
    #[serde(default)]
    pub deleted: bool,
}

/// Reference to a user, team or category
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "RawRef")]
pub struct EntityRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl EntityRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), name: None, email: None }
    }

    /// Name if known, else email, else the raw id
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(self.id.as_str())
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRef {
    Id(String),
    Object {
        #[serde(rename = "_id", default)]
        underscore_id: Option<String>,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
    },
}

impl From<RawRef> for EntityRef {
    fn from(raw: RawRef) -> Self {
        match raw {
            RawRef::Id(id) => EntityRef::new(id),
            RawRef::Object { underscore_id, id, name, email } => EntityRef {
                id: underscore_id.or(id).unwrap_or_default(),
                name,
                email,
            },
        }
    }
}

/// Reference to a competition item as embedded in an entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "RawItemRef")]
pub struct ItemRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unknown when the server only sent the id
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<CompetitionItemType>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItemRef {
    Id(String),
    Object {
        #[serde(rename = "_id", default)]
        underscore_id: Option<String>,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(rename = "type", default)]
        item_type: Option<CompetitionItemType>,
    },
}

impl From<RawItemRef> for ItemRef {
    fn from(raw: RawItemRef) -> Self {
        match raw {
            RawItemRef::Id(id) => ItemRef { id, name: None, item_type: None },
            RawItemRef::Object { underscore_id, id, name, item_type } => ItemRef {
                id: underscore_id.or(id).unwrap_or_default(),
                name,
                item_type,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_ref_from_bare_id() {
        let r: EntityRef = serde_json::from_value(json!("u1")).unwrap();
        assert_eq!(r, EntityRef::new("u1"));
        assert_eq!(r.display_name(), "u1");
    }

    #[test]
    fn test_entity_ref_from_object_with_either_id_key() {
        let r: EntityRef =
            serde_json::from_value(json!({"_id": "u1", "name": "Asha", "email": "a@x.io"})).unwrap();
        assert_eq!(r.id, "u1");
        assert_eq!(r.display_name(), "Asha");

        let r: EntityRef = serde_json::from_value(json!({"id": "u2", "email": "b@x.io"})).unwrap();
        assert_eq!(r.id, "u2");
        assert_eq!(r.display_name(), "b@x.io");

        let r: EntityRef = serde_json::from_value(json!({"name": "ghost"})).unwrap();
        assert!(!r.has_id());
    }

    #[test]
    fn test_item_ref_keeps_type_only_when_embedded() {
        let r: ItemRef = serde_json::from_value(json!("i1")).unwrap();
        assert_eq!(r.item_type, None);

        let r: ItemRef =
            serde_json::from_value(json!({"_id": "i1", "type": "SINGLE", "name": "Solo"})).unwrap();
        assert_eq!(r.item_type, Some(CompetitionItemType::Single));
    }

    #[test]
    fn test_envelope_message_is_optional() {
        let env: ApiEnvelope<Vec<u32>> =
            serde_json::from_value(json!({"success": true, "data": [1, 2]})).unwrap();
        assert!(env.success);
        assert_eq!(env.data, vec![1, 2]);
        assert!(env.message.is_none());
    }
}
