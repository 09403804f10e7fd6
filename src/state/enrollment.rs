//! Team enrollment into competition items
//!
//! Works out which team members may be put forward for an item and keeps
//! the slot form consistent as selections and server data change.

use std::collections::{HashMap, HashSet};

use crate::models::{CompetitionEntry, CompetitionItem, SyncEntriesRequest, Team, TeamMember, TeamRole};
use crate::utils::errors::{EventHubError, Result};

/// Team the user belongs to, if any
pub fn find_team_for_user<'a>(teams: &'a [Team], user_id: &str) -> Option<&'a Team> {
    teams.iter().find(|team| team.has_member(user_id))
}

pub fn member_role(team: &Team, user_id: &str) -> Option<TeamRole> {
    team.member(user_id).map(|m| m.role)
}

pub fn can_manage_members(team: &Team, user_id: &str) -> bool {
    member_role(team, user_id)
        .map(|role| role.can_manage_members())
        .unwrap_or(false)
}

/// Members whose category is allowed by the item
pub fn eligible_members<'a>(team: &'a Team, item: &CompetitionItem) -> Vec<&'a TeamMember> {
    if !item.restricts_categories() {
        return team.members.iter().collect();
    }
    team.members
        .iter()
        .filter(|member| match member.category_id() {
            Some(category) => item.allows_category(category),
            None => false,
        })
        .collect()
}

/// How many individual or single entries each participant already holds.
///
/// Entries whose item came back as a bare id have no known type and are
/// not counted.
pub fn individual_item_counts(entries: &[CompetitionEntry]) -> HashMap<&str, u32> {
    let mut counts = HashMap::new();
    for entry in entries {
        let individual = entry
            .item_type()
            .map(|t| t.is_individual_like())
            .unwrap_or(false);
        if !individual {
            continue;
        }
        for participant in entry.participant_ids() {
            *counts.entry(participant).or_insert(0) += 1;
        }
    }
    counts
}

/// Eligible members that have not reached the per-participant cap
pub fn available_members<'a>(
    team: &'a Team,
    item: &CompetitionItem,
    event_entries: &[CompetitionEntry],
    cap: Option<u32>,
) -> Vec<&'a TeamMember> {
    let counts = individual_item_counts(event_entries);
    let limit = cap
        .filter(|&cap| cap > 0)
        .filter(|_| item.item_type.is_individual_like());

    eligible_members(team, item)
        .into_iter()
        .filter(|member| member.user.has_id())
        .filter(|member| match limit {
            Some(limit) => counts.get(member.user_id()).copied().unwrap_or(0) < limit,
            None => true,
        })
        .collect()
}

/// Participants the team already has in `item_entries`, first-seen order
pub fn existing_participants(item_entries: &[CompetitionEntry], team_id: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    item_entries
        .iter()
        .filter(|entry| entry.team_id() == Some(team_id))
        .flat_map(|entry| entry.participant_ids())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Fixed-size participant picker for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentSlots {
    slots: Vec<Option<String>>,
}

impl EnrollmentSlots {
    /// `max(1, max participants)` empty slots
    pub fn for_item(item: &CompetitionItem) -> Self {
        let count = item.max_participants().max(1) as usize;
        Self { slots: vec![None; count] }
    }

    /// Slots filled from the team's current participants, truncated to fit
    pub fn prefilled(item: &CompetitionItem, participant_ids: &[String]) -> Self {
        let mut slots = Self::for_item(item);
        let mut seen = HashSet::new();
        let unique = participant_ids.iter().filter(|id| !id.is_empty() && seen.insert(id.as_str()));
        for (slot, id) in slots.slots.iter_mut().zip(unique) {
            *slot = Some(id.clone());
        }
        slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|s| s.as_deref())
    }

    pub fn set(&mut self, index: usize, participant: Option<String>) -> Result<()> {
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            EventHubError::InvalidInput(format!("slot {} does not exist", index + 1))
        })?;
        *slot = participant.filter(|id| !id.is_empty());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Members selectable in `index`: not picked elsewhere, or already in this slot
    pub fn options<'a>(&self, index: usize, available: &[&'a TeamMember]) -> Vec<&'a TeamMember> {
        let current = self.get(index);
        let taken: HashSet<&str> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .filter_map(|(_, s)| s.as_deref())
            .collect();

        available
            .iter()
            .copied()
            .filter(|member| {
                let id = member.user_id();
                Some(id) == current || !taken.contains(id)
            })
            .collect()
    }

    /// Empty every slot whose member is no longer available
    pub fn reconcile(&mut self, available: &[&TeamMember]) {
        let allowed: HashSet<&str> = available.iter().map(|m| m.user_id()).collect();
        for slot in self.slots.iter_mut() {
            if slot.as_deref().map(|id| !allowed.contains(id)).unwrap_or(false) {
                *slot = None;
            }
        }
    }

    /// Filled slots, de-duplicated in slot order
    pub fn selected(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.slots
            .iter()
            .flatten()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }

    /// Check the selection against the item's bounds
    pub fn validate(&self, item: &CompetitionItem) -> Result<Vec<String>> {
        let selected = self.selected();
        let min = item.min_participants() as usize;
        let max = item.max_participants() as usize;

        if selected.is_empty() {
            return Err(EventHubError::Validation(
                "Please select at least one participant.".to_string(),
            ));
        }
        if selected.len() < min {
            return Err(EventHubError::Validation(format!(
                "This item requires at least {} participants.",
                min
            )));
        }
        if selected.len() > max {
            return Err(EventHubError::Validation(format!(
                "This item allows a maximum of {} participants.",
                max
            )));
        }
        Ok(selected)
    }

    pub fn sync_request(
        &self,
        event_id: &str,
        item: &CompetitionItem,
        team: &Team,
    ) -> Result<SyncEntriesRequest> {
        let participants = self.validate(item)?;
        Ok(SyncEntriesRequest {
            event: event_id.to_string(),
            item: item.id.clone(),
            team: team.id.clone(),
            participants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn team() -> Team {
        serde_json::from_value(json!({
            "_id": "t1",
            "name": "Reds",
            "event": "e1",
            "members": [
                {"user": {"_id": "u1", "name": "Asha"}, "role": "MANAGER", "category": {"_id": "junior"}},
                {"user": "u2", "role": "MEMBER", "category": "senior"},
                {"user": "u3", "role": "ASST_MANAGER"},
                {"user": "u4", "role": "MEMBER", "category": "junior"}
            ]
        }))
        .unwrap()
    }

    fn item(kind: &str, categories: serde_json::Value, min: Option<u32>, max: Option<u32>) -> CompetitionItem {
        serde_json::from_value(json!({
            "_id": "i1",
            "name": "Item",
            "type": kind,
            "allowedCategories": categories,
            "minParticipantsPerTeam": min,
            "maxParticipantsPerTeam": max
        }))
        .unwrap()
    }

    fn entry(id: &str, item: serde_json::Value, team: &str, participants: &[&str]) -> CompetitionEntry {
        serde_json::from_value(json!({
            "_id": id, "item": item, "team": team, "participants": participants
        }))
        .unwrap()
    }

    fn ids(members: &[&TeamMember]) -> Vec<String> {
        members.iter().map(|m| m.user_id().to_string()).collect()
    }

    #[test]
    fn test_team_lookup_and_roles() {
        let teams = vec![team()];
        assert_eq!(find_team_for_user(&teams, "u2").map(|t| t.id.as_str()), Some("t1"));
        assert!(find_team_for_user(&teams, "nobody").is_none());
        assert!(can_manage_members(&teams[0], "u1"));
        assert!(can_manage_members(&teams[0], "u3"));
        assert!(!can_manage_members(&teams[0], "u2"));
        assert_eq!(member_role(&teams[0], "u4"), Some(TeamRole::Member));
    }

    #[test]
    fn test_category_filter_excludes_members_without_category() {
        let t = team();
        let open = item("GROUP", json!([]), None, Some(4));
        assert_eq!(ids(&eligible_members(&t, &open)), vec!["u1", "u2", "u3", "u4"]);

        let junior_only = item("GROUP", json!(["junior"]), None, Some(4));
        assert_eq!(ids(&eligible_members(&t, &junior_only)), vec!["u1", "u4"]);
    }

    #[test]
    fn test_cap_applies_to_individual_items_only() {
        let t = team();
        let entries = vec![
            entry("en1", json!({"_id": "a", "type": "SINGLE"}), "t1", &["u1"]),
            entry("en2", json!({"_id": "b", "type": "INDIVIDUAL"}), "t1", &["u1", "u2"]),
            entry("en3", json!({"_id": "c", "type": "GROUP"}), "t1", &["u2", "u3"]),
            entry("en4", json!("d"), "t1", &["u3", "u3"]),
        ];

        let counts = individual_item_counts(&entries);
        assert_eq!(counts.get("u1"), Some(&2));
        assert_eq!(counts.get("u2"), Some(&1));
        assert_eq!(counts.get("u3"), None);

        let solo = item("INDIVIDUAL", json!([]), None, Some(1));
        assert_eq!(ids(&available_members(&t, &solo, &entries, Some(2))), vec!["u2", "u3", "u4"]);
        assert_eq!(ids(&available_members(&t, &solo, &entries, Some(1))), vec!["u3", "u4"]);
        assert_eq!(ids(&available_members(&t, &solo, &entries, Some(0))).len(), 4);
        assert_eq!(ids(&available_members(&t, &solo, &entries, None)).len(), 4);

        let group = item("GROUP", json!([]), None, Some(4));
        assert_eq!(ids(&available_members(&t, &group, &entries, Some(1))).len(), 4);
    }

    #[test]
    fn test_slot_count_and_options() {
        let t = team();
        let duo = item("GROUP", json!([]), None, Some(2));
        let members = available_members(&t, &duo, &[], None);

        assert_eq!(EnrollmentSlots::for_item(&duo).len(), 2);
        assert_eq!(EnrollmentSlots::for_item(&item("GROUP", json!([]), None, Some(0))).len(), 1);

        let mut slots = EnrollmentSlots::for_item(&duo);
        slots.set(0, Some("u1".into())).unwrap();
        assert_eq!(ids(&slots.options(1, &members)), vec!["u2", "u3", "u4"]);
        assert_eq!(ids(&slots.options(0, &members)), vec!["u1", "u2", "u3", "u4"]);
        assert_matches!(slots.set(5, None), Err(EventHubError::InvalidInput(_)));
    }

    #[test]
    fn test_validation_messages() {
        let trio = item("GROUP", json!([]), Some(2), Some(3));
        let mut slots = EnrollmentSlots::for_item(&trio);

        assert_matches!(
            slots.validate(&trio),
            Err(EventHubError::Validation(m)) if m == "Please select at least one participant."
        );

        slots.set(0, Some("u1".into())).unwrap();
        slots.set(1, Some("u1".into())).unwrap();
        assert_matches!(
            slots.validate(&trio),
            Err(EventHubError::Validation(m)) if m == "This item requires at least 2 participants."
        );

        slots.set(1, Some("u2".into())).unwrap();
        assert_eq!(slots.validate(&trio).unwrap(), vec!["u1", "u2"]);

        let narrowed = item("GROUP", json!([]), None, Some(1));
        assert_matches!(
            slots.validate(&narrowed),
            Err(EventHubError::Validation(m)) if m == "This item allows a maximum of 1 participants."
        );
    }

    #[test]
    fn test_participant_bounds_are_inclusive() {
        let quartet = item("GROUP", json!([]), Some(2), Some(4));
        let mut slots = EnrollmentSlots::for_item(&quartet);
        assert_eq!(slots.len(), 4);

        slots.set(0, Some("u1".into())).unwrap();
        assert_matches!(
            slots.validate(&quartet),
            Err(EventHubError::Validation(m)) if m == "This item requires at least 2 participants."
        );

        slots.set(1, Some("u2".into())).unwrap();
        assert_eq!(slots.validate(&quartet).unwrap(), vec!["u1", "u2"]);

        slots.set(2, Some("u3".into())).unwrap();
        assert_eq!(slots.validate(&quartet).unwrap().len(), 3);

        slots.set(3, Some("u4".into())).unwrap();
        assert_eq!(slots.validate(&quartet).unwrap(), vec!["u1", "u2", "u3", "u4"]);

        assert_matches!(slots.set(4, Some("u5".into())), Err(EventHubError::InvalidInput(_)));
        assert_eq!(slots.validate(&quartet).unwrap().len(), 4);
    }

    #[test]
    fn test_prefill_and_reconcile() {
        let t = team();
        let duo = item("GROUP", json!(["junior"]), None, Some(2));
        let item_entries = vec![
            entry("en1", json!("i1"), "t1", &["u4", "u2", "u4"]),
            entry("en2", json!("i1"), "t9", &["x1"]),
            entry("en3", json!("i1"), "t1", &["u1"]),
        ];

        let existing = existing_participants(&item_entries, "t1");
        assert_eq!(existing, vec!["u4", "u2", "u1"]);

        let mut slots = EnrollmentSlots::prefilled(&duo, &existing);
        assert_eq!(slots.get(0), Some("u4"));
        assert_eq!(slots.get(1), Some("u2"));

        let available = available_members(&t, &duo, &[], None);
        slots.reconcile(&available);
        assert_eq!(slots.get(0), Some("u4"));
        assert_eq!(slots.get(1), None);
    }

    #[test]
    fn test_sync_request_shape() {
        let t = team();
        let duo = item("GROUP", json!([]), None, Some(2));
        let slots = EnrollmentSlots::prefilled(&duo, &["u1".to_string(), "u2".to_string()]);
        let request = slots.sync_request("e1", &duo, &t).unwrap();

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"event": "e1", "item": "i1", "team": "t1", "participants": ["u1", "u2"]})
        );
    }
}
