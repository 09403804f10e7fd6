//! Event lifecycle
//!
//! The transition table here only drives which buttons are offered. The
//! server owns the real state machine and its answer always wins.

use crate::models::{Event, EventStatus};

impl EventStatus {
    /// Statuses reachable from `self`, in display order
    pub fn allowed_transitions(self) -> &'static [EventStatus] {
        use EventStatus::*;
        match self {
            Draft => &[Published, Cancelled],
            Published => &[RegistrationOpen, Cancelled, Archived],
            RegistrationOpen => &[Ongoing, Cancelled],
            Ongoing => &[Completed, Cancelled],
            Completed => &[Archived],
            Cancelled => &[Archived],
            Archived => &[],
        }
    }

    pub fn can_transition_to(self, next: EventStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Button caption for moving an event into this status
    pub fn action_label(self) -> &'static str {
        match self {
            EventStatus::Draft => "Revert to draft",
            EventStatus::Published => "Publish",
            EventStatus::RegistrationOpen => "Open registration",
            EventStatus::Ongoing => "Start event",
            EventStatus::Completed => "Complete",
            EventStatus::Cancelled => "Cancel",
            EventStatus::Archived => "Archive",
        }
    }
}

/// Targets to offer as buttons for `event`
pub fn transition_buttons(event: &Event) -> Vec<EventStatus> {
    event.status.allowed_transitions().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_in(status: EventStatus) -> Event {
        serde_json::from_value(json!({
            "_id": "e1",
            "title": "Spring Fest",
            "eventType": "FEST",
            "status": status,
            "createdBy": "o1"
        }))
        .unwrap()
    }

    #[test]
    fn test_transition_buttons_for_every_status() {
        use EventStatus::*;
        let expected: [(EventStatus, Vec<EventStatus>); 7] = [
            (Draft, vec![Published, Cancelled]),
            (Published, vec![RegistrationOpen, Cancelled, Archived]),
            (RegistrationOpen, vec![Ongoing, Cancelled]),
            (Ongoing, vec![Completed, Cancelled]),
            (Completed, vec![Archived]),
            (Cancelled, vec![Archived]),
            (Archived, vec![]),
        ];

        for (status, targets) in expected {
            assert_eq!(transition_buttons(&event_in(status)), targets, "{status}");
        }
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(
            EventStatus::Draft.allowed_transitions(),
            &[EventStatus::Published, EventStatus::Cancelled]
        );
        assert_eq!(
            EventStatus::Published.allowed_transitions(),
            &[EventStatus::RegistrationOpen, EventStatus::Cancelled, EventStatus::Archived]
        );
        assert!(EventStatus::Ongoing.can_transition_to(EventStatus::Completed));
        assert!(!EventStatus::Ongoing.can_transition_to(EventStatus::Draft));
        assert!(EventStatus::Cancelled.can_transition_to(EventStatus::Archived));
    }

    #[test]
    fn test_only_archived_is_terminal() {
        for status in EventStatus::ALL {
            assert_eq!(status.is_terminal(), status == EventStatus::Archived, "{status}");
        }
    }

    #[test]
    fn test_no_status_transitions_to_itself() {
        for status in EventStatus::ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_every_status_reaches_archived() {
        for start in EventStatus::ALL {
            let mut frontier = vec![start];
            let mut seen = vec![start];
            while let Some(current) = frontier.pop() {
                for &next in current.allowed_transitions() {
                    if !seen.contains(&next) {
                        seen.push(next);
                        frontier.push(next);
                    }
                }
            }
            assert!(seen.contains(&EventStatus::Archived), "{start} cannot reach ARCHIVED");
        }
    }
}
