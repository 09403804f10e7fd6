//! Client-side state
//!
//! Lifecycle rules, view gating, enrollment forms and the stores that
//! survive between runs

pub mod enrollment;
pub mod gating;
pub mod lifecycle;
pub mod navigation;
pub mod registration;
pub mod scoring;
pub mod storage;
pub mod view;

// Re-export commonly used state components
pub use enrollment::{
    available_members, can_manage_members, eligible_members, existing_participants,
    find_team_for_user, member_role, EnrollmentSlots,
};
pub use gating::{Feature, LeaderboardVisibility, Viewer};
pub use lifecycle::transition_buttons;
pub use navigation::{ConsoleNavigator, Navigator, RecordingNavigator};
pub use registration::{parse_answers, validate_answers};
pub use scoring::{build_result, dedupe_entries, entry_label, grade_options, place_options, resolve_result_participant};
pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoredSession};
pub use view::ViewScope;
