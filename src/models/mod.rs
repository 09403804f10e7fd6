//! Data models module
//!
//! Wire types for every resource the API exposes

pub mod announcement;
pub mod common;
pub mod competition;
pub mod event;
pub mod participation;
pub mod submission;
pub mod team;
pub mod user;

// Re-export commonly used models
pub use announcement::{Announcement, AnnouncementPriority, CreateAnnouncementRequest};
pub use common::{ApiEnvelope, Deleted, EntityRef, ErrorEnvelope, ItemRef};
pub use competition::{
    Category, CompetitionEntry, CompetitionItem, CompetitionItemType, CreateCategoryRequest,
    CreateItemRequest, GradePoints, PlacePoints, SubmitResultRequest, SyncEntriesRequest,
    TeamLeaderboardEntry,
};
pub use event::{
    Capabilities, CreateEventRequest, Event, EventAnalytics, EventLimits, EventStatus, EventType,
    FormField, FormFieldType, UpdateEventRequest,
};
pub use participation::{
    Answers, IndividualLeaderboardEntry, Participation, ParticipationRole, ParticipationStatus,
};
pub use submission::{
    ContentType, FileAttachment, Review, ReviewRequest, Submission, SubmissionDraft,
    SubmissionStatus,
};
pub use team::{AddMemberRequest, CreateTeamRequest, Team, TeamMember, TeamRole};
pub use user::{AuthSession, User, UserRole};
