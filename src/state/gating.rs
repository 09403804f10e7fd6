//! Capability gating
//!
//! Pure predicates deciding which parts of an event view a given user
//! sees. Nothing here is enforced; the server re-checks every action.

use serde::Serialize;

use crate::models::{Event, EventStatus, Participation, Submission, User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardVisibility {
    /// Event is not a scored competition
    NotApplicable,
    Visible,
    /// Shown as a "scores hidden" notice
    Hidden,
}

/// Feature areas an event view can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Register,
    RegisteredBadge,
    MySubmission,
    Submissions,
    ManageEvent,
    Participants,
    TeamDashboard,
    Leaderboard,
    ScoresHidden,
    OrganizerTools,
    ScoringDashboard,
    PostAnnouncements,
    AnnouncementFeed,
}

impl Feature {
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Register => "Register",
            Feature::RegisteredBadge => "Registered",
            Feature::MySubmission => "My submission",
            Feature::Submissions => "Submissions",
            Feature::ManageEvent => "Manage event",
            Feature::Participants => "Participants",
            Feature::TeamDashboard => "Team dashboard",
            Feature::Leaderboard => "Leaderboard",
            Feature::ScoresHidden => "Scores hidden until the organizer publishes them",
            Feature::OrganizerTools => "Organizer tools",
            Feature::ScoringDashboard => "Scoring dashboard",
            Feature::PostAnnouncements => "Post announcements",
            Feature::AnnouncementFeed => "Announcements",
        }
    }
}

/// Who is looking at which event
#[derive(Debug, Clone, Copy)]
pub struct Viewer<'a> {
    pub event: &'a Event,
    pub user: Option<&'a User>,
    pub participation: Option<&'a Participation>,
}

impl<'a> Viewer<'a> {
    pub fn new(
        event: &'a Event,
        user: Option<&'a User>,
        participation: Option<&'a Participation>,
    ) -> Self {
        Self { event, user, participation }
    }

    pub fn is_creator(&self) -> bool {
        match self.user {
            Some(user) => self.event.created_by.has_id() && user.id == self.event.created_by.id,
            None => false,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.participation.is_some()
    }

    fn is_organizer(&self) -> bool {
        self.user.map(User::is_organizer).unwrap_or(false)
    }

    pub fn can_register(&self) -> bool {
        self.user.is_some()
            && !self.is_creator()
            && !self.is_registered()
            && self.event.status == EventStatus::RegistrationOpen
            && self.event.capabilities.registration
    }

    pub fn can_open_my_submission(&self) -> bool {
        self.is_registered() && self.event.capabilities.submissions
    }

    pub fn can_view_submissions(&self) -> bool {
        self.is_creator() && self.event.capabilities.submissions
    }

    pub fn can_manage_event(&self) -> bool {
        self.is_creator()
    }

    pub fn can_view_participants(&self) -> bool {
        self.is_creator()
    }

    pub fn can_view_team_dashboard(&self) -> bool {
        self.user.is_some() && self.event.capabilities.teams && self.event.is_competition
    }

    pub fn leaderboard_visibility(&self) -> LeaderboardVisibility {
        if !(self.event.is_competition && self.event.capabilities.scoring) {
            return LeaderboardVisibility::NotApplicable;
        }
        if self.event.is_leaderboard_published || self.is_organizer() {
            LeaderboardVisibility::Visible
        } else {
            LeaderboardVisibility::Hidden
        }
    }

    pub fn can_view_organizer_tools(&self) -> bool {
        self.is_creator() && self.is_organizer() && self.event.is_competition
    }

    pub fn can_view_scoring_dashboard(&self) -> bool {
        self.can_view_organizer_tools() && self.event.capabilities.scoring
    }

    pub fn can_post_announcements(&self) -> bool {
        self.is_creator()
    }

    /// `existing` is the viewer's current submission, if one was found
    pub fn can_create_submission(&self, existing: Option<&Submission>) -> bool {
        self.event.capabilities.submissions && existing.is_none()
    }

    pub fn can_review_submission(&self, submission: &Submission) -> bool {
        let is_reviewer = self
            .user
            .map(|u| matches!(u.role, UserRole::Organizer | UserRole::Judge))
            .unwrap_or(false);
        is_reviewer
            && !submission.status.is_draft()
            && self.event.capabilities.submissions
            && self.event.capabilities.review
    }

    /// Every feature this viewer should see, in page order
    pub fn visible_features(&self) -> Vec<Feature> {
        let mut features = Vec::new();
        if self.can_register() {
            features.push(Feature::Register);
        }
        if self.is_registered() {
            features.push(Feature::RegisteredBadge);
        }
        if self.can_open_my_submission() {
            features.push(Feature::MySubmission);
        }
        if self.can_view_submissions() {
            features.push(Feature::Submissions);
        }
        if self.can_manage_event() {
            features.push(Feature::ManageEvent);
        }
        if self.can_view_participants() {
            features.push(Feature::Participants);
        }
        if self.can_view_team_dashboard() {
            features.push(Feature::TeamDashboard);
        }
        match self.leaderboard_visibility() {
            LeaderboardVisibility::Visible => features.push(Feature::Leaderboard),
            LeaderboardVisibility::Hidden => features.push(Feature::ScoresHidden),
            LeaderboardVisibility::NotApplicable => {}
        }
        if self.can_view_organizer_tools() {
            features.push(Feature::OrganizerTools);
        }
        if self.can_view_scoring_dashboard() {
            features.push(Feature::ScoringDashboard);
        }
        if self.can_post_announcements() {
            features.push(Feature::PostAnnouncements);
        }
        features.push(Feature::AnnouncementFeed);
        features
    }
}
