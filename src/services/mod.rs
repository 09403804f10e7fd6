//! Services module
//!
//! One service per API resource, all sharing a single [`ApiClient`]

pub mod announcements;
pub mod auth;
pub mod competition;
pub mod events;
pub mod http;
pub mod participation;
pub mod results;
pub mod submissions;
pub mod teams;

// Re-export commonly used services
pub use announcements::AnnouncementService;
pub use auth::AuthService;
pub use competition::CompetitionService;
pub use events::EventService;
pub use http::{ApiClient, ApiRequest, FormPart, RequestBody};
pub use participation::ParticipationService;
pub use results::ResultService;
pub use submissions::{validate_review, SubmissionService};
pub use teams::TeamService;

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::state::{ConsoleNavigator, CredentialStore, FileCredentialStore, Navigator};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub client: ApiClient,
    pub auth: AuthService,
    pub events: EventService,
    pub participation: ParticipationService,
    pub teams: TeamService,
    pub competition: CompetitionService,
    pub results: ResultService,
    pub submissions: SubmissionService,
    pub announcements: AnnouncementService,
}

impl ServiceFactory {
    /// Build every service on top of one shared client
    pub fn new(
        settings: &Settings,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let client = ApiClient::new(&settings.api, store, navigator)?;
        Ok(Self::from_client(client))
    }

    /// Services backed by the on-disk session and the console navigator
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let store = Arc::new(FileCredentialStore::open(&settings.session.storage_path));
        Self::new(settings, store, Arc::new(ConsoleNavigator))
    }

    pub fn from_client(client: ApiClient) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            events: EventService::new(client.clone()),
            participation: ParticipationService::new(client.clone()),
            teams: TeamService::new(client.clone()),
            competition: CompetitionService::new(client.clone()),
            results: ResultService::new(client.clone()),
            submissions: SubmissionService::new(client.clone()),
            announcements: AnnouncementService::new(client.clone()),
            client,
        }
    }
}
