//! EventHub client
//!
//! Typed client for the EventHub event management API: authentication with
//! silent token refresh, event lifecycle, registration, teams, competition
//! scoring, submissions and announcements, plus the console front end
//! built on top of them.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{get_error_message, EventHubError, Result};

// Re-export main components for easy access
pub use services::{ApiClient, ServiceFactory};
pub use state::{CredentialStore, Navigator, Viewer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
