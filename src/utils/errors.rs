//! Error handling for EventHub
//!
//! This module defines the main error type used throughout the client
//! and the message extraction used to surface failures as inline banners.

use std::error::Error as StdError;

use thiserror::Error;

/// Fallback shown when neither the server nor the error itself says anything useful
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Main error type for the EventHub client
#[derive(Error, Debug)]
pub enum EventHubError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status code {status}")]
    Api { status: u16, message: Option<String> },

    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },
}

/// Result type alias for EventHub operations
pub type Result<T> = std::result::Result<T, EventHubError>;

impl From<config::ConfigError> for EventHubError {
    fn from(err: config::ConfigError) -> Self {
        EventHubError::Config(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for EventHubError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        EventHubError::Storage("session lock poisoned".to_string())
    }
}

impl EventHubError {
    /// Message supplied by the server in the response envelope, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            EventHubError::Api { message: Some(message), .. } if !message.trim().is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// HTTP status of a failed API call
    pub fn status(&self) -> Option<u16> {
        match self {
            EventHubError::Api { status, .. } => Some(*status),
            EventHubError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for 404 responses
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventHubError::Http(_) => true,
            EventHubError::Api { status, .. } => *status >= 500,
            EventHubError::SessionExpired => false,
            EventHubError::NotAuthenticated => false,
            EventHubError::Serialization(_) => false,
            EventHubError::Io(_) => true,
            EventHubError::UrlParse(_) => false,
            EventHubError::Config(_) => false,
            EventHubError::Storage(_) => false,
            EventHubError::InvalidInput(_) => false,
            EventHubError::Validation(_) => false,
            EventHubError::InvalidStateTransition { .. } => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventHubError::Config(_) => ErrorSeverity::Critical,
            EventHubError::SessionExpired => ErrorSeverity::Critical,
            EventHubError::NotAuthenticated => ErrorSeverity::Warning,
            EventHubError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            EventHubError::InvalidInput(_) => ErrorSeverity::Info,
            EventHubError::Validation(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Extract a human readable message from any error.
///
/// Walks the source chain looking for a server-provided message first,
/// then falls back to the error's own display text, then to
/// [`GENERIC_ERROR_MESSAGE`].
pub fn get_error_message(error: &(dyn StdError + 'static)) -> String {
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(err) = current {
        if let Some(message) = err
            .downcast_ref::<EventHubError>()
            .and_then(EventHubError::server_message)
        {
            return message.to_string();
        }
        current = err.source();
    }

    let own = error.to_string();
    if own.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        own
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
