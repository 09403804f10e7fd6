//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging helpers
//! for the EventHub client.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::utils::errors::{EventHubError, Result};

/// Initialize logging based on configuration.
///
/// Console output goes to stderr so that command output on stdout stays clean.
/// When a log directory is configured a daily rolling file is added; the
/// returned guard must be held for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| EventHubError::Config(format!("Invalid log filter: {}", e)))?;

    let console = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "eventhub.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| EventHubError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log an outgoing API call and its outcome
pub fn log_api_call(method: &str, path: &str, status: u16, retried: bool) {
    if status >= 400 {
        warn!(method = method, path = path, status = status, retried = retried, "API call failed");
    } else {
        debug!(method = method, path = path, status = status, retried = retried, "API call completed");
    }
}

/// Log authentication events
pub fn log_auth_event(action: &str, success: bool, details: Option<&str>) {
    if success {
        info!(action = action, details = details, "Authentication event: success");
    } else {
        warn!(action = action, details = details, "Authentication event: failure");
    }
}

/// Log event management actions
pub fn log_event_action(event_id: &str, action: &str, details: Option<&str>) {
    info!(
        event_id = event_id,
        action = action,
        details = details,
        "Event action performed"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(api = api, error = error, context = context, "API error occurred");
}
