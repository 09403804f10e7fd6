//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// REST API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    /// Where the client sends the user when the session cannot be refreshed
    pub login_path: String,
}

/// Persisted session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub storage_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
    pub json: bool,
}

impl Settings {
    /// Load settings from defaults, `eventhub.toml` and `EVENTHUB__*` environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("eventhub")
    }

    /// Load settings using a specific configuration file name (extension optional)
    pub fn from_file(name: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name(name).required(false))
            .add_source(config::Environment::with_prefix("EVENTHUB").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EventHubError> {
        super::validation::validate_settings(self)
    }

    /// Render the effective settings as TOML
    pub fn to_toml(&self) -> Result<String, crate::utils::errors::EventHubError> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::utils::errors::EventHubError::Config(e.to_string()))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_seconds: 30,
            user_agent: format!("eventhub-client/{}", env!("CARGO_PKG_VERSION")),
            login_path: "/login".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(".eventhub/session.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_config() {
        let settings = Settings::from_file("does-not-exist").unwrap();
        assert_eq!(settings.api.base_url, "http://localhost:5000/api");
        assert_eq!(settings.api.login_path, "/login");
        assert_eq!(settings.api.timeout_seconds, 30);
        assert!(settings.logging.directory.is_none());
    }

    #[test]
    fn test_to_toml_contains_sections() {
        let rendered = Settings::default().to_toml().unwrap();
        assert!(rendered.contains("[api]"));
        assert!(rendered.contains("[session]"));
        assert!(rendered.contains("base_url"));
    }
}
