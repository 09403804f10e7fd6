//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{EventHubError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_session_config(&settings.session)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(EventHubError::Config(
            "API base URL is required".to_string()
        ));
    }

    url::Url::parse(&config.base_url)
        .map_err(|e| EventHubError::Config(format!("Invalid API base URL: {}", e)))?;

    if config.timeout_seconds == 0 {
        return Err(EventHubError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    if !config.login_path.starts_with('/') {
        return Err(EventHubError::Config(
            "Login path must start with '/'".to_string()
        ));
    }

    Ok(())
}

/// Validate session storage configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.storage_path.as_os_str().is_empty() {
        return Err(EventHubError::Config(
            "Session storage path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventHubError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventHubError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.api.base_url = "not a url".to_string();
        assert_matches!(validate_settings(&settings), Err(EventHubError::Config(_)));

        let mut settings = Settings::default();
        settings.api.timeout_seconds = 0;
        assert_matches!(validate_settings(&settings), Err(EventHubError::Config(_)));

        let mut settings = Settings::default();
        settings.logging.level = "loud".to_string();
        assert_matches!(validate_settings(&settings), Err(EventHubError::Config(_)));

        let mut settings = Settings::default();
        settings.api.login_path = "login".to_string();
        assert_matches!(validate_settings(&settings), Err(EventHubError::Config(_)));
    }
}
