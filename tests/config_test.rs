//! Configuration loading and client wiring

mod helpers;

use std::io::Write;
use std::sync::Arc;

use serial_test::serial;

use eventhub::config::Settings;
use eventhub::services::ServiceFactory;
use eventhub::state::{CredentialStore, FileCredentialStore, RecordingNavigator};
use eventhub::EventHubError;
use helpers::*;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    let settings = Settings::from_file("does-not-exist-eventhub").unwrap();
    assert_eq!(settings.api.base_url, "http://localhost:5000/api");
    assert_eq!(settings.api.login_path, "/login");
    assert!(settings.validate().is_ok());
}

#[test]
#[serial]
fn test_file_values_override_defaults() {
    let file = write_config(
        r#"
[api]
base_url = "https://events.example.com/api"
timeout_seconds = 10

[logging]
level = "debug"
json = true
"#,
    );

    let settings = Settings::from_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(settings.api.base_url, "https://events.example.com/api");
    assert_eq!(settings.api.timeout_seconds, 10);
    assert_eq!(settings.api.login_path, "/login");
    assert_eq!(settings.logging.level, "debug");
    assert!(settings.logging.json);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let file = write_config("[api]\nbase_url = \"https://file.example.com/api\"\n");
    std::env::set_var("EVENTHUB__API__BASE_URL", "https://env.example.com/api");

    let settings = Settings::from_file(file.path().to_str().unwrap());
    std::env::remove_var("EVENTHUB__API__BASE_URL");

    assert_eq!(settings.unwrap().api.base_url, "https://env.example.com/api");
}

#[test]
fn test_invalid_settings_are_rejected() {
    let mut settings = Settings::default();
    settings.api.base_url = "not a url".to_string();
    assert!(matches!(settings.validate(), Err(EventHubError::Config(_))));

    let mut settings = Settings::default();
    settings.api.login_path = "login".to_string();
    assert!(matches!(settings.validate(), Err(EventHubError::Config(_))));

    let mut settings = Settings::default();
    settings.api.timeout_seconds = 0;
    assert!(settings.validate().is_err());
}

#[tokio::test]
async fn test_signed_in_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let session_path = dir.path().join("nested").join("session.json");
    let mock = ApiMockServer::new().await;

    let mut settings = Settings::default();
    settings.api.base_url = mock.base_url();
    settings.session.storage_path = session_path.clone();

    {
        let store = Arc::new(FileCredentialStore::open(&session_path));
        let services =
            ServiceFactory::new(&settings, store, Arc::new(RecordingNavigator::new())).unwrap();
        services.client.store().set_access_token("persisted").unwrap();
        services.client.store().set_user(&test_user("u9", "JUDGE")).unwrap();
    }

    let services = ServiceFactory::from_settings(&settings).unwrap();
    assert_eq!(services.client.store().access_token().as_deref(), Some("persisted"));
    assert_eq!(services.auth.current_user().map(|u| u.id), Some("u9".to_string()));
}

#[test]
#[serial]
fn test_logging_writes_to_configured_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.logging.directory = Some(dir.path().to_path_buf());
    settings.logging.level = "debug".to_string();

    let guard = eventhub::utils::logging::init_logging(&settings.logging).unwrap();
    assert!(guard.is_some());

    // A second subscriber cannot be installed in the same process
    assert!(eventhub::utils::logging::init_logging(&settings.logging).is_err());
}
