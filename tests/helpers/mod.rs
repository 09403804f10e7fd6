//! Test helpers module
//!
//! Mock API server plus a client context wired to in-memory credentials
//! and a recording navigator, so every test gets an isolated client.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use eventhub::config::{ApiConfig, Settings};
use eventhub::models::User;
use eventhub::services::{ApiClient, ServiceFactory};
use eventhub::state::{CredentialStore, MemoryCredentialStore, RecordingNavigator};

pub const OLD_TOKEN: &str = "old-token";
pub const NEW_TOKEN: &str = "new-token";

/// Successful envelope around `data`
pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

/// Failure envelope with a server message
pub fn error_envelope(message: &str) -> Value {
    json!({ "success": false, "message": message })
}

pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(envelope(data))
}

pub fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(error_envelope("Token expired"))
}

pub fn test_user(id: &str, role: &str) -> User {
    serde_json::from_value(json!({
        "_id": id,
        "name": "Test User",
        "email": format!("{}@example.com", id),
        "role": role
    }))
    .unwrap()
}

/// Mock EventHub API
pub struct ApiMockServer {
    pub server: MockServer,
}

impl ApiMockServer {
    pub async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn base_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    /// Refresh endpoint that must be hit exactly `times` times
    pub async fn mock_refresh(&self, delay_ms: u64, times: u64) {
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(
                ok(json!({ "accessToken": NEW_TOKEN })).set_delay(Duration::from_millis(delay_ms)),
            )
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_refresh_failure(&self, delay_ms: u64) {
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(error_envelope("Refresh token expired"))
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn received_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }
}

/// Isolated client and services for one test
pub struct TestContext {
    pub mock: ApiMockServer,
    pub store: Arc<MemoryCredentialStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub client: ApiClient,
    pub services: ServiceFactory,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_store(MemoryCredentialStore::new()).await
    }

    pub async fn signed_in() -> Self {
        let ctx = Self::with_store(MemoryCredentialStore::with_token(OLD_TOKEN)).await;
        ctx.store.set_user(&test_user("u1", "PARTICIPANT")).unwrap();
        ctx
    }

    pub async fn with_store(store: MemoryCredentialStore) -> Self {
        let mock = ApiMockServer::new().await;
        let store = Arc::new(store);
        let navigator = Arc::new(RecordingNavigator::new());
        let config = ApiConfig {
            base_url: mock.base_url(),
            timeout_seconds: 5,
            ..ApiConfig::default()
        };
        let settings = Settings { api: config, ..Settings::default() };
        let client = ApiClient::new(&settings.api, store.clone(), navigator.clone()).unwrap();
        let services = ServiceFactory::from_client(client.clone());

        Self { mock, store, navigator, client, services }
    }

    pub fn server(&self) -> &MockServer {
        &self.mock.server
    }
}
