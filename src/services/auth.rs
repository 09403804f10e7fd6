//! Authentication service
//!
//! Exchanges credentials for an access token and keeps the credential
//! store in step with the server session.

use serde_json::Value;
use tracing::{info, warn};

use crate::models::user::{GoogleLoginRequest, LoginRequest, RegisterUserRequest};
use crate::models::{AuthSession, User, UserRole};
use crate::utils::errors::{EventHubError, Result};
use crate::utils::logging::log_auth_event;

use super::http::ApiClient;

#[derive(Clone, Debug)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let result = self.client.post("/auth/login", &request).await;
        self.finish_sign_in("login", result)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str, role: UserRole) -> Result<User> {
        if name.trim().is_empty() {
            return Err(EventHubError::Validation("Name is required".to_string()));
        }
        let request = RegisterUserRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            role,
        };
        let result = self.client.post("/auth/register", &request).await;
        self.finish_sign_in("register", result)
    }

    pub async fn login_with_google(&self, credential: &str) -> Result<User> {
        let request = GoogleLoginRequest {
            credential: credential.to_string(),
        };
        let result = self.client.post("/auth/google", &request).await;
        self.finish_sign_in("google", result)
    }

    /// End the session. Local credentials are dropped even if the server call fails.
    pub async fn logout(&self) -> Result<()> {
        let result = self
            .client
            .post::<_, Value>("/auth/logout", &serde_json::json!({}))
            .await;
        if let Err(e) = &result {
            warn!(error = %e, "Logout request failed, clearing local session anyway");
        }
        self.client.store().clear()?;
        log_auth_event("logout", result.is_ok(), None);
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.client.store().user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.store().access_token().is_some()
    }

    /// Signed-in user or `NotAuthenticated`
    pub fn require_user(&self) -> Result<User> {
        self.current_user().ok_or(EventHubError::NotAuthenticated)
    }

    fn finish_sign_in(&self, action: &str, result: Result<AuthSession>) -> Result<User> {
        match result {
            Ok(session) => {
                let store = self.client.store();
                store.set_access_token(&session.access_token)?;
                store.set_user(&session.user)?;
                info!(user_id = %session.user.id, role = session.user.role.as_str(), "Signed in");
                log_auth_event(action, true, Some(&session.user.id));
                Ok(session.user)
            }
            Err(e) => {
                log_auth_event(action, false, Some(&e.to_string()));
                Err(e)
            }
        }
    }
}
