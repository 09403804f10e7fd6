//! HTTP client for the EventHub API
//!
//! Every call goes through [`ApiClient::send`]. It attaches the stored
//! bearer token, unwraps the `{ success, data, message }` envelope, and on
//! a 401 refreshes the access token once for however many requests failed
//! at the same time.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::models::user::RefreshedToken;
use crate::models::ErrorEnvelope;
use crate::state::{CredentialStore, Navigator};
use crate::utils::errors::{EventHubError, Result};
use crate::utils::logging::{log_api_call, log_api_error};

const REFRESH_PATH: &str = "/auth/refresh";

/// One part of a multipart body, kept as data so it can be re-sent
#[derive(Debug, Clone)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime_type: Option<String>,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// A request that can be issued more than once
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }
}

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    /// Requests parked until the running refresh settles; `None` means it failed
    waiters: Vec<oneshot::Sender<Option<String>>>,
}

/// Authenticated client shared by every resource service
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    login_path: String,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    refresh: Arc<Mutex<RefreshState>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("login_path", &self.login_path)
            .finish()
    }
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            login_path: config.login_path.clone(),
            store,
            navigator,
            refresh: Arc::new(Mutex::new(RefreshState::default())),
        })
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(ApiRequest::delete(path)).await
    }

    /// Issue `request` and unwrap the envelope's `data`
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.execute(&request).await?;
        let result = decode(response).await;
        if let Err(e) = &result {
            log_api_error(&request.path, &e.to_string(), Some(request.method.as_str()));
        }
        result
    }

    async fn execute(&self, request: &ApiRequest) -> Result<Response> {
        let token = self.store.access_token();
        let response = self.dispatch(request, token.as_deref()).await?;
        log_api_call(request.method.as_str(), &request.path, response.status().as_u16(), false);

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let fresh = self.recover_token(token.as_deref()).await?;
        let retried = self.dispatch(request, Some(&fresh)).await?;
        log_api_call(request.method.as_str(), &request.path, retried.status().as_u16(), true);

        // A second 401 is reported as is; there is no further refresh.
        Ok(retried)
    }

    /// Obtain a token to retry with after a 401 on a request sent with `used`
    async fn recover_token(&self, used: Option<&str>) -> Result<String> {
        let waiter = {
            let mut state = self.refresh.lock().await;

            match self.store.access_token() {
                Some(current) if used != Some(current.as_str()) => {
                    debug!("Access token changed while request was in flight, retrying");
                    return Ok(current);
                }
                // Credentials were cleared by a failed refresh; the session already ended
                None if used.is_some() && !state.in_flight => {
                    debug!("Session ended while request was in flight");
                    return Err(EventHubError::SessionExpired);
                }
                _ => {}
            }

            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                debug!(queued = state.waiters.len(), "Refresh in flight, queueing request");
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        match waiter {
            Some(rx) => match rx.await {
                Ok(Some(token)) => Ok(token),
                _ => Err(EventHubError::SessionExpired),
            },
            None => self.run_refresh().await,
        }
    }

    async fn run_refresh(&self) -> Result<String> {
        info!("Refreshing access token");

        let outcome = match self.request_new_token().await {
            Ok(token) => self.store.set_access_token(&token).map(|_| token),
            Err(e) => Err(e),
        };

        let waiters = {
            let mut state = self.refresh.lock().await;
            state.in_flight = false;
            if outcome.is_err() {
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to clear stored credentials");
                }
            }
            std::mem::take(&mut state.waiters)
        };

        match outcome {
            Ok(token) => {
                info!(released = waiters.len(), "Access token refreshed");
                for waiter in waiters {
                    let _ = waiter.send(Some(token.clone()));
                }
                Ok(token)
            }
            Err(e) => {
                warn!(error = %e, rejected = waiters.len(), "Token refresh failed, session ended");
                self.navigator.navigate_to_login(&self.login_path);
                for waiter in waiters {
                    let _ = waiter.send(None);
                }
                Err(EventHubError::SessionExpired)
            }
        }
    }

    /// `POST /auth/refresh`, authenticated by the refresh cookie alone
    async fn request_new_token(&self) -> Result<String> {
        let url = self.url(REFRESH_PATH)?;
        let response = self.http.post(url).json(&serde_json::json!({})).send().await?;
        log_api_call("POST", REFRESH_PATH, response.status().as_u16(), false);
        let refreshed: RefreshedToken = decode(response).await?;
        Ok(refreshed.access_token)
    }

    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> Result<Response> {
        let url = self.url(&request.path)?;
        let mut builder = self.http.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        Ok(builder.send().await?)
    }

    fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }
}

fn build_form(parts: &[FormPart]) -> Result<Form> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            FormPart::File { name, file_name, mime_type, bytes } => {
                let mut file = Part::bytes(bytes.clone()).file_name(file_name.clone());
                if let Some(mime) = mime_type {
                    file = file.mime_str(mime)?;
                }
                form.part(name.clone(), file)
            }
        };
    }
    Ok(form)
}

/// Unwrap the response envelope or turn the failure into `EventHubError::Api`
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorEnvelope>(&bytes)
            .ok()
            .and_then(|body| body.message);
        return Err(EventHubError::Api { status: status.as_u16(), message });
    }

    let mut body: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body.get("message").and_then(Value::as_str).map(str::to_string);
        return Err(EventHubError::Api { status: status.as_u16(), message });
    }

    let data = match body.get_mut("data") {
        Some(data) => data.take(),
        None => Value::Null,
    };
    Ok(serde_json::from_value(data)?)
}
