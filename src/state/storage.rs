//! Credential storage
//!
//! Holds the access token and signed-in user between runs. The refresh
//! token itself never touches this store; it lives in an http-only cookie
//! owned by the HTTP client.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::models::User;
use crate::utils::errors::Result;

/// Where the access token and current user are kept
pub trait CredentialStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn set_access_token(&self, token: &str) -> Result<()>;
    fn user(&self) -> Option<User>;
    fn set_user(&self, user: &User) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Store used by tests and embedders that manage persistence themselves
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    session: RwLock<StoredSession>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            session: RwLock::new(StoredSession {
                access_token: Some(token.to_string()),
                user: None,
            }),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.session.read().ok().and_then(|s| s.access_token.clone())
    }

    fn set_access_token(&self, token: &str) -> Result<()> {
        self.session.write()?.access_token = Some(token.to_string());
        Ok(())
    }

    fn user(&self) -> Option<User> {
        self.session.read().ok().and_then(|s| s.user.clone())
    }

    fn set_user(&self, user: &User) -> Result<()> {
        self.session.write()?.user = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.write()? = StoredSession::default();
        Ok(())
    }
}

/// JSON file on disk, loaded once and rewritten on every change
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    session: RwLock<StoredSession>,
}

impl FileCredentialStore {
    /// Open the store, starting empty if the file is missing or unreadable
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let session = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<StoredSession>(&raw) {
                Ok(session) => {
                    debug!(path = %path.display(), "Loaded stored session");
                    session
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring corrupt session file");
                    StoredSession::default()
                }
            },
            Err(_) => StoredSession::default(),
        };

        Self { path, session: RwLock::new(session) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&self, change: impl FnOnce(&mut StoredSession)) -> Result<()> {
        let snapshot = {
            let mut session = self.session.write()?;
            change(&mut *session);
            session.clone()
        };
        self.persist(&snapshot)
    }

    fn persist(&self, session: &StoredSession) -> Result<()> {
        if session.access_token.is_none() && session.user.is_none() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => {
                    error!(path = %self.path.display(), error = %e, "Failed to remove session file");
                    Err(e.into())
                }
            };
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, data).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "Failed to write session file");
            e.into()
        })
    }
}

impl CredentialStore for FileCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.session.read().ok().and_then(|s| s.access_token.clone())
    }

    fn set_access_token(&self, token: &str) -> Result<()> {
        self.update(|s| s.access_token = Some(token.to_string()))
    }

    fn user(&self) -> Option<User> {
        self.session.read().ok().and_then(|s| s.user.clone())
    }

    fn set_user(&self, user: &User) -> Result<()> {
        self.update(|s| s.user = Some(user.clone()))
    }

    fn clear(&self) -> Result<()> {
        self.update(|s| *s = StoredSession::default())
    }
}
