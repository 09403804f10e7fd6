//! Redirect hooks

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tracing::warn;

/// Receives "send the user to the login screen" requests
pub trait Navigator: Send + Sync {
    fn navigate_to_login(&self, login_path: &str);
}

/// Console navigator: tells the user to sign in again
#[derive(Debug, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate_to_login(&self, login_path: &str) {
        warn!(login_path = %login_path, "Session expired, redirecting to login");
        eprintln!("Your session has expired. Run `eventhub login` to sign in again.");
    }
}

/// Navigator that only records what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    calls: AtomicUsize,
    last_path: Mutex<Option<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_path(&self) -> Option<String> {
        self.last_path.lock().ok().and_then(|p| p.clone())
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to_login(&self, login_path: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_path.lock() {
            *last = Some(login_path.to_string());
        }
    }
}
