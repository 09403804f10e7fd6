//! Liveness guard for in-flight loads
//!
//! A view starts a request, then may be closed before the answer arrives.
//! Results are only applied while the scope is still mounted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ViewScope {
    mounted: Arc<AtomicBool>,
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewScope {
    pub fn new() -> Self {
        Self { mounted: Arc::new(AtomicBool::new(true)) }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    /// Store `value` into `slot` if the scope is still live
    pub fn commit<T>(&self, slot: &mut T, value: T) -> bool {
        if self.is_mounted() {
            *slot = value;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_late_result_is_dropped_after_unmount() {
        let scope = ViewScope::new();
        let handle = scope.clone();
        let mut shown: Option<&str> = None;

        let pending = tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            "loaded"
        });
        scope.unmount();
        let value = pending.await.unwrap();

        assert!(!handle.commit(&mut shown, Some(value)));
        assert_eq!(shown, None);
    }

    #[test]
    fn test_commit_while_mounted() {
        let scope = ViewScope::default();
        let mut count = 0;
        assert!(scope.commit(&mut count, 3));
        assert_eq!(count, 3);
    }
}
