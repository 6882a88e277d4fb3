//! Error-reporting collaborators
//!
//! Non-fatal failures (a collection that could not be loaded, a refresh that
//! failed after a successful write) are handed to an `ErrorReporter` instead of
//! being propagated. Implementations must not block or panic.

use std::sync::Mutex;

use tracing::warn;

/// Receives `(operation, reason)` pairs for failures the core absorbs
pub trait ErrorReporter: Send + Sync {
    fn report(&self, operation: &str, reason: &str);
}

/// Reporter that emits a `warn!` event per failure
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, operation: &str, reason: &str) {
        warn!(operation, reason, "Operation failed");
    }
}

/// Reporter that keeps every failure in memory
///
/// Used by tests and by front ends that show failures after the fact.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    entries: Mutex<Vec<(String, String)>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(operation, reason)` pair seen so far
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn operations(&self) -> Vec<String> {
        self.entries().into_iter().map(|(op, _)| op).collect()
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, operation: &str, reason: &str) {
        // A poisoned lock drops the entry rather than panicking the caller
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((operation.to_string(), reason.to_string()));
        }
    }
}
