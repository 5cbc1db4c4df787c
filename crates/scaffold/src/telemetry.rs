//! Command telemetry metadata.
//!
//! Tasks record side-channel values (such as the API key of a freshly
//! created app) through a [`TelemetrySink`] injected via the command
//! [`Context`](crate::context::Context). The binary flushes the collected
//! metadata to the log when the command finishes.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

/// Metadata key written after an app has been created.
pub const API_KEY: &str = "api_key";

/// Write-only sink for command metadata.
pub trait TelemetrySink: Send + Sync {
    /// Record `value` under `key`, replacing any previous value.
    fn record(&self, key: &str, value: &str);
}

/// In-memory metadata collected for the current command.
#[derive(Debug, Default)]
pub struct Metadata {
    entries: Mutex<BTreeMap<String, String>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a recorded value.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TelemetrySink for Metadata {
    fn record(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_replaces_previous_value() {
        let metadata = Metadata::new();
        assert!(metadata.is_empty());

        metadata.record(API_KEY, "first");
        metadata.record(API_KEY, "second");

        assert_eq!(metadata.get(API_KEY).as_deref(), Some("second"));
        assert_eq!(metadata.snapshot().len(), 1);
    }
}
