//! Tracker configuration.

/// Default key under which completion data is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "exerciseCompletion";

/// Configuration for a [`CompletionStore`](crate::CompletionStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Key of the persisted completion blob
    pub storage_key: String,
}

impl TrackerConfig {
    /// Use a different storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
