//! Completion store - which exercises the learner has finished.
//!
//! The store is the single source of truth for completion status. Every
//! operation is a synchronous read-modify-write of the whole persisted blob.
//! Storage failures never reach the caller: reads fall back to an empty
//! mapping and writes are logged and dropped, so a failed write can leave the
//! persisted data behind what the caller believes was saved. A blob written by
//! a newer schema is never overwritten.

use grammatik_core::{CompletionData, CompletionRecord, Level, Topic, TopicList};
use grammatik_storage::{schema, KeyValueStore, Result, StorageError};
use tracing::{debug, error, warn};
use crate::config::TrackerConfig;

/// Persisted mapping from exercise id to completion record.
#[derive(Debug)]
pub struct CompletionStore<S: KeyValueStore> {
    backend: S,
    config: TrackerConfig,
}

impl<S: KeyValueStore> CompletionStore<S> {
    /// Create a store over `backend` with the default configuration.
    pub fn new(backend: S) -> Self {
        Self::with_config(backend, TrackerConfig::default())
    }

    /// Create a store with an explicit configuration.
    pub fn with_config(backend: S, config: TrackerConfig) -> Self {
        Self { backend, config }
    }

    /// Underlying key-value backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Consume the store, returning its backend.
    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Current completion mapping.
    ///
    /// A missing or unreadable blob yields an empty mapping.
    pub fn get_completion_data(&self) -> CompletionData {
        match self.load() {
            Ok(data) => data,
            Err(e) => {
                warn!(
                    "Discarding unreadable completion data under {:?}: {}",
                    self.config.storage_key, e
                );
                CompletionData::new()
            }
        }
    }

    /// Record `exercise_id` as completed now.
    ///
    /// Re-marking replaces the previous record wholesale, topics included.
    pub fn mark_exercise_completed(&mut self, exercise_id: &str, level: Level, topics: &[Topic]) {
        let now = chrono::Utc::now().timestamp_millis();
        self.mark_exercise_completed_at(exercise_id, level, topics, now);
    }

    /// Record `exercise_id` as completed at `completed_at` (epoch milliseconds).
    pub fn mark_exercise_completed_at(
        &mut self,
        exercise_id: &str,
        level: Level,
        topics: &[Topic],
        completed_at: i64,
    ) {
        let mut data = match self.load() {
            Ok(data) => data,
            Err(StorageError::UnsupportedVersion(version)) => {
                error!(
                    "Not recording completion of {}: stored data uses newer schema version {}",
                    exercise_id, version
                );
                return;
            }
            Err(e) => {
                warn!(
                    "Replacing unreadable completion data under {:?}: {}",
                    self.config.storage_key, e
                );
                CompletionData::new()
            }
        };
        let previous = data.insert(CompletionRecord {
            exercise_id: exercise_id.to_string(),
            completed_at,
            level,
            topics: topics.to_vec(),
        });
        debug!(
            "Marked {} completed at {} ({}; replaced: {})",
            exercise_id,
            level,
            TopicList(topics),
            previous.is_some()
        );

        if let Err(e) = self.save(&data) {
            error!("Failed to persist completion of {}: {}", exercise_id, e);
        }
    }

    /// Whether a completion record exists for `exercise_id`.
    pub fn is_exercise_completed(&self, exercise_id: &str) -> bool {
        self.get_completion_data().contains(exercise_id)
    }

    /// Remove every completion record.
    pub fn clear_completion_data(&mut self) {
        match self.backend.remove_item(&self.config.storage_key) {
            Ok(()) => debug!("Cleared completion data"),
            Err(e) => error!("Failed to clear completion data: {}", e),
        }
    }

    fn load(&self) -> Result<CompletionData> {
        match self.backend.get_item(&self.config.storage_key)? {
            Some(raw) => schema::decode(&raw),
            None => Ok(CompletionData::new()),
        }
    }

    fn save(&mut self, data: &CompletionData) -> Result<()> {
        let raw = schema::encode(data)?;
        self.backend.set_item(&self.config.storage_key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammatik_storage::{JsonFileStore, MemoryStore};

    /// Backend whose writes always fail.
    #[derive(Default)]
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(StorageError::Other("quota exceeded".to_string()))
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            Err(StorageError::Other("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_mark_then_is_completed() {
        let mut store = CompletionStore::new(MemoryStore::new());
        assert!(!store.is_exercise_completed("e1"));

        store.mark_exercise_completed("e1", Level::A1, &[Topic::Satzbau]);
        assert!(store.is_exercise_completed("e1"));
        assert!(!store.is_exercise_completed("e2"));
    }

    #[test]
    fn test_remark_replaces_record() {
        let mut store = CompletionStore::new(MemoryStore::new());
        store.mark_exercise_completed_at("e1", Level::A1, &[Topic::Satzbau, Topic::Verben], 10);
        store.mark_exercise_completed_at("e1", Level::A2, &[Topic::Nomen], 20);

        let data = store.get_completion_data();
        assert_eq!(data.len(), 1);
        let record = data.get("e1").unwrap();
        assert_eq!(record.completed_at, 20);
        assert_eq!(record.level, Level::A2);
        assert_eq!(record.topics, vec![Topic::Nomen]);
    }

    #[test]
    fn test_topics_kept_as_given() {
        let mut store = CompletionStore::new(MemoryStore::new());
        store.mark_exercise_completed_at("e1", Level::B1, &[Topic::Verben, Topic::Satzbau, Topic::Verben], 1);

        let data = store.get_completion_data();
        assert_eq!(
            data.get("e1").unwrap().topics,
            vec![Topic::Verben, Topic::Satzbau, Topic::Verben]
        );
    }

    #[test]
    fn test_mark_uses_current_time() {
        let before = chrono::Utc::now().timestamp_millis();
        let mut store = CompletionStore::new(MemoryStore::new());
        store.mark_exercise_completed("e1", Level::C1, &[]);
        let after = chrono::Utc::now().timestamp_millis();

        let completed_at = store.get_completion_data().get("e1").unwrap().completed_at;
        assert!(completed_at >= before && completed_at <= after);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut store = CompletionStore::new(MemoryStore::new());
        store.mark_exercise_completed("e1", Level::A1, &[Topic::Satzbau]);
        store.mark_exercise_completed("e2", Level::A1, &[Topic::Verben]);

        store.clear_completion_data();
        assert!(store.get_completion_data().is_empty());
        assert!(!store.is_exercise_completed("e1"));
        assert!(!store.is_exercise_completed("e2"));
    }

    #[test]
    fn test_corrupt_blob_reads_as_empty() {
        let mut backend = MemoryStore::new();
        backend.set_item("exerciseCompletion", "{not json").unwrap();
        let mut store = CompletionStore::new(backend);

        assert!(store.get_completion_data().is_empty());
        assert!(!store.is_exercise_completed("e1"));

        // Next write replaces the corrupt blob.
        store.mark_exercise_completed("e1", Level::A1, &[]);
        assert!(store.is_exercise_completed("e1"));
    }

    #[test]
    fn test_unexpected_shape_reads_as_empty() {
        let mut backend = MemoryStore::new();
        backend.set_item("exerciseCompletion", r#"["e1"]"#).unwrap();
        let store = CompletionStore::new(backend);
        assert!(store.get_completion_data().is_empty());
    }

    #[test]
    fn test_legacy_blob_is_upgraded_on_read() {
        let mut backend = MemoryStore::new();
        backend
            .set_item(
                "exerciseCompletion",
                r#"{"x1":{"completedAt":5,"level":"B2","topics":["verben"]}}"#,
            )
            .unwrap();
        let store = CompletionStore::new(backend);

        let data = store.get_completion_data();
        let record = data.get("x1").unwrap();
        assert_eq!(record.exercise_id, "x1");
        assert_eq!(record.level, Level::B2);
    }

    #[test]
    fn test_foreign_record_does_not_wipe_others_on_mark() {
        let mut backend = MemoryStore::new();
        backend
            .set_item(
                "exerciseCompletion",
                r#"{"version":1,"records":{
                    "a":{"exerciseId":"a","completedAt":1,"level":"a1","topics":["satzbau"]},
                    "b":{"exerciseId":"b","completedAt":2,"level":"a1","topics":["genitiv"]}
                }}"#,
            )
            .unwrap();
        let mut store = CompletionStore::new(backend);
        assert!(store.is_exercise_completed("a"));
        assert!(!store.is_exercise_completed("b"));

        store.mark_exercise_completed("c", Level::A1, &[Topic::Verben]);

        let data = store.get_completion_data();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("a").map(|r| r.completed_at), Some(1));
        assert!(data.contains("c"));
    }

    #[test]
    fn test_newer_schema_blob_is_left_alone() {
        let newer = r#"{"version":2,"records":{"a":{"exerciseId":"a","completedAt":1,"level":"a1","topics":["satzbau"]}}}"#;
        let mut backend = MemoryStore::new();
        backend.set_item("exerciseCompletion", newer).unwrap();
        let mut store = CompletionStore::new(backend);

        assert!(store.get_completion_data().is_empty());
        store.mark_exercise_completed("c", Level::A1, &[Topic::Verben]);

        assert!(!store.is_exercise_completed("c"));
        let backend = store.into_backend();
        assert_eq!(backend.get_item("exerciseCompletion").unwrap().as_deref(), Some(newer));
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut store = CompletionStore::new(ReadOnlyStore::default());
        store.mark_exercise_completed("e1", Level::A1, &[Topic::Satzbau]);
        store.clear_completion_data();

        // The write was lost; the store reports what is actually persisted.
        assert!(!store.is_exercise_completed("e1"));
    }

    #[test]
    fn test_custom_storage_key() {
        let config = TrackerConfig::default().with_storage_key("progress");
        let mut store = CompletionStore::with_config(MemoryStore::new(), config);
        store.mark_exercise_completed("e1", Level::A1, &[]);

        let backend = store.into_backend();
        assert!(backend.get_item("progress").unwrap().is_some());
        assert!(backend.get_item("exerciseCompletion").unwrap().is_none());
    }

    #[test]
    fn test_file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = CompletionStore::new(JsonFileStore::new(dir.path()).unwrap());
            store.mark_exercise_completed("e1", Level::B1, &[Topic::Artikel]);
        }

        let store = CompletionStore::new(JsonFileStore::new(dir.path()).unwrap());
        assert!(store.is_exercise_completed("e1"));
        assert_eq!(store.backend().root(), dir.path());
    }
}
