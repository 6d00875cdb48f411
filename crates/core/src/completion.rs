//! Completion records - persisted evidence that an exercise was finished.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::curriculum::{Level, Topic};
use crate::Time;

/// One completed exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    /// Exercise identifier (also the map key)
    pub exercise_id: String,

    /// Completion time in epoch milliseconds
    pub completed_at: i64,

    /// Level the exercise was completed at
    pub level: Level,

    /// Topics as given when the exercise was marked; not deduplicated
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl CompletionRecord {
    /// Completion time as a UTC timestamp, if representable.
    pub fn completed_at_time(&self) -> Option<Time> {
        chrono::DateTime::<chrono::Utc>::from_timestamp_millis(self.completed_at)
    }

    /// Whether the record is tagged with `topic`.
    pub fn has_topic(&self, topic: Topic) -> bool {
        self.topics.contains(&topic)
    }
}

/// Mapping from exercise id to its completion record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionData(BTreeMap<String, CompletionRecord>);

impl CompletionData {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record keyed by its exercise id.
    pub fn insert(&mut self, record: CompletionRecord) -> Option<CompletionRecord> {
        self.0.insert(record.exercise_id.clone(), record)
    }

    /// Look up a record.
    pub fn get(&self, exercise_id: &str) -> Option<&CompletionRecord> {
        self.0.get(exercise_id)
    }

    /// Whether a record exists for `exercise_id`.
    pub fn contains(&self, exercise_id: &str) -> bool {
        self.0.contains_key(exercise_id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no exercise has been completed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Records ordered by exercise id.
    pub fn iter(&self) -> impl Iterator<Item = &CompletionRecord> {
        self.0.values()
    }
}

impl FromIterator<CompletionRecord> for CompletionData {
    fn from_iter<I: IntoIterator<Item = CompletionRecord>>(iter: I) -> Self {
        let mut data = Self::new();
        for record in iter {
            data.insert(record);
        }
        data
    }
}
