//! Exercise model - read-only catalog entries supplied by the content layer.

use serde::{Deserialize, Serialize};
use crate::curriculum::{Level, Topic};

/// An exercise from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Opaque identifier
    pub id: String,

    /// Level the exercise belongs to
    pub level: Level,

    /// Grammar topics the exercise is tagged with
    #[serde(default)]
    pub grammar_ui_topics: Vec<Topic>,
}

impl Exercise {
    /// Create a new exercise.
    pub fn new(id: impl Into<String>, level: Level, topics: impl Into<Vec<Topic>>) -> Self {
        Self {
            id: id.into(),
            level,
            grammar_ui_topics: topics.into(),
        }
    }

    /// Whether the exercise is tagged with `topic`.
    pub fn has_topic(&self, topic: Topic) -> bool {
        self.grammar_ui_topics.contains(&topic)
    }
}
