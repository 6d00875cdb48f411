//! Progression results - what the learner should work on next.

use serde::{Deserialize, Serialize};
use crate::curriculum::{Level, Topic};

/// Result of evaluating a learner's current (level, topic) position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionStatus {
    /// Current topic is done and a later incomplete topic exists
    pub should_advance_topic: bool,

    /// Set only when `should_advance_topic`
    pub next_topic: Option<Topic>,

    /// Every topic of the level is done and a later level exists
    pub should_advance_level: bool,

    /// Set only when `should_advance_level`
    pub next_level: Option<Level>,
}

/// Resume point for a learner without an explicit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedProgression {
    /// Level to work on
    pub level: Level,

    /// Topic to work on
    pub topic: Topic,
}

impl RecommendedProgression {
    /// Recommendation once every level and topic is complete.
    pub fn terminal() -> Self {
        Self {
            level: Level::last(),
            topic: Topic::last(),
        }
    }
}

/// Completion counts for one (level, topic) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicProgress {
    /// Level
    pub level: Level,

    /// Topic
    pub topic: Topic,

    /// Completed exercises tagged with the topic
    pub completed: usize,

    /// Known exercises tagged with the topic
    pub total: usize,
}

impl TopicProgress {
    /// A topic with no known exercises counts as complete.
    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }

    /// Percentage complete (0-100). Empty topics report 100.
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            100.0
        } else {
            (self.completed as f32 / self.total as f32) * 100.0
        }
    }
}

/// Per-topic progress for a whole level, in topic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    /// Level
    pub level: Level,

    /// One entry per topic
    pub topics: Vec<TopicProgress>,
}

impl LevelSummary {
    /// True when every topic of the level is complete.
    pub fn is_complete(&self) -> bool {
        self.topics.iter().all(TopicProgress::is_complete)
    }

    /// Completed and total exercise counts across the level's topics.
    ///
    /// Exercises tagged with several topics are counted once per topic.
    pub fn totals(&self) -> (usize, usize) {
        self.topics
            .iter()
            .fold((0, 0), |(c, t), p| (c + p.completed, t + p.total))
    }
}
