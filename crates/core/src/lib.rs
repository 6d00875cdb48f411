//! Grammatik core data models.
//!
//! This crate defines the curriculum axes, catalog exercises, completion
//! records and progression results shared by the tracker crates.

#![warn(missing_docs)]

// Curriculum
mod curriculum;
mod exercise;

// Learner state
mod completion;
mod progression;

// Re-exports
pub use curriculum::{Level, Topic, TopicList, LEVEL_ORDER, TOPIC_ORDER, ParseLevelError, ParseTopicError};
pub use exercise::Exercise;
pub use completion::{CompletionRecord, CompletionData};
pub use progression::{ProgressionStatus, RecommendedProgression, TopicProgress, LevelSummary};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
