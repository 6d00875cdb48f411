//! Progress Tracking
//!
//! Exercise completion store and curriculum progression queries.

#![warn(missing_docs)]

pub mod config;
pub mod store;
pub mod engine;

pub use config::{TrackerConfig, DEFAULT_STORAGE_KEY};
pub use store::CompletionStore;
pub use engine::{get_next_level, ProgressionEngine};
