//! Storage abstraction and implementations for Grammatik.
//!
//! This crate provides a key-value storage interface with a JSON file
//! implementation, an in-memory implementation, and the versioned schema of
//! the persisted completion blob.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;
pub mod schema;

pub use trait_::{KeyValueStore, StorageError, Result};
pub use json_storage::JsonFileStore;
pub use memory::MemoryStore;
