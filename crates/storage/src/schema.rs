//! Versioned layout of the persisted completion blob.
//!
//! Current layout (version 1):
//!
//! ```json
//! { "version": 1, "records": { "<exerciseId>": { "exerciseId": "...", "completedAt": 0, "level": "a1", "topics": ["verben"] } } }
//! ```
//!
//! Version 0 is the unversioned legacy layout: the bare record mapping, with
//! records keyed by exercise id and not necessarily carrying `exerciseId`.
//! Older blobs are upgraded one version at a time; blobs from a newer schema
//! are rejected. Records are converted one by one: a record that no longer
//! fits the current types is dropped without affecting the others.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use grammatik_core::{CompletionData, CompletionRecord};
use tracing::{debug, warn};
use super::{StorageError, Result};

/// Version written by [`encode`].
pub const CURRENT_VERSION: u64 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u64,
    records: &'a CompletionData,
}

#[derive(Deserialize)]
struct Envelope {
    records: Map<String, Value>,
}

/// Serialize completion data at [`CURRENT_VERSION`].
pub fn encode(data: &CompletionData) -> Result<String> {
    Ok(serde_json::to_string(&EnvelopeRef {
        version: CURRENT_VERSION,
        records: data,
    })?)
}

/// Parse a persisted blob of any supported version.
pub fn decode(raw: &str) -> Result<CompletionData> {
    let value: Value = serde_json::from_str(raw)?;
    let version = detect_version(&value);
    let upgraded = upgrade(version, value)?;
    let envelope: Envelope = serde_json::from_value(upgraded)?;
    Ok(decode_records(envelope.records))
}

fn decode_records(records: Map<String, Value>) -> CompletionData {
    let mut data = CompletionData::new();
    for (id, value) in records {
        match serde_json::from_value::<CompletionRecord>(value) {
            Ok(mut record) => {
                record.exercise_id = id;
                data.insert(record);
            }
            Err(e) => warn!("Dropping unreadable completion record {:?}: {}", id, e),
        }
    }
    data
}

/// Schema version of a parsed blob. Anything without a version envelope is 0.
pub fn detect_version(value: &Value) -> u64 {
    let Some(obj) = value.as_object() else {
        return 0;
    };
    match (obj.get("version").and_then(Value::as_u64), obj.get("records")) {
        (Some(version), Some(_)) => version,
        _ => 0,
    }
}

/// Bring `value` from `version` up to [`CURRENT_VERSION`].
pub fn upgrade(version: u64, mut value: Value) -> Result<Value> {
    if version > CURRENT_VERSION {
        return Err(StorageError::UnsupportedVersion(version));
    }

    let mut current = version;
    while current < CURRENT_VERSION {
        value = match current {
            0 => upgrade_v0_to_v1(value)?,
            other => return Err(StorageError::UnsupportedVersion(other)),
        };
        current += 1;
        debug!("Upgraded completion blob to version {}", current);
    }
    Ok(value)
}

/// Wrap the legacy bare mapping in a version 1 envelope.
///
/// Each record gets `exerciseId` filled from its key when missing. Records
/// that are not objects are carried over untouched and dropped on decode.
pub fn upgrade_v0_to_v1(value: Value) -> Result<Value> {
    let Value::Object(mut records) = value else {
        return Err(StorageError::Other(
            "Legacy completion data is not an object".to_string(),
        ));
    };

    for (id, record) in records.iter_mut() {
        if let Some(fields) = record.as_object_mut() {
            fields
                .entry("exerciseId")
                .or_insert_with(|| Value::String(id.clone()));
        }
    }

    Ok(serde_json::json!({
        "version": 1,
        "records": Value::Object(records),
    }))
}
