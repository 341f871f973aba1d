//! Snapshot serialization
//!
//! Full structural dump/restore of the index as a single JSON value,
//! suitable for the external key-value store. The version tag guards
//! against restoring a snapshot written by an incompatible build.

use crate::manager::SearchIndex;
use serde::{Deserialize, Serialize};
use starsearch_core::{Result, SearchError};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct IndexSnapshot {
    version: u32,
    index: SearchIndex,
}

/// Dump the whole index to one JSON value.
pub fn to_value(index: &SearchIndex) -> Result<serde_json::Value> {
    let snapshot = IndexSnapshot {
        version: SNAPSHOT_VERSION,
        index: index.clone(),
    };
    Ok(serde_json::to_value(&snapshot)?)
}

/// Rebuild an index from a snapshot value.
pub fn from_value(value: serde_json::Value) -> Result<SearchIndex> {
    let snapshot: IndexSnapshot = serde_json::from_value(value)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SearchError::Internal(format!(
            "unsupported snapshot version {} (expected {})",
            snapshot.version, SNAPSHOT_VERSION
        )));
    }
    Ok(snapshot.index)
}
