//! Storage trait for snapshot and history persistence
//!
//! The core never touches disk or IndexedDB itself; embedders hand it a
//! `SnapshotStore` and the index/history components read and write keyed
//! JSON records through it.

use crate::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Keyed JSON record store
///
/// Implementations must be safe to share across threads; the engine may
/// call `get` concurrently with other reads.
pub trait SnapshotStore: Send + Sync {
    /// Store a record under a key, replacing any previous value.
    fn put(&self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Fetch a record, `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Delete a record. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory `SnapshotStore` for tests and ephemeral embedders
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn put(&self, key: &str, value: serde_json::Value) -> Result<()> {
        self.records.write().insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.records.read().get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.records.write().remove(key);
        Ok(())
    }
}
