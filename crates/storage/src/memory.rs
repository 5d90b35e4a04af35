//! MemoryStore: versioned world state with BTreeMap and version management
//!
//! This module implements the Store trait using:
//! - `BTreeMap<String, StoredValue>` for ordered key storage
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` for monotonically increasing version numbers
//!
//! # Design Notes
//!
//! - **No version history**: each key keeps only its latest value
//! - **No deletes**: the ledger model never removes records
//! - **Version 0 means absent**: read-set validation records version 0 for
//!   keys that did not exist when read

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use ledger_core::{Result, Store};

use crate::stored_value::StoredValue;

/// Versioned in-memory storage backend
///
/// Thread-safe through `parking_lot::RwLock` and `AtomicU64`.
#[derive(Debug)]
pub struct MemoryStore {
    /// Ordered map from encoded store key to stored value
    data: RwLock<BTreeMap<String, StoredValue>>,
    /// Global version counter
    version: AtomicU64,
}

impl MemoryStore {
    /// Create a new empty store
    ///
    /// Initial version is 0 (no writes have occurred).
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
            version: AtomicU64::new(0),
        }
    }

    /// Get the stored value (bytes and version) for `key`
    pub fn get_versioned(&self, key: &str) -> Option<StoredValue> {
        self.data.read().get(key).cloned()
    }

    /// Current version of `key`, or 0 if the key is absent
    pub fn version_of(&self, key: &str) -> u64 {
        self.data.read().get(key).map_or(0, StoredValue::version)
    }

    /// Get current global version
    ///
    /// Returns the highest version assigned so far.
    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Allocate the next version atomically
    ///
    /// Versions are unique across all threads and increase monotonically
    /// (1, 2, 3, ...).
    pub fn next_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a batch of writes atomically
    ///
    /// Holds the write lock for the whole batch so no reader can observe a
    /// partially applied invocation. Every key receives `version`.
    pub fn apply_batch(&self, writes: &[(String, Vec<u8>)], version: u64) {
        let mut data = self.data.write();
        for (key, value) in writes {
            data.insert(key.clone(), StoredValue::new(value.clone(), version));
        }

        // Keep current_version() at least as high as any applied version
        self.version.fetch_max(version, Ordering::SeqCst);
        debug!(keys = writes.len(), version, "applied write batch");
    }

    /// Clone the current contents
    ///
    /// O(n) in the number of keys; intended for inspection and tests.
    pub fn snapshot(&self) -> BTreeMap<String, StoredValue> {
        self.data.read().clone()
    }

    /// Number of keys in the store
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// True if no key has been written
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .data
            .read()
            .get(key)
            .map(|sv| sv.value().to_vec()))
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        // Allocate under the write lock so a key's version never goes back
        let mut data = self.data.write();
        let version = self.next_version();
        data.insert(key.to_string(), StoredValue::new(value, version));
        Ok(())
    }
}
