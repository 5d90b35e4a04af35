//! Per-invocation transaction context
//!
//! A `TransactionContext` is the store handle one invocation runs against.
//! Reads go to the world state and are tracked in a read-set; writes are
//! buffered in a write-set and become visible to others only at commit.
//!
//! Reads are repeatable: the first read of a key pins both its bytes and its
//! version, and every later read of that key returns the pinned bytes. A
//! commit by another invocation in between therefore shows up as a stale
//! read-set entry at validation instead of leaking into this invocation.
//!
//! # Lifecycle
//!
//! 1. **BEGIN**: `TransactionManager::begin()`, status is `Active`
//! 2. **READ/WRITE**: through the [`Store`] trait
//! 3. **COMMIT/ABORT**: `TransactionManager::commit()` or `abort()`
//!
//! Dropping an uncommitted context discards its writes.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;

use ledger_core::{Error, Result, Store};
use ledger_storage::MemoryStore;

/// Status of a transaction in its lifecycle
///
/// Terminal states (no transitions allowed): `Committed`, `Aborted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Transaction is executing, can read/write
    Active,
    /// Transaction committed successfully
    Committed {
        /// Version assigned to the transaction's writes
        version: u64,
    },
    /// Transaction was aborted
    Aborted {
        /// Human-readable reason for abort
        reason: String,
    },
}

#[derive(Debug)]
struct TxnState {
    /// Keys read and their versions; version 0 means absent when read
    read_set: HashMap<String, u64>,
    /// Bytes seen at the first read of each key in `read_set`
    read_values: HashMap<String, Option<Vec<u8>>>,
    /// Buffered writes, latest value wins
    write_set: BTreeMap<String, Vec<u8>>,
    status: TransactionStatus,
}

/// Store handle for one invocation
///
/// Interior mutability lets several registries share `&TransactionContext`.
#[derive(Debug)]
pub struct TransactionContext {
    /// Unique transaction ID
    pub txn_id: u64,
    /// World-state version when the transaction began
    pub start_version: u64,
    store: Arc<MemoryStore>,
    state: Mutex<TxnState>,
}

impl TransactionContext {
    /// Create a new active transaction over `store`
    ///
    /// Normally called through `TransactionManager::begin()`.
    pub fn new(txn_id: u64, store: Arc<MemoryStore>) -> Self {
        TransactionContext {
            txn_id,
            start_version: store.current_version(),
            store,
            state: Mutex::new(TxnState {
                read_set: HashMap::new(),
                read_values: HashMap::new(),
                write_set: BTreeMap::new(),
                status: TransactionStatus::Active,
            }),
        }
    }

    /// Current status
    pub fn status(&self) -> TransactionStatus {
        self.state.lock().status.clone()
    }

    /// True while reads and writes are accepted
    pub fn is_active(&self) -> bool {
        matches!(self.state.lock().status, TransactionStatus::Active)
    }

    /// Version recorded for `key` in the read-set, if it was read
    pub fn read_version(&self, key: &str) -> Option<u64> {
        self.state.lock().read_set.get(key).copied()
    }

    /// Copy of the read-set
    pub fn read_set(&self) -> HashMap<String, u64> {
        self.state.lock().read_set.clone()
    }

    /// Buffered writes in key order
    pub fn pending_writes(&self) -> Vec<(String, Vec<u8>)> {
        self.state
            .lock()
            .write_set
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of buffered writes
    pub fn pending_count(&self) -> usize {
        self.state.lock().write_set.len()
    }

    /// Underlying world state
    pub(crate) fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Transition Active → Committed
    pub(crate) fn mark_committed(&self, version: u64) -> Result<()> {
        let mut state = self.state.lock();
        ensure_active(&state.status)?;
        state.status = TransactionStatus::Committed { version };
        Ok(())
    }

    /// Transition Active → Aborted, discarding buffered writes
    pub(crate) fn mark_aborted(&self, reason: String) -> Result<()> {
        let mut state = self.state.lock();
        ensure_active(&state.status)?;
        state.write_set.clear();
        state.status = TransactionStatus::Aborted { reason };
        Ok(())
    }
}

fn ensure_active(status: &TransactionStatus) -> Result<()> {
    match status {
        TransactionStatus::Active => Ok(()),
        other => Err(Error::StoreFailure(format!(
            "transaction is not active: {other:?}"
        ))),
    }
}

impl Store for TransactionContext {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut state = self.state.lock();
        ensure_active(&state.status)?;

        // Read-your-writes; no read-set entry for our own uncommitted data
        if let Some(value) = state.write_set.get(key) {
            return Ok(Some(value.clone()));
        }

        if let Some(value) = state.read_values.get(key) {
            return Ok(value.clone());
        }

        let (version, value) = match self.store.get_versioned(key) {
            Some(sv) => (sv.version(), Some(sv.into_value())),
            None => (0, None),
        };
        state.read_set.insert(key.to_string(), version);
        state.read_values.insert(key.to_string(), value.clone());
        Ok(value)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut state = self.state.lock();
        ensure_active(&state.status)?;
        state.write_set.insert(key.to_string(), value);
        Ok(())
    }
}
