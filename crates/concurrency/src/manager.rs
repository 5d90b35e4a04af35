//! Transaction manager for coordinating commit operations
//!
//! Provides atomic commit by orchestrating:
//! 1. Validation (first-committer-wins)
//! 2. Storage application (visibility)
//!
//! Invariant: all-or-nothing commit. A transaction's writes either all become
//! visible under one version, or none do.
//!
//! ## Commit Sequence
//!
//! ```text
//! 1. Acquire commit lock
//! 2. validate_read_set() - check for conflicts
//! 3. IF conflicts: mark aborted and return Error::Conflict
//! 4. IF no writes: mark committed at the current version
//! 5. Allocate commit version, apply_batch() to storage
//! 6. Mark committed, return commit version
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use ledger_core::Result;
use ledger_storage::MemoryStore;

use crate::transaction::TransactionContext;
use crate::validation::validate_read_set;

/// Manages transaction lifecycle and atomic commits
///
/// All keys written by one transaction get the same commit version.
#[derive(Debug)]
pub struct TransactionManager {
    store: Arc<MemoryStore>,
    /// Serializes validate-and-apply across committers
    commit_lock: Mutex<()>,
    next_txn_id: AtomicU64,
}

impl TransactionManager {
    /// Create a manager over `store`
    pub fn new(store: Arc<MemoryStore>) -> Self {
        TransactionManager {
            store,
            commit_lock: Mutex::new(()),
            next_txn_id: AtomicU64::new(1),
        }
    }

    /// World state this manager commits into
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Begin a new transaction
    pub fn begin(&self) -> TransactionContext {
        let txn_id = self.next_txn_id.fetch_add(1, Ordering::SeqCst);
        TransactionContext::new(txn_id, Arc::clone(&self.store))
    }

    /// Commit a transaction atomically
    ///
    /// # Returns
    /// - `Ok(commit_version)` on success; read-only transactions return the
    ///   current version without allocating a new one
    /// - `Err(Error::Conflict)` if a key read by the transaction changed
    /// - `Err(Error::StoreFailure)` if the transaction is not active or belongs
    ///   to a different store
    pub fn commit(&self, txn: &TransactionContext) -> Result<u64> {
        if !Arc::ptr_eq(txn.store(), &self.store) {
            return Err(ledger_core::Error::StoreFailure(
                "transaction belongs to a different store".to_string(),
            ));
        }

        let _guard = self.commit_lock.lock();

        let validation = validate_read_set(&txn.read_set(), &self.store);
        if let Err(e) = validation.into_result() {
            warn!(txn_id = txn.txn_id, error = %e, "transaction aborted on commit");
            txn.mark_aborted(e.to_string())?;
            return Err(e);
        }

        let writes = txn.pending_writes();
        if writes.is_empty() {
            let version = self.store.current_version();
            txn.mark_committed(version)?;
            return Ok(version);
        }

        let version = self.store.next_version();
        txn.mark_committed(version)?;
        self.store.apply_batch(&writes, version);
        info!(
            txn_id = txn.txn_id,
            version,
            writes = writes.len(),
            "transaction committed"
        );
        Ok(version)
    }

    /// Explicitly abort a transaction
    ///
    /// All buffered writes are discarded.
    pub fn abort(&self, txn: &TransactionContext, reason: impl Into<String>) -> Result<()> {
        let reason = reason.into();
        warn!(txn_id = txn.txn_id, %reason, "transaction aborted");
        txn.mark_aborted(reason)
    }
}
