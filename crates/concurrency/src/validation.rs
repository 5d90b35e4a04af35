//! Transaction validation for optimistic commits
//!
//! Rules:
//! - First-committer-wins based on the READ-SET, not the write-set
//! - Blind writes (write without read) do NOT conflict
//! - A key read as absent is recorded with version 0; if another invocation
//!   creates it before we commit, that is a conflict

use ledger_core::Error;
use ledger_storage::MemoryStore;
use std::collections::HashMap;

/// A key whose version changed between read and commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadConflict {
    /// Encoded store key
    pub key: String,
    /// Version recorded in the read-set
    pub read_version: u64,
    /// Version in storage at validation time
    pub current_version: u64,
}

impl From<ReadConflict> for Error {
    fn from(c: ReadConflict) -> Self {
        Error::Conflict {
            key: c.key,
            read_version: c.read_version,
            current_version: c.current_version,
        }
    }
}

/// Result of transaction validation
///
/// A transaction commits only if `is_valid()` returns true.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// All conflicts detected during validation, sorted by key
    pub conflicts: Vec<ReadConflict>,
}

impl ValidationResult {
    /// Create a successful validation result (no conflicts)
    pub fn ok() -> Self {
        ValidationResult::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Get the number of conflicts
    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    /// Convert into `Ok(())` or the error for the first conflicting key
    pub fn into_result(self) -> ledger_core::Result<()> {
        match self.conflicts.into_iter().next() {
            None => Ok(()),
            Some(conflict) => Err(conflict.into()),
        }
    }
}

/// Validate the read-set against current storage state
///
/// For each key in `read_set`, compare the recorded version with the current
/// version in `store` (0 if absent) and report every mismatch.
pub fn validate_read_set(read_set: &HashMap<String, u64>, store: &MemoryStore) -> ValidationResult {
    let mut conflicts: Vec<ReadConflict> = read_set
        .iter()
        .filter_map(|(key, read_version)| {
            let current_version = store.version_of(key);
            (current_version != *read_version).then(|| ReadConflict {
                key: key.clone(),
                read_version: *read_version,
                current_version,
            })
        })
        .collect();

    // Deterministic reporting regardless of HashMap order
    conflicts.sort_by(|a, b| a.key.cmp(&b.key));
    ValidationResult { conflicts }
}
