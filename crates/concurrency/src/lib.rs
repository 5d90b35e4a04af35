//! Concurrency layer for the entity ledger
//!
//! This crate models the host ledger's commit protocol for one node:
//! - TransactionContext: per-invocation store handle with read/write set tracking
//! - Conflict detection at commit time (first committer wins)
//! - TransactionManager: atomic validate-and-apply, or discard
//!
//! The entity layer above only sees [`ledger_core::Store`]; it never learns
//! whether its writes are buffered.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod manager;
pub mod transaction;
pub mod validation;

pub use manager::TransactionManager;
pub use transaction::{TransactionContext, TransactionStatus};
pub use validation::{validate_read_set, ReadConflict, ValidationResult};
