//! Storage layer for the entity ledger
//!
//! This crate implements the world state that stands in for the host ledger:
//! - MemoryStore: BTreeMap-based versioned storage behind a RwLock
//! - StoredValue: record bytes plus the version that last wrote them
//! - Version management with AtomicU64
//!
//! `MemoryStore` implements [`ledger_core::Store`] directly (each `put` is its
//! own commit). Invocations that need all-or-nothing semantics go through
//! `ledger-concurrency`, which buffers writes and applies them with
//! [`MemoryStore::apply_batch`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod stored_value;

pub use memory::MemoryStore;
pub use stored_value::StoredValue;
