//! Core types and traits for the entity ledger
//!
//! This crate defines the foundational types used throughout the system:
//! - Namespace: key prefix scoping one entity kind
//! - LedgerKey: composite key (namespace + ordered key parts)
//! - Limits: configurable key and record size limits
//! - Error: error type hierarchy with stable kinds
//! - Store: the key-value boundary provided by the host ledger

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod limits;
pub mod traits;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use key::{KeyError, KEY_DELIMITER};
pub use limits::{LimitError, Limits};
pub use traits::Store;
pub use types::{LedgerKey, Namespace};
