//! Error types for the entity ledger
//!
//! Every failure an invocation can hit is one variant of [`Error`]. The layer
//! never recovers from any of them: they propagate to the invocation caller,
//! which discards the invocation's pending writes.
//!
//! We use `thiserror` for `Display` and `Error` trait implementations.

use crate::key::KeyError;
use crate::limits::LimitError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the entity ledger
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Existence | `NotFound`, `DuplicateKey`, `NotFoundOnUpdate` | Record presence |
/// | Data | `Serialization` | Stored bytes cannot be decoded |
/// | Validation | `InvalidKey`, `InvalidArgument`, `LimitExceeded` | Bad input |
/// | System | `StoreFailure`, `Conflict` | Host failures and aborted commits |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Requested key is absent
    ///
    /// Recoverable: callers check for it explicitly ("create if not found").
    #[error("Key not found: {key}")]
    NotFound {
        /// Display form of the missing key
        key: String,
    },

    /// `add` called for a key that already exists
    #[error("Duplicate key: {key} already exists")]
    DuplicateKey {
        /// Display form of the existing key
        key: String,
    },

    /// `update` called for a key that does not exist
    #[error("Cannot update {key}: record does not exist")]
    NotFoundOnUpdate {
        /// Display form of the missing key
        key: String,
    },

    /// Stored bytes cannot be parsed or carry an unknown discriminator
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Key failed validation
    #[error("Invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    /// Invocation arguments are invalid
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Record exceeds a configured limit
    #[error("Limit exceeded: {0}")]
    LimitExceeded(#[from] LimitError),

    /// Underlying ledger I/O failed
    #[error("Store failure: {0}")]
    StoreFailure(String),

    /// Commit aborted: a key read by the invocation changed underneath it
    #[error("Transaction conflict on {key}: read version {read_version}, current version {current_version}")]
    Conflict {
        /// Encoded store key that changed
        key: String,
        /// Version observed when the invocation read the key
        read_version: u64,
        /// Version found at commit time
        current_version: u64,
    },
}

/// Stable, machine-readable error kind
///
/// Surfaced to invocation callers alongside the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// See [`Error::NotFound`]
    NotFound,
    /// See [`Error::DuplicateKey`]
    DuplicateKey,
    /// See [`Error::NotFoundOnUpdate`]
    NotFoundOnUpdate,
    /// See [`Error::Serialization`]
    Serialization,
    /// See [`Error::InvalidKey`]
    InvalidKey,
    /// See [`Error::InvalidArgument`]
    InvalidArgument,
    /// See [`Error::LimitExceeded`]
    LimitExceeded,
    /// See [`Error::StoreFailure`]
    StoreFailure,
    /// See [`Error::Conflict`]
    Conflict,
}

impl ErrorKind {
    /// Code string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::DuplicateKey => "DUPLICATE_KEY",
            ErrorKind::NotFoundOnUpdate => "NOT_FOUND_ON_UPDATE",
            ErrorKind::Serialization => "SERIALIZATION",
            ErrorKind::InvalidKey => "INVALID_KEY",
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::LimitExceeded => "LIMIT_EXCEEDED",
            ErrorKind::StoreFailure => "STORE_FAILURE",
            ErrorKind::Conflict => "CONFLICT",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            Error::NotFoundOnUpdate { .. } => ErrorKind::NotFoundOnUpdate,
            Error::Serialization(_) => ErrorKind::Serialization,
            Error::InvalidKey(_) => ErrorKind::InvalidKey,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::LimitExceeded(_) => ErrorKind::LimitExceeded,
            Error::StoreFailure(_) => ErrorKind::StoreFailure,
            Error::Conflict { .. } => ErrorKind::Conflict,
        }
    }

    /// True if this is the recoverable "key absent" signal
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
