//! The store boundary consumed by the entity layer
//!
//! The host ledger exposes its world state as an opaque key-value store with
//! `get` and `put`. Durability, versioning and commit atomicity belong to the
//! host; implementations of this trait only have to honor the read/write
//! contract for the duration of one invocation.

use crate::error::Result;

/// Key-value store handle for one invocation
///
/// Keys are opaque strings and values opaque bytes chosen by the caller.
/// Methods take `&self` so several registries can share one handle;
/// implementations that buffer writes use interior mutability.
///
/// Thread safety: implementations must be `Send + Sync`.
///
/// # Examples
///
/// ```
/// use ledger_core::traits::Store;
/// // Implementations live in ledger-storage and ledger-concurrency
/// ```
pub trait Store: Send + Sync {
    /// Get the current value for `key`
    ///
    /// Returns `None` if the key does not exist. An absent key is not an
    /// error at this level.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreFailure` if the underlying ledger I/O fails.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreFailure` if the underlying ledger I/O fails.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;
}

impl<S: Store + ?Sized> Store for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).put(key, value)
    }
}

impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).put(key, value)
    }
}
