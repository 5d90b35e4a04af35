//! Storage-layer value wrapper
//!
//! The store boundary only deals in bytes. Versions are a storage concern used
//! for read-set validation, so they live here rather than in the core types.

/// Record bytes plus the version of the write that produced them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    value: Vec<u8>,
    version: u64,
}

impl StoredValue {
    /// Create a new stored value
    pub fn new(value: Vec<u8>, version: u64) -> Self {
        StoredValue { value, version }
    }

    /// Get the value bytes
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Get the version
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Consume and return the value bytes
    #[inline]
    pub fn into_value(self) -> Vec<u8> {
        self.value
    }
}
