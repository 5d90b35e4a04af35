//! Size limits for ledger keys and stored records
//!
//! Limits are enforced by the entity registries before anything reaches the
//! store. Violations surface as `Error::LimitExceeded`.
//!
//! Custom limits are supplied at invocation setup; there is no global default
//! that can be mutated at runtime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size limits for keys and encoded records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum length of a single key part in bytes (default: 1024)
    pub max_key_bytes: usize,

    /// Maximum number of key parts in a composite key (default: 16)
    pub max_key_parts: usize,

    /// Maximum encoded record size in bytes (default: 1MB)
    pub max_value_bytes_encoded: usize,

    /// Maximum nesting depth of record attributes (default: 64)
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_key_bytes: 1024,
            max_key_parts: 16,
            max_value_bytes_encoded: 1024 * 1024, // 1MB
            max_nesting_depth: 64,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    ///
    /// Lets unit tests exercise limit enforcement without building huge records.
    pub fn with_small_limits() -> Self {
        Limits {
            max_key_bytes: 32,
            max_key_parts: 4,
            max_value_bytes_encoded: 2000,
            max_nesting_depth: 8,
        }
    }

    /// Validate a key part length
    ///
    /// Only validates length. Character rules live in `key::validate_key_part`.
    pub fn validate_key_length(&self, part: &str) -> Result<(), LimitError> {
        let len = part.len();
        if len > self.max_key_bytes {
            return Err(LimitError::KeyTooLong {
                actual: len,
                max: self.max_key_bytes,
            });
        }
        Ok(())
    }

    /// Validate the number of parts in a composite key
    pub fn validate_key_parts(&self, count: usize) -> Result<(), LimitError> {
        if count > self.max_key_parts {
            return Err(LimitError::TooManyKeyParts {
                actual: count,
                max: self.max_key_parts,
            });
        }
        Ok(())
    }

    /// Validate the size of an encoded record
    pub fn validate_encoded_size(&self, bytes: &[u8]) -> Result<(), LimitError> {
        if bytes.len() > self.max_value_bytes_encoded {
            return Err(LimitError::ValueTooLarge {
                actual: bytes.len(),
                max: self.max_value_bytes_encoded,
            });
        }
        Ok(())
    }

    /// Validate the nesting depth of a record's attributes
    pub fn validate_value(&self, value: &serde_json::Value) -> Result<(), LimitError> {
        self.validate_value_impl(value, 0)
    }

    fn validate_value_impl(&self, value: &serde_json::Value, depth: usize) -> Result<(), LimitError> {
        if depth > self.max_nesting_depth {
            return Err(LimitError::NestingTooDeep {
                actual: depth,
                max: self.max_nesting_depth,
            });
        }

        match value {
            serde_json::Value::Array(arr) => {
                for v in arr {
                    self.validate_value_impl(v, depth + 1)?;
                }
                Ok(())
            }
            serde_json::Value::Object(obj) => {
                for v in obj.values() {
                    self.validate_value_impl(v, depth + 1)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Limit validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LimitError {
    /// Key part exceeds maximum length
    #[error("Key too long: {actual} bytes exceeds maximum {max}")]
    KeyTooLong {
        /// Actual key part length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Composite key has too many parts
    #[error("Too many key parts: {actual} exceeds maximum {max}")]
    TooManyKeyParts {
        /// Actual number of parts
        actual: usize,
        /// Maximum allowed parts
        max: usize,
    },

    /// Encoded record exceeds size limit
    #[error("Value too large: {actual} bytes exceeds maximum {max}")]
    ValueTooLarge {
        /// Actual encoded size
        actual: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Attribute nesting exceeds maximum depth
    #[error("Nesting too deep: {actual} levels exceeds maximum {max}")]
    NestingTooDeep {
        /// Actual nesting depth
        actual: usize,
        /// Maximum allowed depth
        max: usize,
    },
}

impl LimitError {
    /// Get the reason code reported to invocation callers
    pub fn reason_code(&self) -> &'static str {
        match self {
            LimitError::KeyTooLong { .. } => "key_too_long",
            LimitError::TooManyKeyParts { .. } => "too_many_key_parts",
            LimitError::ValueTooLarge { .. } => "value_too_large",
            LimitError::NestingTooDeep { .. } => "nesting_too_deep",
        }
    }
}
