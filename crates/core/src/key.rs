//! Key validation for ledger keys
//!
//! Composite keys are built from a namespace and an ordered list of key parts
//! joined with a reserved delimiter. Validation here is what keeps that
//! encoding injective.
//!
//! ## Rules
//!
//! - Key parts and namespaces must not be empty
//! - They must not contain the delimiter (U+0000)
//! - They must not contain U+10FFFF, which hosts reserve for range ends
//! - Key parts must not exceed `max_key_bytes` (default: 1024)
//! - A composite key has between 1 and `max_key_parts` parts

use crate::limits::{LimitError, Limits};
use thiserror::Error;

/// Delimiter joining the namespace and key parts of a composite key
pub const KEY_DELIMITER: char = '\u{0}';

/// Highest Unicode scalar; reserved by hosts as an open range bound
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// Validate a key part using default limits
///
/// # Examples
///
/// ```
/// use ledger_core::key::validate_key_part;
///
/// assert!(validate_key_part("1234").is_ok());
/// assert!(validate_key_part("user:123").is_ok());
///
/// assert!(validate_key_part("").is_err()); // empty
/// assert!(validate_key_part("a\u{0}b").is_err()); // contains delimiter
/// ```
pub fn validate_key_part(part: &str) -> Result<(), KeyError> {
    validate_key_part_with_limits(part, &Limits::default())
}

/// Validate a key part with custom limits
pub fn validate_key_part_with_limits(part: &str, limits: &Limits) -> Result<(), KeyError> {
    validate_segment(part)?;
    limits.validate_key_length(part)?;
    Ok(())
}

/// Validate a namespace
///
/// Namespaces follow the same character rules as key parts but are not
/// subject to the key part length limit.
pub fn validate_namespace(namespace: &str) -> Result<(), KeyError> {
    validate_segment(namespace)
}

fn validate_segment(segment: &str) -> Result<(), KeyError> {
    if segment.is_empty() {
        return Err(KeyError::Empty);
    }

    if let Some(c) = segment
        .chars()
        .find(|c| *c == KEY_DELIMITER || *c == MAX_UNICODE_RUNE)
    {
        return Err(KeyError::ReservedCharacter(c));
    }

    Ok(())
}

/// Key validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Key part or namespace is empty
    #[error("Key part cannot be empty")]
    Empty,

    /// Composite key has no parts
    #[error("Composite key needs at least one part")]
    NoParts,

    /// Key part or namespace contains a reserved character
    #[error("Key part cannot contain reserved character U+{:04X}", u32::from(*.0))]
    ReservedCharacter(char),

    /// Encoded key is not a well-formed composite key
    #[error("Malformed composite key: {0}")]
    Malformed(String),

    /// Key exceeds a configured limit
    #[error(transparent)]
    Limit(#[from] LimitError),
}

impl KeyError {
    /// Get the reason code reported to invocation callers
    pub fn reason_code(&self) -> &'static str {
        match self {
            KeyError::Empty => "empty_key",
            KeyError::NoParts => "no_key_parts",
            KeyError::ReservedCharacter(_) => "reserved_character",
            KeyError::Malformed(_) => "malformed_key",
            KeyError::Limit(e) => e.reason_code(),
        }
    }
}
