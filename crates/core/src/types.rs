//! Core types for the entity ledger
//!
//! This module defines the foundational key types:
//! - Namespace: prefix scoping all keys of one entity kind
//! - LedgerKey: composite key (namespace + ordered key parts)

use crate::key::{validate_key_part_with_limits, validate_namespace, KeyError, KEY_DELIMITER};
use crate::limits::Limits;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to a class id to derive its registry namespace
pub const NAMESPACE_SUFFIX: &str = "list";

/// Prefix scoping every key of one entity kind
///
/// Different entity kinds share one underlying keyspace; the namespace keeps
/// a user `1234` and a course `1234` apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace, validating its characters
    pub fn new(name: impl Into<String>) -> Result<Self, KeyError> {
        let name = name.into();
        validate_namespace(&name)?;
        Ok(Self(name))
    }

    /// Namespace of the registry bound to `class_id`
    ///
    /// `org.upgrad-network.edtech.participants.user` maps to
    /// `org.upgrad-network.edtech.participants.userlist`.
    pub fn for_class(class_id: &str) -> Result<Self, KeyError> {
        Self::new(format!("{class_id}{NAMESPACE_SUFFIX}"))
    }

    /// Namespace as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Namespace {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> Self {
        ns.0
    }
}

/// Composite ledger key: namespace followed by ordered key parts
///
/// Encoded as `\0<namespace>\0<part1>\0<part2>\0`. Since no segment may
/// contain the delimiter, distinct `(namespace, parts)` pairs always encode to
/// distinct strings.
///
/// # Examples
///
/// ```
/// use ledger_core::{LedgerKey, Namespace};
///
/// let ns = Namespace::new("org.example.userlist").unwrap();
/// let key = LedgerKey::new(ns, ["1234"]).unwrap();
/// assert_eq!(key.encode(), "\u{0}org.example.userlist\u{0}1234\u{0}");
/// assert_eq!(key.to_string(), "org.example.userlist:1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LedgerKey {
    namespace: Namespace,
    parts: Vec<String>,
}

impl LedgerKey {
    /// Create a composite key using default limits
    pub fn new<I, P>(namespace: Namespace, parts: I) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self::with_limits(namespace, parts, &Limits::default())
    }

    /// Create a composite key with custom limits
    pub fn with_limits<I, P>(namespace: Namespace, parts: I, limits: &Limits) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let parts: Vec<String> = parts.into_iter().map(Into::into).collect();
        if parts.is_empty() {
            return Err(KeyError::NoParts);
        }
        limits.validate_key_parts(parts.len())?;
        for part in &parts {
            validate_key_part_with_limits(part, limits)?;
        }
        Ok(Self { namespace, parts })
    }

    /// Namespace of this key
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Ordered key parts
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Encode into the store key string
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(
            self.namespace.as_str().len()
                + self.parts.iter().map(|p| p.len() + 1).sum::<usize>()
                + 2,
        );
        out.push(KEY_DELIMITER);
        out.push_str(self.namespace.as_str());
        out.push(KEY_DELIMITER);
        for part in &self.parts {
            out.push_str(part);
            out.push(KEY_DELIMITER);
        }
        out
    }

    /// Decode a store key string produced by [`LedgerKey::encode`]
    pub fn decode(encoded: &str) -> Result<Self, KeyError> {
        let body = encoded
            .strip_prefix(KEY_DELIMITER)
            .and_then(|rest| rest.strip_suffix(KEY_DELIMITER))
            .ok_or_else(|| KeyError::Malformed("missing delimiters".to_string()))?;

        let mut segments = body.split(KEY_DELIMITER);
        let namespace = segments
            .next()
            .ok_or_else(|| KeyError::Malformed("missing namespace".to_string()))?;
        let namespace = Namespace::new(namespace)?;
        let parts: Vec<&str> = segments.collect();

        // Length limits are a write-time concern; decoding only checks shape.
        let unbounded = Limits {
            max_key_bytes: usize::MAX,
            max_key_parts: usize::MAX,
            ..Limits::default()
        };
        Self::with_limits(namespace, parts, &unbounded)
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.namespace)?;
        for part in &self.parts {
            write!(f, ":{part}")?;
        }
        Ok(())
    }
}
