//! Canonical record encoding
//!
//! Every stored record is a UTF-8 JSON object with exactly four fields:
//!
//! ```text
//! {"class":"<class id>","data":{...attributes...},"key":["<part>",...],"schema":1}
//! ```
//!
//! Object keys are emitted in sorted order at every level, so two equal
//! entities always encode to identical bytes. Decoding is strict: unknown or
//! missing fields, a different class or schema, and a `key` that disagrees
//! with the decoded attributes are all `Error::Serialization`.

use ledger_core::{Error, Limits, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::Entity;

/// Current record schema version
pub const RECORD_SCHEMA_VERSION: u32 = 1;

/// Parsed but not yet typed record
///
/// Produced by [`RecordEnvelope::parse`] so the class discriminator can be
/// inspected before choosing a decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordEnvelope {
    class: String,
    data: Value,
    key: Vec<String>,
    schema: u32,
}

impl RecordEnvelope {
    /// Parse the envelope of a stored record
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::Serialization(format!("malformed record: {e}")))
    }

    /// Class discriminator
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Key parts recorded alongside the attributes
    pub fn key(&self) -> &[String] {
        &self.key
    }

    /// Schema version the record was written with
    pub fn schema(&self) -> u32 {
        self.schema
    }

    /// Decode the attributes as entity `E`
    ///
    /// Checks class, schema and key consistency before returning.
    pub fn into_entity<E: Entity>(self) -> Result<E> {
        if self.class != E::CLASS_ID {
            return Err(Error::Serialization(format!(
                "class mismatch: expected {}, found {}",
                E::CLASS_ID,
                self.class
            )));
        }
        if self.schema != E::SCHEMA_VERSION {
            return Err(Error::Serialization(format!(
                "unsupported schema version {} for {} (expected {})",
                self.schema,
                E::CLASS_ID,
                E::SCHEMA_VERSION
            )));
        }

        let entity: E = serde_json::from_value(self.data)?;
        if entity.key_parts() != self.key {
            return Err(Error::Serialization(format!(
                "record key {:?} does not match attributes {:?}",
                self.key,
                entity.key_parts()
            )));
        }
        Ok(entity)
    }
}

/// Encode `entity` into canonical record bytes
///
/// Fails with `InvalidKey` if the entity's key parts are not valid and with
/// `LimitExceeded` if the record is too deep or too large.
pub fn encode<E: Entity>(entity: &E, limits: &Limits) -> Result<Vec<u8>> {
    let key = entity.key_parts();
    ledger_core::LedgerKey::with_limits(E::namespace()?, key.clone(), limits)?;

    let data = serde_json::to_value(entity)?;
    limits.validate_value(&data)?;

    // Round-trip through Value so every object is emitted with sorted keys
    let envelope = serde_json::to_value(RecordEnvelope {
        class: E::CLASS_ID.to_string(),
        data,
        key,
        schema: E::SCHEMA_VERSION,
    })?;
    let bytes = serde_json::to_vec(&envelope)?;
    limits.validate_encoded_size(&bytes)?;
    Ok(bytes)
}

/// Decode canonical record bytes into entity `E`
pub fn decode<E: Entity>(bytes: &[u8]) -> Result<E> {
    RecordEnvelope::parse(bytes)?.into_entity()
}
