//! The Entity trait
//!
//! An entity is a typed record identified by its class id plus an ordered
//! tuple of key parts. The composite ledger key is a pure function of those
//! two, so key fields must never change after construction: implementors
//! expose them read-only.

use ledger_core::{LedgerKey, Limits, Namespace, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec;

/// A typed record persisted through an [`EntityList`](crate::EntityList)
///
/// The serde representation of the implementor is the `data` section of the
/// stored record. Implementors should use `#[serde(deny_unknown_fields)]` so
/// records carrying unexpected attributes fail to decode.
pub trait Entity: Serialize + DeserializeOwned {
    /// Stable per-type discriminator embedded in every stored record
    const CLASS_ID: &'static str;

    /// Version of the attribute layout
    ///
    /// Records written with a different version are rejected on decode.
    const SCHEMA_VERSION: u32 = codec::RECORD_SCHEMA_VERSION;

    /// Ordered key parts identifying this record within its class
    fn key_parts(&self) -> Vec<String>;

    /// Application lifecycle tag, e.g. `CREATED`
    fn lifecycle_state(&self) -> &str;

    /// Replace the lifecycle tag
    fn set_lifecycle_state(&mut self, state: &str);

    /// Namespace of the registry storing this class
    fn namespace() -> Result<Namespace> {
        Ok(Namespace::for_class(Self::CLASS_ID)?)
    }

    /// Build the ledger key for `parts` with default limits
    ///
    /// Registries validate against their configured limits instead, through
    /// [`make_key_with_limits`](Entity::make_key_with_limits). A key accepted
    /// here may still be rejected by a registry with tighter limits.
    fn make_key<I, P>(parts: I) -> Result<LedgerKey>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Ok(LedgerKey::new(Self::namespace()?, parts)?)
    }

    /// Build the ledger key for `parts`, validated against `limits`
    fn make_key_with_limits<I, P>(parts: I, limits: &Limits) -> Result<LedgerKey>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Ok(LedgerKey::with_limits(Self::namespace()?, parts, limits)?)
    }

    /// Ledger key of this record with default limits
    fn key(&self) -> Result<LedgerKey> {
        Self::make_key(self.key_parts())
    }

    /// Encode into the canonical record format
    fn to_bytes(&self, limits: &Limits) -> Result<Vec<u8>> {
        codec::encode(self, limits)
    }

    /// Decode a canonical record of this class
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        codec::decode(bytes)
    }
}
