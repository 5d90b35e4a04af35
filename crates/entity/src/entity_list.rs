//! EntityList: registry binding one entity type to its namespace
//!
//! ## Semantics
//!
//! - `get`: `NotFound` when the key is absent, distinct from decode failures
//! - `add`: `DuplicateKey` when the key exists; never overwrites
//! - `update`: `NotFoundOnUpdate` when the key is absent; never creates
//!
//! `add` and `update` are check-then-put. Under the transactional store the
//! existence check lands in the read-set, so a concurrent invocation that
//! creates or changes the same key makes this one fail at commit.
//!
//! Nothing is written until the single `put` at the end of `add`/`update`;
//! every validation and encoding step runs first.

use std::marker::PhantomData;

use ledger_core::{Error, LedgerKey, Limits, Namespace, Result, Store};
use tracing::debug;

use crate::entity::Entity;

/// Registry for entities of type `E` stored in `S`
///
/// Created per invocation and discarded at its end.
pub struct EntityList<'a, E, S: Store + ?Sized> {
    store: &'a S,
    namespace: Namespace,
    limits: Limits,
    _entity: PhantomData<fn() -> E>,
}

impl<'a, E: Entity, S: Store + ?Sized> EntityList<'a, E, S> {
    /// Create a registry with default limits
    pub fn new(store: &'a S) -> Result<Self> {
        Self::with_limits(store, Limits::default())
    }

    /// Create a registry with custom limits
    pub fn with_limits(store: &'a S, limits: Limits) -> Result<Self> {
        Ok(EntityList {
            store,
            namespace: E::namespace()?,
            limits,
            _entity: PhantomData,
        })
    }

    /// Namespace every key of this registry lives under
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Limits applied to keys and records
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Build a key in this registry's namespace
    pub fn make_key<I, P>(&self, parts: I) -> Result<LedgerKey>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        E::make_key_with_limits(parts, &self.limits)
    }

    /// Load the entity stored under `parts`
    pub fn get<I, P>(&self, parts: I) -> Result<E>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let key = self.make_key(parts)?;
        self.get_by_key(&key)
    }

    /// Load the entity stored under a prebuilt key
    pub fn get_by_key(&self, key: &LedgerKey) -> Result<E> {
        self.check_namespace(key)?;
        debug!(key = %key, "get");

        let bytes = self
            .store
            .get(&key.encode())?
            .ok_or_else(|| Error::NotFound {
                key: key.to_string(),
            })?;

        let entity = E::from_bytes(&bytes)?;
        if entity.key_parts() != key.parts() {
            return Err(Error::Serialization(format!(
                "record stored under {key} carries key {:?}",
                entity.key_parts()
            )));
        }
        Ok(entity)
    }

    /// True if a record exists under `parts`
    pub fn exists<I, P>(&self, parts: I) -> Result<bool>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let key = self.make_key(parts)?;
        Ok(self.store.get(&key.encode())?.is_some())
    }

    /// Store a new entity
    ///
    /// Fails with `DuplicateKey` and writes nothing if the key exists.
    pub fn add(&self, entity: &E) -> Result<()> {
        let key = self.make_key(entity.key_parts())?;
        let bytes = entity.to_bytes(&self.limits)?;
        let encoded = key.encode();

        if self.store.get(&encoded)?.is_some() {
            debug!(key = %key, "add rejected: key exists");
            return Err(Error::DuplicateKey {
                key: key.to_string(),
            });
        }

        debug!(key = %key, bytes = bytes.len(), "add");
        self.store.put(&encoded, bytes)
    }

    /// Overwrite an existing entity
    ///
    /// Fails with `NotFoundOnUpdate` and writes nothing if the key is absent.
    pub fn update(&self, entity: &E) -> Result<()> {
        let key = self.make_key(entity.key_parts())?;
        let bytes = entity.to_bytes(&self.limits)?;
        let encoded = key.encode();

        if self.store.get(&encoded)?.is_none() {
            debug!(key = %key, "update rejected: key absent");
            return Err(Error::NotFoundOnUpdate {
                key: key.to_string(),
            });
        }

        debug!(key = %key, bytes = bytes.len(), "update");
        self.store.put(&encoded, bytes)
    }

    fn check_namespace(&self, key: &LedgerKey) -> Result<()> {
        if key.namespace() != &self.namespace {
            return Err(Error::InvalidArgument(format!(
                "key {key} is outside namespace {}",
                self.namespace
            )));
        }
        Ok(())
    }
}

impl<E, S: Store + ?Sized> std::fmt::Debug for EntityList<'_, E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityList")
            .field("namespace", &self.namespace)
            .field("limits", &self.limits)
            .finish()
    }
}
