//! Polymorphic record decoding
//!
//! A store may hold records of several entity classes. `EntityDecoders` is an
//! explicit table from class id to decoder, each producing a variant of one
//! application-defined sum type. The table is built at setup and passed where
//! it is needed; there is no global registration.

use std::collections::BTreeMap;
use std::fmt;

use ledger_core::{Error, Result};

use crate::codec::RecordEnvelope;
use crate::entity::Entity;

type DecodeFn<T> = Box<dyn Fn(RecordEnvelope) -> Result<T> + Send + Sync>;

/// Class id → decoder table producing `T`
///
/// # Example
///
/// ```ignore
/// enum Record { User(User), Course(Course) }
///
/// let decoders = EntityDecoders::new()
///     .register::<User>(Record::User)
///     .register::<Course>(Record::Course);
/// let record = decoders.decode(&bytes)?;
/// ```
pub struct EntityDecoders<T> {
    table: BTreeMap<&'static str, DecodeFn<T>>,
}

impl<T: 'static> EntityDecoders<T> {
    /// Create an empty table
    pub fn new() -> Self {
        EntityDecoders {
            table: BTreeMap::new(),
        }
    }

    /// Register entity `E`, wrapping decoded values with `wrap`
    ///
    /// Registering the same class twice replaces the earlier decoder.
    pub fn register<E>(mut self, wrap: fn(E) -> T) -> Self
    where
        E: Entity + 'static,
    {
        self.table.insert(
            E::CLASS_ID,
            Box::new(move |envelope: RecordEnvelope| envelope.into_entity::<E>().map(wrap)),
        );
        self
    }

    /// True if a decoder is registered for `class_id`
    pub fn contains(&self, class_id: &str) -> bool {
        self.table.contains_key(class_id)
    }

    /// Registered class ids in sorted order
    pub fn class_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }

    /// Decode a stored record by its class discriminator
    ///
    /// Unknown classes are `Error::Serialization`.
    pub fn decode(&self, bytes: &[u8]) -> Result<T> {
        let envelope = RecordEnvelope::parse(bytes)?;
        let decoder = self.table.get(envelope.class()).ok_or_else(|| {
            Error::Serialization(format!("unknown record class: {}", envelope.class()))
        })?;
        decoder(envelope)
    }
}

impl<T: 'static> Default for EntityDecoders<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EntityDecoders<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDecoders")
            .field("classes", &self.table.keys().collect::<Vec<_>>())
            .finish()
    }
}
