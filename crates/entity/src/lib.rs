//! Entity persistence over a namespaced key-value ledger
//!
//! This crate maps typed application records onto the [`Store`] boundary:
//! - Entity: trait for a typed record with a class id and key parts
//! - codec: canonical, versioned record envelope (`class`, `schema`, `key`, `data`)
//! - EntityDecoders: class id → decoder table producing a tagged sum type
//! - EntityList: registry binding one entity type to its namespace
//!
//! [`Store`]: ledger_core::Store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod decoder;
pub mod entity;
pub mod entity_list;

pub use codec::{RecordEnvelope, RECORD_SCHEMA_VERSION};
pub use decoder::EntityDecoders;
pub use entity::Entity;
pub use entity_list::EntityList;
