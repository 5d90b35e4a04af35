//! EdTech ledger - users, courses and enrollments on a key-value ledger
//!
//! The contract persists typed entities through a generic persistence layer:
//! composite keys scoped by class namespace, a canonical versioned record
//! format, and registries that refuse silent overwrites and silent creation.
//!
//! # Quick Start
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use edtech_ledger::{Chaincode, EdTechEntity, TxInfo};
//!
//! let chaincode = Chaincode::default();
//! let tx = TxInfo::new("tx-1", "client-a", Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
//!
//! let bytes = chaincode.submit(tx, "createUser", &["1234", "Aakash", "Bansal", "a@b.com"])?;
//! assert!(matches!(chaincode.decode(&bytes)?, EdTechEntity::User(_)));
//! # Ok::<(), edtech_ledger::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `ledger-core`: keys, limits, errors and the [`Store`] boundary
//! - `ledger-storage`: versioned in-memory world state
//! - `ledger-concurrency`: per-invocation transactions with read-set validation
//! - `ledger-entity`: [`Entity`], record codec, decoders and [`EntityList`]
//! - `edtech-contract`: the contract, its entities and the chaincode host

pub use edtech_contract::{
    Chaincode, Command, ContractConfig, Course, EdTechContext, EdTechContract, EdTechEntity,
    Enrollment, NewCourse, NewUser, TxInfo, User, STATE_CREATED,
};
pub use ledger_concurrency::{TransactionContext, TransactionManager, TransactionStatus};
pub use ledger_core::{Error, ErrorKind, LedgerKey, Limits, Namespace, Result, Store};
pub use ledger_entity::{Entity, EntityDecoders, EntityList, RecordEnvelope};
pub use ledger_storage::MemoryStore;
