//! EdTech smart contract
//!
//! Records users, courses and course enrollments on a key-value ledger:
//! - User / Course: the ledger entities, with Enrollment as a sub-record
//! - EdTechContext: per-invocation registries, client identity and timestamp
//! - EdTechContract: `instantiate`, `createUser`, `createCourse`, `joinCourse`
//! - Command: name + string arguments parsed into a typed invocation
//! - Chaincode: in-process host running `submit` and `evaluate`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chaincode;
pub mod command;
pub mod config;
pub mod context;
pub mod contract;
pub mod course;
pub mod record;
pub mod user;

pub use chaincode::Chaincode;
pub use command::Command;
pub use config::ContractConfig;
pub use context::{EdTechContext, TxInfo};
pub use contract::EdTechContract;
pub use course::{Course, NewCourse};
pub use record::EdTechEntity;
pub use user::{Enrollment, NewUser, User};

/// Lifecycle state of freshly created users and courses
pub const STATE_CREATED: &str = "CREATED";
