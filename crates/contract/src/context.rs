//! Per-invocation context
//!
//! Wires the user and course registries to the invocation's store handle and
//! carries who submitted the invocation and when. Built fresh for every
//! invocation; nothing survives between invocations.

use chrono::{DateTime, Utc};
use ledger_core::{Limits, Result, Store};
use ledger_entity::EntityList;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::course::Course;
use crate::user::User;

/// Invocation metadata supplied by the host
///
/// `timestamp` is the only clock the contract reads, so every endorsing peer
/// computes identical writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TxInfo {
    /// Host transaction id
    pub tx_id: String,
    /// Identity of the submitting client
    pub client_id: String,
    /// Deterministic invocation timestamp
    pub timestamp: DateTime<Utc>,
}

impl TxInfo {
    /// Create invocation metadata
    pub fn new(
        tx_id: impl Into<String>,
        client_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        TxInfo {
            tx_id: tx_id.into(),
            client_id: client_id.into(),
            timestamp,
        }
    }

    /// Create invocation metadata with a host-assigned random tx id
    pub fn generate(client_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(Uuid::new_v4().to_string(), client_id, timestamp)
    }
}

/// Registries and metadata for one invocation
#[derive(Debug)]
pub struct EdTechContext<'a, S: Store + ?Sized> {
    /// Users registry
    pub users: EntityList<'a, User, S>,
    /// Courses registry
    pub courses: EntityList<'a, Course, S>,
    tx: TxInfo,
}

impl<'a, S: Store + ?Sized> EdTechContext<'a, S> {
    /// Build the context over `store`
    pub fn new(store: &'a S, tx: TxInfo, limits: &Limits) -> Result<Self> {
        Ok(EdTechContext {
            users: EntityList::with_limits(store, limits.clone())?,
            courses: EntityList::with_limits(store, limits.clone())?,
            tx,
        })
    }

    /// Invocation metadata
    pub fn tx(&self) -> &TxInfo {
        &self.tx
    }

    /// Identity of the submitting client
    pub fn client_id(&self) -> &str {
        &self.tx.client_id
    }

    /// Deterministic invocation timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.tx.timestamp
    }
}
