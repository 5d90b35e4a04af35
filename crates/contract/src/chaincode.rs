//! In-process chaincode host
//!
//! Runs contract invocations against a shared world state with the host's
//! all-or-nothing rule:
//!
//! - `submit`: run the invocation in a fresh transaction; commit its writes
//!   if it succeeds, discard them if it fails or loses a commit conflict
//! - `evaluate`: run the invocation and always discard its writes
//!
//! Several threads may submit concurrently; conflicting invocations are
//! resolved first-committer-wins at commit.

use std::sync::Arc;

use ledger_concurrency::{TransactionContext, TransactionManager};
use ledger_core::Result;
use ledger_entity::EntityDecoders;
use ledger_storage::MemoryStore;
use tracing::debug;

use crate::config::ContractConfig;
use crate::context::{EdTechContext, TxInfo};
use crate::contract::EdTechContract;
use crate::record::EdTechEntity;

/// Contract deployed on an in-memory world state
#[derive(Debug)]
pub struct Chaincode {
    contract: EdTechContract,
    manager: TransactionManager,
    decoders: EntityDecoders<EdTechEntity>,
}

impl Chaincode {
    /// Deploy on a fresh, empty world state
    pub fn new(config: ContractConfig) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), config)
    }

    /// Deploy on an existing world state
    pub fn with_store(store: Arc<MemoryStore>, config: ContractConfig) -> Self {
        Chaincode {
            contract: EdTechContract::new(config),
            manager: TransactionManager::new(store),
            decoders: EdTechEntity::decoders(),
        }
    }

    /// The deployed contract
    pub fn contract(&self) -> &EdTechContract {
        &self.contract
    }

    /// World state
    pub fn store(&self) -> &Arc<MemoryStore> {
        self.manager.store()
    }

    /// Run an invocation and commit its writes on success
    ///
    /// Returns the invocation's response. On any error, including a commit
    /// conflict, no write of this invocation becomes visible.
    pub fn submit<A: AsRef<str>>(&self, tx: TxInfo, function: &str, args: &[A]) -> Result<Vec<u8>> {
        let txn = self.manager.begin();
        match self.run(&txn, tx, function, args) {
            Ok(response) => {
                self.manager.commit(&txn)?;
                Ok(response)
            }
            Err(e) => {
                self.manager.abort(&txn, e.to_string())?;
                Err(e)
            }
        }
    }

    /// Run an invocation without committing anything
    pub fn evaluate<A: AsRef<str>>(&self, tx: TxInfo, function: &str, args: &[A]) -> Result<Vec<u8>> {
        let txn = self.manager.begin();
        let result = self.run(&txn, tx, function, args);
        debug!(
            txn_id = txn.txn_id,
            discarded = txn.pending_count(),
            "evaluate finished"
        );
        result
    }

    /// Decode a response or stored record
    pub fn decode(&self, bytes: &[u8]) -> Result<EdTechEntity> {
        self.decoders.decode(bytes)
    }

    fn run<A: AsRef<str>>(
        &self,
        txn: &TransactionContext,
        tx: TxInfo,
        function: &str,
        args: &[A],
    ) -> Result<Vec<u8>> {
        let ctx = EdTechContext::new(txn, tx, self.contract.limits())?;
        self.contract.invoke(&ctx, function, args)
    }
}

impl Default for Chaincode {
    fn default() -> Self {
        Self::new(ContractConfig::default())
    }
}
