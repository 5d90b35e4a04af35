//! Contract configuration
//!
//! Passed explicitly at setup; nothing here is global or mutable at runtime.

use ledger_core::Limits;
use serde::{Deserialize, Serialize};

/// Name the contract is registered under
pub const DEFAULT_CONTRACT_NAME: &str = "org.upgrad-network.edtech";

/// Contract-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractConfig {
    /// Contract name (default: `org.upgrad-network.edtech`)
    pub name: String,

    /// Key and record limits applied by every registry
    pub limits: Limits,
}

impl Default for ContractConfig {
    fn default() -> Self {
        ContractConfig {
            name: DEFAULT_CONTRACT_NAME.to_string(),
            limits: Limits::default(),
        }
    }
}

impl ContractConfig {
    /// Parse a JSON configuration document; omitted fields keep their defaults
    pub fn from_json(json: &str) -> ledger_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}
