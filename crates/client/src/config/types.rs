use lendmark_core::{AssetId, ContractId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfigFile {
    pub markets: Vec<MarketConfig>,
    #[serde(default)]
    pub global: GlobalConfig,
}

/// Configuration for a single lending market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Unique identifier for the market (e.g., "usdc")
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether this market is shown to users
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Market contract
    pub market_contract_id: ContractId,
    /// Price oracle contract the market reads prices from
    pub oracle_contract_id: ContractId,
    /// Asset oracle fees are paid in
    pub base_asset_id: AssetId,
}

/// Settings shared by all markets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Give up waiting for finality after this long. None waits forever.
    #[serde(default)]
    pub finality_timeout_ms: Option<u64>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            finality_timeout_ms: None,
        }
    }
}

impl GlobalConfig {
    pub fn finality_timeout(&self) -> Option<Duration> {
        self.finality_timeout_ms.map(Duration::from_millis)
    }
}

fn default_true() -> bool {
    true
}
