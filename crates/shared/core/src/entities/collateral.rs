use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::values::{AssetId, Bits256};

/// Market-side configuration of a single collateral asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollateralConfiguration {
    pub asset_id: AssetId,
    /// Oracle price feed used to value this asset
    pub price_feed_id: Bits256,
    /// Decimal precision of the asset's on-chain amounts
    pub decimals: u32,
    pub borrow_collateral_factor: Decimal,
    pub liquidate_collateral_factor: Decimal,
    pub liquidation_penalty: Decimal,
    /// Maximum total supply accepted by the market, in base units
    pub supply_cap: u64,
    #[serde(default)]
    pub paused: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Collateral asset not found: {0}")]
    NotFound(AssetId),
}

/// Collateral configurations of a market, keyed by asset id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollateralRegistry {
    configurations: HashMap<AssetId, CollateralConfiguration>,
}

impl CollateralRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the configuration for its asset
    pub fn insert(&mut self, config: CollateralConfiguration) {
        self.configurations.insert(config.asset_id, config);
    }

    pub fn with(mut self, config: CollateralConfiguration) -> Self {
        self.insert(config);
        self
    }

    pub fn get(&self, asset_id: &AssetId) -> Result<&CollateralConfiguration, RegistryError> {
        self.configurations
            .get(asset_id)
            .ok_or(RegistryError::NotFound(*asset_id))
    }

    /// Decimal precision of an asset
    pub fn decimals(&self, asset_id: &AssetId) -> Result<u32, RegistryError> {
        self.get(asset_id).map(|c| c.decimals)
    }

    pub fn contains(&self, asset_id: &AssetId) -> bool {
        self.configurations.contains_key(asset_id)
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollateralConfiguration> {
        self.configurations.values()
    }
}

impl FromIterator<CollateralConfiguration> for CollateralRegistry {
    fn from_iter<I: IntoIterator<Item = CollateralConfiguration>>(iter: I) -> Self {
        let mut registry = Self::new();
        for config in iter {
            registry.insert(config);
        }
        registry
    }
}
