use std::path::Path;
use thiserror::Error;

use super::types::{ClientConfigFile, MarketConfig};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("No enabled markets in config")]
    NoEnabledMarkets,
    #[error("Market not found: {0}")]
    MarketNotFound(String),
    #[error("Market {0} has a zero contract id")]
    ZeroContractId(String),
}

/// Load client configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ClientConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<ClientConfigFile, ConfigError> {
    let config: ClientConfigFile = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<ClientConfigFile, ConfigError> {
    let default_config = include_str!("client_config.json");
    load_config_from_str(default_config)
}

impl ClientConfigFile {
    /// Get only enabled markets
    pub fn enabled_markets(&self) -> Vec<&MarketConfig> {
        self.markets.iter().filter(|m| m.enabled).collect()
    }

    /// Get a specific market by ID
    pub fn get_market(&self, id: &str) -> Result<&MarketConfig, ConfigError> {
        self.markets
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| ConfigError::MarketNotFound(id.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled_markets().is_empty() {
            return Err(ConfigError::NoEnabledMarkets);
        }
        for market in &self.markets {
            if market.market_contract_id.is_zero() || market.oracle_contract_id.is_zero() {
                return Err(ConfigError::ZeroContractId(market.id.clone()));
            }
        }
        Ok(())
    }
}
