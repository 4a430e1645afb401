use lendmark_core::{Address, CollateralRegistry};
use std::sync::Arc;

/// Port for the connected wallet
pub trait AccountProvider: Send + Sync {
    /// Current account, or None when no wallet is connected
    fn account(&self) -> Option<Address>;
}

/// Port for the market's collateral configurations
///
/// Returns None while the configurations have not been loaded.
pub trait CollateralSource: Send + Sync {
    fn collateral_configurations(&self) -> Option<Arc<CollateralRegistry>>;
}
