use lendmark_core::{Address, CollateralRegistry};
use lendmark_ports::{AccountProvider, CollateralSource};
use parking_lot::RwLock;
use std::sync::Arc;

/// Wallet connection that can be connected and disconnected
#[derive(Default)]
pub struct WalletSession {
    account: RwLock<Option<Address>>,
}

impl WalletSession {
    pub fn connected(account: Address) -> Self {
        Self {
            account: RwLock::new(Some(account)),
        }
    }

    pub fn connect(&self, account: Address) {
        *self.account.write() = Some(account);
    }

    pub fn disconnect(&self) {
        *self.account.write() = None;
    }
}

impl AccountProvider for WalletSession {
    fn account(&self) -> Option<Address> {
        *self.account.read()
    }
}

/// Collateral configurations that may not be loaded yet
#[derive(Default)]
pub struct CollateralFeed {
    registry: RwLock<Option<Arc<CollateralRegistry>>>,
}

impl CollateralFeed {
    pub fn load(&self, registry: CollateralRegistry) {
        *self.registry.write() = Some(Arc::new(registry));
    }

    pub fn clear(&self) {
        *self.registry.write() = None;
    }
}

impl CollateralSource for CollateralFeed {
    fn collateral_configurations(&self) -> Option<Arc<CollateralRegistry>> {
        self.registry.read().clone()
    }
}
