//! Cache and mutation keys
//!
//! Every key is positional. A missing component becomes `KeyPart::Absent`
//! rather than being dropped, so two keys built while different pieces were
//! unavailable never collide.

use lendmark_core::{Address, AssetId, ContractHandle, KeyPart, QueryKey};

pub struct Keys;

impl Keys {
    /// Collateral balances of an account in a market
    pub const COLLATERAL_ASSETS: &'static str = "collateralAssets";

    /// Wallet balance of one asset
    pub const BALANCE: &'static str = "balance";

    /// Collateral withdrawal mutation
    pub const WITHDRAW_COLLATERAL: &'static str = "withdrawCollateral";

    /// `["collateralAssets", account, market address, market id]`
    pub fn collateral_assets(
        account: Option<Address>,
        market: Option<ContractHandle>,
    ) -> QueryKey {
        QueryKey::new(Self::COLLATERAL_ASSETS)
            .push(account)
            .push(market.map(|m| m.address))
            .push(market.map(|m| m.contract_id))
    }

    /// `["balance", account, asset id]`
    pub fn balance(account: Option<Address>, asset_id: Option<AssetId>) -> QueryKey {
        QueryKey::new(Self::BALANCE).push(account).push(asset_id)
    }

    /// `["withdrawCollateral", asset id, account, market address, market id,
    /// oracle address, oracle id]`
    pub fn withdraw_collateral(
        asset_id: Option<AssetId>,
        account: Option<Address>,
        market: Option<ContractHandle>,
        oracle: Option<ContractHandle>,
    ) -> QueryKey {
        let (market_address, market_id) = handle_parts(market);
        let (oracle_address, oracle_id) = handle_parts(oracle);
        QueryKey::new(Self::WITHDRAW_COLLATERAL)
            .push(asset_id)
            .push(account)
            .push(market_address)
            .push(market_id)
            .push(oracle_address)
            .push(oracle_id)
    }
}

fn handle_parts(handle: Option<ContractHandle>) -> (KeyPart, KeyPart) {
    (
        KeyPart::from(handle.map(|h| h.address)),
        KeyPart::from(handle.map(|h| h.contract_id)),
    )
}
