//! In-memory lending market contract
//!
//! Keeps per-account collateral balances and validates withdrawals the way
//! the on-chain market does: the oracle must be a declared dependency, the
//! oracle fee must be forwarded in the base asset, the price update must
//! cover the asset's feed, and the account must hold enough collateral.
//! The balance is debited when the transaction finalizes.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use lendmark_core::{
    Address, AssetId, BaseUnits, Bits256, CollateralConfiguration, CollateralRegistry,
    ContractHandle, PriceUpdatePayload, Timestamp, TransactionId,
};
use lendmark_ports::{
    CallParams, CollateralSource, ContractError, ContractResult, MarketContract,
    PendingTransaction, TransactionReceipt,
};
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Simulated market settings
#[derive(Debug, Clone)]
pub struct MarketSimConfig {
    /// Wallet the client signs with
    pub wallet: Address,
    pub market_contract_id: Bits256,
    pub oracle_contract_id: Bits256,
    pub base_asset_id: AssetId,
    /// Time between submission and finality
    pub finality_delay: Duration,
}

/// A finalized withdrawal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalRecord {
    pub transaction_id: TransactionId,
    pub account: Address,
    pub asset_id: AssetId,
    pub amount: u64,
    pub fee_paid: u64,
    pub finalized_at: Timestamp,
}

#[derive(Default)]
struct MarketState {
    collateral: DashMap<AssetId, CollateralConfiguration>,
    balances: DashMap<(Address, AssetId), u64>,
    withdrawals: Mutex<Vec<WithdrawalRecord>>,
    /// Revert reason for the next transaction to finalize
    revert_next: Mutex<Option<String>>,
}

pub struct SimulatedMarket {
    config: MarketSimConfig,
    state: Arc<MarketState>,
}

impl SimulatedMarket {
    pub fn new(config: MarketSimConfig) -> Self {
        Self {
            config,
            state: Arc::new(MarketState::default()),
        }
    }

    pub fn add_collateral_asset(&self, config: CollateralConfiguration) {
        debug!(
            "Collateral asset added: {} ({} decimals)",
            config.asset_id, config.decimals
        );
        self.state.collateral.insert(config.asset_id, config);
    }

    pub fn pause_collateral_asset(&self, asset_id: &AssetId) {
        if let Some(mut config) = self.state.collateral.get_mut(asset_id) {
            config.paused = true;
        }
    }

    /// Credit collateral to an account
    pub fn supply_collateral(&self, account: Address, asset_id: AssetId, amount: u64) {
        *self.state.balances.entry((account, asset_id)).or_insert(0) += amount;
    }

    pub fn collateral_balance(&self, account: &Address, asset_id: &AssetId) -> u64 {
        self.state
            .balances
            .get(&(*account, *asset_id))
            .map(|b| *b)
            .unwrap_or(0)
    }

    pub fn withdrawals(&self) -> Vec<WithdrawalRecord> {
        self.state.withdrawals.lock().clone()
    }

    /// Make the next transaction revert at finality
    pub fn revert_next(&self, reason: impl Into<String>) {
        *self.state.revert_next.lock() = Some(reason.into());
    }

    fn validate(
        &self,
        asset_id: &AssetId,
        amount: BaseUnits,
        price_update: &PriceUpdatePayload,
        params: &CallParams,
    ) -> ContractResult<u64> {
        if !params.depends_on(&self.config.oracle_contract_id) {
            return Err(ContractError::MissingOracleDependency);
        }

        let forwarded = match params.forward {
            Some(forward) if forward.asset_id != self.config.base_asset_id => {
                return Err(ContractError::WrongFeeAsset {
                    expected: self.config.base_asset_id,
                    actual: forward.asset_id,
                });
            }
            Some(forward) => forward.amount,
            None => 0,
        };
        if forwarded < price_update.update_fee {
            return Err(ContractError::InsufficientFee {
                required: price_update.update_fee,
                forwarded,
            });
        }

        let config = self
            .state
            .collateral
            .get(asset_id)
            .ok_or(ContractError::UnknownAsset(*asset_id))?;
        if config.paused {
            return Err(ContractError::AssetPaused(*asset_id));
        }
        if !price_update.covers(&config.price_feed_id) {
            return Err(ContractError::Reverted(
                "price update does not cover collateral feed".to_string(),
            ));
        }

        let requested = amount
            .to_u64()
            .ok_or(ContractError::AmountTooLarge(amount))?;
        let available = self.collateral_balance(&self.config.wallet, asset_id);
        if requested > available {
            return Err(ContractError::InsufficientCollateral {
                available: BaseUnits::from(available),
                requested: amount,
            });
        }

        Ok(requested)
    }
}

#[async_trait]
impl MarketContract for SimulatedMarket {
    fn handle(&self) -> ContractHandle {
        ContractHandle::new(self.config.wallet, self.config.market_contract_id)
    }

    async fn withdraw_collateral(
        &self,
        asset_id: AssetId,
        amount: BaseUnits,
        price_update: &PriceUpdatePayload,
        params: CallParams,
    ) -> ContractResult<Box<dyn PendingTransaction>> {
        let requested = self.validate(&asset_id, amount, price_update, &params)?;
        let transaction_id = Bits256(rand::random());
        info!(
            "withdraw_collateral accepted: tx={} asset={} amount={}",
            transaction_id, asset_id, requested
        );

        Ok(Box::new(SimulatedTransaction {
            transaction_id,
            account: self.config.wallet,
            asset_id,
            amount: requested,
            fee_paid: price_update.update_fee,
            delay: self.config.finality_delay,
            state: self.state.clone(),
        }))
    }
}

impl CollateralSource for SimulatedMarket {
    fn collateral_configurations(&self) -> Option<Arc<CollateralRegistry>> {
        let registry: CollateralRegistry = self
            .state
            .collateral
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        Some(Arc::new(registry))
    }
}

struct SimulatedTransaction {
    transaction_id: TransactionId,
    account: Address,
    asset_id: AssetId,
    amount: u64,
    fee_paid: u64,
    delay: Duration,
    state: Arc<MarketState>,
}

#[async_trait]
impl PendingTransaction for SimulatedTransaction {
    fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    async fn wait_for_result(self: Box<Self>) -> ContractResult<TransactionReceipt> {
        tokio::time::sleep(self.delay).await;

        if let Some(reason) = self.state.revert_next.lock().take() {
            return Err(ContractError::Reverted(reason));
        }

        // Another withdrawal may have finalized in between
        {
            let mut balance = self
                .state
                .balances
                .entry((self.account, self.asset_id))
                .or_insert(0);
            if *balance < self.amount {
                return Err(ContractError::InsufficientCollateral {
                    available: BaseUnits::from(*balance),
                    requested: BaseUnits::from(self.amount),
                });
            }
            *balance -= self.amount;
        }

        let finalized_at = Utc::now();
        self.state.withdrawals.lock().push(WithdrawalRecord {
            transaction_id: self.transaction_id,
            account: self.account,
            asset_id: self.asset_id,
            amount: self.amount,
            fee_paid: self.fee_paid,
            finalized_at,
        });

        Ok(TransactionReceipt {
            transaction_id: self.transaction_id,
            finalized_at,
        })
    }
}
