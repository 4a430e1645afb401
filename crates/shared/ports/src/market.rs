use async_trait::async_trait;
use lendmark_core::{
    AssetId, BaseUnits, ContractHandle, ContractId, PriceUpdatePayload, Timestamp, TransactionId,
};

use crate::error::ContractResult;

/// Coins forwarded along with a contract call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forward {
    pub amount: u64,
    pub asset_id: AssetId,
}

/// Call-time options for a contract call
///
/// `dependencies` lists the contracts the callee will call into, so the
/// transaction can include them as inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallParams {
    pub forward: Option<Forward>,
    pub dependencies: Vec<ContractId>,
}

impl CallParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward(mut self, amount: u64, asset_id: AssetId) -> Self {
        self.forward = Some(Forward { amount, asset_id });
        self
    }

    pub fn add_contract(mut self, contract_id: ContractId) -> Self {
        self.dependencies.push(contract_id);
        self
    }

    pub fn depends_on(&self, contract_id: &ContractId) -> bool {
        self.dependencies.contains(contract_id)
    }
}

/// A finalized transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_id: TransactionId,
    pub finalized_at: Timestamp,
}

/// Handle to a submitted transaction that has not reached finality yet
#[async_trait]
pub trait PendingTransaction: Send {
    fn transaction_id(&self) -> TransactionId;

    /// Wait until the transaction is final
    async fn wait_for_result(self: Box<Self>) -> ContractResult<TransactionReceipt>;
}

/// Port for the lending market contract
#[async_trait]
pub trait MarketContract: Send + Sync {
    fn handle(&self) -> ContractHandle;

    /// Submit a collateral withdrawal
    ///
    /// Resolves once the transaction is accepted by the node; finality is
    /// awaited separately through the returned handle.
    async fn withdraw_collateral(
        &self,
        asset_id: AssetId,
        amount: BaseUnits,
        price_update: &PriceUpdatePayload,
        params: CallParams,
    ) -> ContractResult<Box<dyn PendingTransaction>>;
}

/// Port for the price oracle contract
///
/// Never called directly by client workflows; the market calls into it.
pub trait OracleContract: Send + Sync {
    fn handle(&self) -> ContractHandle;
}
