use lendmark_core::{Address, Bits256, ContractHandle, PriceUpdatePayload};
use lendmark_ports::OracleContract;

/// In-memory price oracle
///
/// Only its identity matters to the market client; it also builds signed
/// update payloads for tests.
pub struct SimulatedOracle {
    wallet: Address,
    contract_id: Bits256,
    /// Fee charged per price feed updated
    fee_per_feed: u64,
}

impl SimulatedOracle {
    pub fn new(wallet: Address, contract_id: Bits256, fee_per_feed: u64) -> Self {
        Self {
            wallet,
            contract_id,
            fee_per_feed,
        }
    }

    /// Build an update payload for the given feeds, priced by this oracle
    pub fn price_update(&self, feeds: &[Bits256], publish_time: u64) -> PriceUpdatePayload {
        feeds.iter().fold(
            PriceUpdatePayload::new(self.fee_per_feed.saturating_mul(feeds.len() as u64)),
            |payload, feed| payload.with_feed(*feed, publish_time, feed.as_bytes().to_vec()),
        )
    }
}

impl OracleContract for SimulatedOracle {
    fn handle(&self) -> ContractHandle {
        ContractHandle::new(self.wallet, self.contract_id)
    }
}
