use serde::{Deserialize, Serialize};

use crate::values::Bits256;

/// Signed oracle price update attached to a market call
///
/// The market forwards it to the oracle contract, which verifies the
/// signatures and stores the prices before the market reads them.
/// `update_fee` is what the oracle charges for the update, paid in the
/// market's base asset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceUpdatePayload {
    pub update_fee: u64,
    pub publish_times: Vec<u64>,
    pub price_feed_ids: Vec<Bits256>,
    pub update_data: Vec<Vec<u8>>,
}

impl PriceUpdatePayload {
    pub fn new(update_fee: u64) -> Self {
        Self {
            update_fee,
            ..Default::default()
        }
    }

    /// Add a signed update for one price feed
    pub fn with_feed(mut self, feed_id: Bits256, publish_time: u64, data: Vec<u8>) -> Self {
        self.price_feed_ids.push(feed_id);
        self.publish_times.push(publish_time);
        self.update_data.push(data);
        self
    }

    pub fn covers(&self, feed_id: &Bits256) -> bool {
        self.price_feed_ids.contains(feed_id)
    }

    pub fn is_empty(&self) -> bool {
        self.update_data.is_empty()
    }
}
