//! Lendmark Market Simulator
//!
//! In-memory implementations of the market, oracle, wallet and collateral
//! ports. Used to drive client workflows end to end without a node.

pub mod market;
pub mod oracle;
pub mod session;

pub use market::{MarketSimConfig, SimulatedMarket, WithdrawalRecord};
pub use oracle::SimulatedOracle;
pub use session::{CollateralFeed, WalletSession};
