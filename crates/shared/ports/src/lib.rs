//! Lendmark Ports
//!
//! Port definitions (traits) for the Lendmark lending-market client.
//! These define the boundaries between client workflows and the wallet,
//! the contracts, and the UI.

mod error;
mod feedback;
mod market;
mod session;

pub use error::{ContractError, ContractResult};
pub use feedback::{MarketUiState, Notifier, QueryInvalidator};
pub use market::{
    CallParams, Forward, MarketContract, OracleContract, PendingTransaction, TransactionReceipt,
};
pub use session::{AccountProvider, CollateralSource};
