use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

mod bits;
mod units;

pub use bits::{Bits256, ParseBitsError};
pub use units::{BaseUnits, ScaleError, to_base_units};

/// Human-readable token quantity - uses Decimal for precision
pub type TokenAmount = Decimal;

/// Identifier of an on-chain asset
pub type AssetId = Bits256;

/// Identifier of a deployed contract
pub type ContractId = Bits256;

/// Wallet address
pub type Address = Bits256;

/// Identifier of a submitted transaction
pub type TransactionId = Bits256;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;
