use lendmark_core::{AssetId, BaseUnits};
use thiserror::Error;

/// Errors raised by contract clients while submitting or finalizing a call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    #[error("Insufficient fee forwarded: required {required}, forwarded {forwarded}")]
    InsufficientFee { required: u64, forwarded: u64 },

    #[error("Fee must be paid in the base asset {expected}, got {actual}")]
    WrongFeeAsset { expected: AssetId, actual: AssetId },

    #[error("Oracle contract not declared as a call dependency")]
    MissingOracleDependency,

    #[error("Unknown collateral asset: {0}")]
    UnknownAsset(AssetId),

    #[error("Collateral asset is paused: {0}")]
    AssetPaused(AssetId),

    #[error("Insufficient collateral: available={available}, requested={requested}")]
    InsufficientCollateral {
        available: BaseUnits,
        requested: BaseUnits,
    },

    #[error("Amount exceeds on-chain width: {0}")]
    AmountTooLarge(BaseUnits),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Finality wait failed: {0}")]
    Finality(String),
}

pub type ContractResult<T> = std::result::Result<T, ContractError>;
