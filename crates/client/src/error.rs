//! Client errors

use lendmark_core::{RegistryError, ScaleError, TransactionId};
use lendmark_ports::ContractError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Scale(#[from] ScaleError),

    #[error(transparent)]
    UnknownCollateral(#[from] RegistryError),

    #[error("Timed out after {timeout_ms}ms waiting for transaction {transaction_id}")]
    FinalityTimeout {
        transaction_id: TransactionId,
        timeout_ms: u64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
