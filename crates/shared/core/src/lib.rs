//! Lendmark Core Domain
//!
//! Pure domain types for the Lendmark lending-market client.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Market metadata
    CollateralConfiguration,
    CollateralRegistry,
    ContractHandle,
    // Notification lifecycle
    InvalidTransition,
    // Cache keys
    KeyMatch,
    KeyPart,
    NotificationLifecycle,
    NotificationState,
    // Oracle input
    PriceUpdatePayload,
    QueryKey,
    RegistryError,
};
pub use values::{
    Address, AssetId, BaseUnits, Bits256, ContractId, ParseBitsError, ScaleError, Timestamp,
    TokenAmount, TransactionId, to_base_units,
};
