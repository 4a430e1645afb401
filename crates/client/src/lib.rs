//! Lendmark Client
//!
//! Client-side workflows for a lending market. Provides:
//! - **Withdraw Collateral**: scale, submit with an oracle price update,
//!   await finality, report, and refresh cached reads
//! - **Mutation Tracking**: which workflows are in flight, by identity key
//! - **Adapters**: in-process query cache, market UI store, notifiers
//! - **Presentation**: view models for the progress gauge and link groups
//!
//! ## Architecture
//!
//! ```text
//!   Wallet ──► AccountProvider ─┐
//!   Market ──► CollateralSource ┤
//!                               ▼
//!                    ┌────────────────────┐  withdraw_collateral   ┌────────┐
//!   WithdrawRequest ─►│ WithdrawCollateral │ ─────────────────────► │ Market │──► Oracle
//!                    └─────────┬──────────┘ ◄── PendingTransaction └────────┘
//!                              │
//!          ┌───────────────────┼──────────────────┐
//!          ▼                   ▼                  ▼
//!      Notifier          MarketUiState      QueryInvalidator
//!  (pending/success/     (dialogs, amount)  (collateralAssets,
//!       error)                                 balance)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lendmark_client::{WithdrawCollateral, WithdrawRequest, WithdrawSettings};
//!
//! let workflow = WithdrawCollateral::new(ctx, settings, Some(asset_id));
//! let tx = workflow
//!     .execute(WithdrawRequest::new(dec!(12.5), price_update))
//!     .await?;
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod keys;
pub mod mutation;
pub mod presentation;
pub mod withdraw;

// Re-export main types
pub use adapters::{ChannelNotifier, LogNotifier, MarketStore, Notification, QueryCache};
pub use config::{ClientConfigFile, ConfigError, GlobalConfig, MarketConfig};
pub use error::{Error, Result};
pub use keys::Keys;
pub use mutation::{InFlightGuard, MutationTracker};
pub use withdraw::{WithdrawCollateral, WithdrawContext, WithdrawRequest, WithdrawSettings};
