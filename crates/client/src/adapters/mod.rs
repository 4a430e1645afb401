//! In-process adapters for the client ports

pub mod market_store;
pub mod notifier;
pub mod query_cache;

pub use market_store::{MarketStore, MarketUiSnapshot};
pub use notifier::{ChannelNotifier, LogNotifier, Notification};
pub use query_cache::{CacheEntry, QueryCache};
