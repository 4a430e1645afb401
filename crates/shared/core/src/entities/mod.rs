mod collateral;
mod contract;
mod notification;
mod price_update;
mod query_key;

pub use collateral::{CollateralConfiguration, CollateralRegistry, RegistryError};
pub use contract::ContractHandle;
pub use notification::{InvalidTransition, NotificationLifecycle, NotificationState};
pub use price_update::PriceUpdatePayload;
pub use query_key::{KeyMatch, KeyPart, QueryKey};
