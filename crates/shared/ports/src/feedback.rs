use lendmark_core::{KeyMatch, QueryKey, TokenAmount, TransactionId};

/// Port for user-facing transaction notifications
///
/// Fire-and-forget: implementations must not block or fail.
pub trait Notifier: Send + Sync {
    /// Transaction submitted, waiting for finality
    fn pending(&self);

    fn success(&self, transaction_id: &TransactionId);

    fn error(&self, message: &str);
}

/// Port for marking cached query results stale
pub trait QueryInvalidator: Send + Sync {
    /// Mark every entry selected by `key` stale. Returns how many matched.
    fn invalidate(&self, key: &QueryKey, mode: KeyMatch) -> usize;
}

/// Port for the market page's shared UI state
pub trait MarketUiState: Send + Sync {
    fn input_dialog_open(&self) -> bool;
    fn set_input_dialog_open(&self, open: bool);

    fn success_dialog_open(&self) -> bool;
    fn set_success_dialog_open(&self, open: bool);

    fn success_dialog_transaction_id(&self) -> Option<TransactionId>;
    fn set_success_dialog_transaction_id(&self, transaction_id: Option<TransactionId>);

    /// Amount currently entered in the action dialog
    fn token_amount(&self) -> TokenAmount;
    fn set_token_amount(&self, amount: TokenAmount);
}
