use lendmark_core::{TokenAmount, TransactionId};
use lendmark_ports::MarketUiState;
use parking_lot::RwLock;

/// Snapshot of the market page's dialog state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarketUiSnapshot {
    pub input_dialog_open: bool,
    pub success_dialog_open: bool,
    pub success_dialog_transaction_id: Option<TransactionId>,
    pub token_amount: TokenAmount,
}

/// Shared UI state for the market page
#[derive(Default)]
pub struct MarketStore {
    state: RwLock<MarketUiSnapshot>,
}

impl MarketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MarketUiSnapshot {
        self.state.read().clone()
    }

    /// Open the action dialog with an amount entered
    pub fn open_input_dialog(&self, amount: TokenAmount) {
        let mut state = self.state.write();
        state.input_dialog_open = true;
        state.token_amount = amount;
    }

    /// Back to the initial state
    pub fn reset(&self) {
        *self.state.write() = MarketUiSnapshot::default();
    }
}

impl MarketUiState for MarketStore {
    fn input_dialog_open(&self) -> bool {
        self.state.read().input_dialog_open
    }

    fn set_input_dialog_open(&self, open: bool) {
        self.state.write().input_dialog_open = open;
    }

    fn success_dialog_open(&self) -> bool {
        self.state.read().success_dialog_open
    }

    fn set_success_dialog_open(&self, open: bool) {
        self.state.write().success_dialog_open = open;
    }

    fn success_dialog_transaction_id(&self) -> Option<TransactionId> {
        self.state.read().success_dialog_transaction_id
    }

    fn set_success_dialog_transaction_id(&self, transaction_id: Option<TransactionId>) {
        self.state.write().success_dialog_transaction_id = transaction_id;
    }

    fn token_amount(&self) -> TokenAmount {
        self.state.read().token_amount
    }

    fn set_token_amount(&self, amount: TokenAmount) {
        self.state.write().token_amount = amount;
    }
}
