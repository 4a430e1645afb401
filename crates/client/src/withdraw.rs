//! Collateral withdrawal workflow
//!
//! Withdraws a human-denominated amount of one collateral asset from the
//! connected account's position in the active market:
//!
//! 1. Scale the amount by the asset's decimals (truncating)
//! 2. Submit `withdraw_collateral` with the oracle price update, forwarding
//!    the update fee in the base asset and declaring the oracle as a
//!    dependency
//! 3. Show a pending notification while waiting for finality
//! 4. Report the outcome, update the UI state on success, and invalidate the
//!    cached collateral and balance queries in every case
//!
//! When the account, asset, collateral configurations or either contract
//! client is missing the workflow does nothing and returns `Ok(None)`.

use lendmark_core::{
    Address, AssetId, ContractHandle, KeyMatch, NotificationLifecycle, PriceUpdatePayload,
    QueryKey, TokenAmount, TransactionId, to_base_units,
};
use lendmark_ports::{
    AccountProvider, CallParams, CollateralSource, MarketContract, MarketUiState, Notifier,
    OracleContract, QueryInvalidator,
};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{GlobalConfig, MarketConfig};
use crate::error::{Error, Result};
use crate::keys::Keys;
use crate::mutation::MutationTracker;

/// Input of a single withdrawal
#[derive(Debug, Clone)]
pub struct WithdrawRequest {
    /// Human-readable amount, e.g. 12.5
    pub token_amount: TokenAmount,
    pub price_update: PriceUpdatePayload,
}

impl WithdrawRequest {
    pub fn new(token_amount: TokenAmount, price_update: PriceUpdatePayload) -> Self {
        Self {
            token_amount,
            price_update,
        }
    }
}

/// Market-level settings the workflow needs
#[derive(Debug, Clone)]
pub struct WithdrawSettings {
    /// Asset the oracle fee is forwarded in
    pub base_asset_id: AssetId,
    pub finality_timeout: Option<Duration>,
}

impl WithdrawSettings {
    pub fn new(base_asset_id: AssetId) -> Self {
        Self {
            base_asset_id,
            finality_timeout: None,
        }
    }

    pub fn from_config(market: &MarketConfig, global: &GlobalConfig) -> Self {
        Self {
            base_asset_id: market.base_asset_id,
            finality_timeout: global.finality_timeout(),
        }
    }

    pub fn with_finality_timeout(mut self, timeout: Duration) -> Self {
        self.finality_timeout = Some(timeout);
        self
    }
}

/// Everything the workflow reads from or writes to
///
/// Contract clients are optional: they are only available once the market
/// is selected and a wallet is connected.
#[derive(Clone)]
pub struct WithdrawContext {
    pub account: Arc<dyn AccountProvider>,
    pub collateral: Arc<dyn CollateralSource>,
    pub market: Option<Arc<dyn MarketContract>>,
    pub oracle: Option<Arc<dyn OracleContract>>,
    pub notifier: Arc<dyn Notifier>,
    pub cache: Arc<dyn QueryInvalidator>,
    pub ui: Arc<dyn MarketUiState>,
    pub tracker: MutationTracker,
}

/// Withdrawal of one collateral asset from the active market
pub struct WithdrawCollateral {
    ctx: WithdrawContext,
    settings: WithdrawSettings,
    asset_id: Option<AssetId>,
}

impl WithdrawCollateral {
    pub fn new(ctx: WithdrawContext, settings: WithdrawSettings, asset_id: Option<AssetId>) -> Self {
        Self {
            ctx,
            settings,
            asset_id,
        }
    }

    pub fn asset_id(&self) -> Option<AssetId> {
        self.asset_id
    }

    fn market_handle(&self) -> Option<ContractHandle> {
        self.ctx.market.as_ref().map(|m| m.handle())
    }

    fn oracle_handle(&self) -> Option<ContractHandle> {
        self.ctx.oracle.as_ref().map(|o| o.handle())
    }

    /// Identity of this withdrawal for in-flight tracking
    pub fn mutation_key(&self) -> QueryKey {
        Keys::withdraw_collateral(
            self.asset_id,
            self.ctx.account.account(),
            self.market_handle(),
            self.oracle_handle(),
        )
    }

    /// Is a withdrawal with the same identity currently running?
    pub fn is_pending(&self) -> bool {
        self.ctx.tracker.is_in_flight(&self.mutation_key())
    }

    /// Run the withdrawal
    ///
    /// Returns the transaction id on success and `None` when a precondition
    /// was missing. Failures are reported through the notifier and returned.
    pub async fn execute(&self, request: WithdrawRequest) -> Result<Option<TransactionId>> {
        let account = self.ctx.account.account();
        let _guard = self.ctx.tracker.begin(self.mutation_key());
        let mut lifecycle = NotificationLifecycle::new();

        let outcome = self.withdraw(account, &request, &mut lifecycle).await;

        match &outcome {
            Ok(Some(transaction_id)) => self.on_success(transaction_id, &mut lifecycle),
            Ok(None) => {}
            Err(e) => self.on_error(e, &mut lifecycle),
        }
        self.on_settled(account);

        outcome
    }

    async fn withdraw(
        &self,
        account: Option<Address>,
        request: &WithdrawRequest,
        lifecycle: &mut NotificationLifecycle,
    ) -> Result<Option<TransactionId>> {
        let (Some(_account), Some(asset_id), Some(registry), Some(market), Some(oracle)) = (
            account,
            self.asset_id,
            self.ctx.collateral.collateral_configurations(),
            self.ctx.market.as_ref(),
            self.ctx.oracle.as_ref(),
        ) else {
            return Ok(None);
        };

        let decimals = registry.decimals(&asset_id)?;
        let amount = to_base_units(request.token_amount, decimals)?;
        debug!(
            "Withdrawing {} ({} base units) of {}",
            request.token_amount, amount, asset_id
        );

        let params = CallParams::new()
            .forward(request.price_update.update_fee, self.settings.base_asset_id)
            .add_contract(oracle.handle().contract_id);

        let pending = market
            .withdraw_collateral(asset_id, amount, &request.price_update, params)
            .await?;
        let transaction_id = pending.transaction_id();
        info!("Withdrawal submitted: tx={}", transaction_id);

        if lifecycle.pending().is_ok() {
            self.ctx.notifier.pending();
        }

        let receipt = match self.settings.finality_timeout {
            Some(timeout) => tokio::time::timeout(timeout, pending.wait_for_result())
                .await
                .map_err(|_| Error::FinalityTimeout {
                    transaction_id,
                    timeout_ms: timeout.as_millis() as u64,
                })??,
            None => pending.wait_for_result().await?,
        };

        info!(
            "Withdrawal finalized: tx={} at {}",
            receipt.transaction_id, receipt.finalized_at
        );
        Ok(Some(receipt.transaction_id))
    }

    fn on_success(&self, transaction_id: &TransactionId, lifecycle: &mut NotificationLifecycle) {
        if lifecycle.succeed().is_ok() {
            self.ctx.notifier.success(transaction_id);
        }

        let ui = &self.ctx.ui;
        ui.set_success_dialog_transaction_id(Some(*transaction_id));
        ui.set_input_dialog_open(false);
        ui.set_token_amount(Decimal::ZERO);
        ui.set_success_dialog_open(true);
    }

    fn on_error(&self, error: &Error, lifecycle: &mut NotificationLifecycle) {
        warn!("Withdrawal failed: {}", error);
        if lifecycle.fail().is_ok() {
            self.ctx.notifier.error(&error.to_string());
        }
    }

    fn on_settled(&self, account: Option<Address>) {
        let collateral_key = Keys::collateral_assets(account, self.market_handle());
        let balance_key = Keys::balance(account, self.asset_id);

        let stale = self.ctx.cache.invalidate(&collateral_key, KeyMatch::Prefix)
            + self.ctx.cache.invalidate(&balance_key, KeyMatch::Exact);
        if stale > 0 {
            debug!("Invalidated {} cached queries", stale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lendmark_core::{
        BaseUnits, Bits256, CollateralConfiguration, CollateralRegistry, KeyPart,
    };
    use lendmark_ports::{ContractError, ContractResult, PendingTransaction, TransactionReceipt};
    use parking_lot::Mutex;
    use rust_decimal_macros::dec;

    fn id(byte: u8) -> Bits256 {
        Bits256([byte; 32])
    }

    const ACCOUNT: u8 = 1;
    const ASSET: u8 = 5;
    const BASE_ASSET: u8 = 6;
    const MARKET_ID: u8 = 3;
    const ORACLE_ID: u8 = 4;
    const TX: u8 = 0xaa;

    /// Everything observable, in call order
    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Submitted {
            asset_id: AssetId,
            amount: String,
            params: CallParams,
        },
        Pending,
        Success(TransactionId),
        Error(String),
        SetTransactionId(Option<TransactionId>),
        SetInputOpen(bool),
        SetAmount(Decimal),
        SetSuccessOpen(bool),
        Invalidate(QueryKey, KeyMatch),
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<Event>>,
    }

    impl Recorder {
        fn push(&self, event: Event) {
            self.events.lock().push(event);
        }

        fn events(&self) -> Vec<Event> {
            self.events.lock().clone()
        }
    }

    struct Account(Option<Address>);

    impl AccountProvider for Account {
        fn account(&self) -> Option<Address> {
            self.0
        }
    }

    struct Collateral(Option<Arc<CollateralRegistry>>);

    impl CollateralSource for Collateral {
        fn collateral_configurations(&self) -> Option<Arc<CollateralRegistry>> {
            self.0.clone()
        }
    }

    enum Behavior {
        Finalize,
        RejectSubmit,
        FailFinality,
        Hang,
    }

    struct Market {
        recorder: Arc<Recorder>,
        behavior: Behavior,
    }

    struct Pending {
        fail: bool,
        hang: bool,
    }

    #[async_trait]
    impl PendingTransaction for Pending {
        fn transaction_id(&self) -> TransactionId {
            id(TX)
        }

        async fn wait_for_result(self: Box<Self>) -> ContractResult<TransactionReceipt> {
            if self.hang {
                std::future::pending::<()>().await;
            }
            if self.fail {
                return Err(ContractError::Reverted("NotCollateralized".to_string()));
            }
            Ok(TransactionReceipt {
                transaction_id: id(TX),
                finalized_at: chrono::Utc::now(),
            })
        }
    }

    #[async_trait]
    impl MarketContract for Market {
        fn handle(&self) -> ContractHandle {
            ContractHandle::new(id(ACCOUNT), id(MARKET_ID))
        }

        async fn withdraw_collateral(
            &self,
            asset_id: AssetId,
            amount: BaseUnits,
            _price_update: &PriceUpdatePayload,
            params: CallParams,
        ) -> ContractResult<Box<dyn PendingTransaction>> {
            self.recorder.push(Event::Submitted {
                asset_id,
                amount: amount.to_string(),
                params,
            });
            match self.behavior {
                Behavior::RejectSubmit => Err(ContractError::Provider("node offline".to_string())),
                Behavior::Finalize => Ok(Box::new(Pending {
                    fail: false,
                    hang: false,
                })),
                Behavior::FailFinality => Ok(Box::new(Pending {
                    fail: true,
                    hang: false,
                })),
                Behavior::Hang => Ok(Box::new(Pending {
                    fail: false,
                    hang: true,
                })),
            }
        }
    }

    struct Oracle;

    impl OracleContract for Oracle {
        fn handle(&self) -> ContractHandle {
            ContractHandle::new(id(ACCOUNT), id(ORACLE_ID))
        }
    }

    struct Feedback(Arc<Recorder>);

    impl Notifier for Feedback {
        fn pending(&self) {
            self.0.push(Event::Pending);
        }

        fn success(&self, transaction_id: &TransactionId) {
            self.0.push(Event::Success(*transaction_id));
        }

        fn error(&self, message: &str) {
            self.0.push(Event::Error(message.to_string()));
        }
    }

    impl QueryInvalidator for Feedback {
        fn invalidate(&self, key: &QueryKey, mode: KeyMatch) -> usize {
            self.0.push(Event::Invalidate(key.clone(), mode));
            0
        }
    }

    impl MarketUiState for Feedback {
        fn input_dialog_open(&self) -> bool {
            true
        }

        fn set_input_dialog_open(&self, open: bool) {
            self.0.push(Event::SetInputOpen(open));
        }

        fn success_dialog_open(&self) -> bool {
            false
        }

        fn set_success_dialog_open(&self, open: bool) {
            self.0.push(Event::SetSuccessOpen(open));
        }

        fn success_dialog_transaction_id(&self) -> Option<TransactionId> {
            None
        }

        fn set_success_dialog_transaction_id(&self, transaction_id: Option<TransactionId>) {
            self.0.push(Event::SetTransactionId(transaction_id));
        }

        fn token_amount(&self) -> TokenAmount {
            Decimal::ZERO
        }

        fn set_token_amount(&self, amount: TokenAmount) {
            self.0.push(Event::SetAmount(amount));
        }
    }

    fn registry(decimals: u32) -> Arc<CollateralRegistry> {
        Arc::new(CollateralRegistry::new().with(CollateralConfiguration {
            asset_id: id(ASSET),
            price_feed_id: id(9),
            decimals,
            borrow_collateral_factor: dec!(0.75),
            liquidate_collateral_factor: dec!(0.8),
            liquidation_penalty: dec!(0.9),
            supply_cap: u64::MAX,
            paused: false,
        }))
    }

    struct Setup {
        account: Option<Address>,
        registry: Option<Arc<CollateralRegistry>>,
        with_market: bool,
        with_oracle: bool,
        asset_id: Option<AssetId>,
        behavior: Behavior,
        timeout: Option<Duration>,
    }

    impl Default for Setup {
        fn default() -> Self {
            Self {
                account: Some(id(ACCOUNT)),
                registry: Some(registry(6)),
                with_market: true,
                with_oracle: true,
                asset_id: Some(id(ASSET)),
                behavior: Behavior::Finalize,
                timeout: None,
            }
        }
    }

    impl Setup {
        fn build(self) -> (WithdrawCollateral, Arc<Recorder>) {
            let recorder = Arc::new(Recorder::default());
            let feedback = Arc::new(Feedback(recorder.clone()));
            let market: Option<Arc<dyn MarketContract>> = if self.with_market {
                Some(Arc::new(Market {
                    recorder: recorder.clone(),
                    behavior: self.behavior,
                }))
            } else {
                None
            };
            let oracle: Option<Arc<dyn OracleContract>> = if self.with_oracle {
                Some(Arc::new(Oracle))
            } else {
                None
            };
            let ctx = WithdrawContext {
                account: Arc::new(Account(self.account)),
                collateral: Arc::new(Collateral(self.registry)),
                market,
                oracle,
                notifier: feedback.clone(),
                cache: feedback.clone(),
                ui: feedback,
                tracker: MutationTracker::new(),
            };
            let mut settings = WithdrawSettings::new(id(BASE_ASSET));
            settings.finality_timeout = self.timeout;
            (
                WithdrawCollateral::new(ctx, settings, self.asset_id),
                recorder,
            )
        }
    }

    fn request(amount: Decimal) -> WithdrawRequest {
        WithdrawRequest::new(amount, PriceUpdatePayload::new(7))
    }

    fn settlement_events(account: Option<Address>, market: bool) -> Vec<Event> {
        let market = market.then(|| ContractHandle::new(id(ACCOUNT), id(MARKET_ID)));
        vec![
            Event::Invalidate(Keys::collateral_assets(account, market), KeyMatch::Prefix),
            Event::Invalidate(Keys::balance(account, Some(id(ASSET))), KeyMatch::Exact),
        ]
    }

    #[tokio::test]
    async fn test_success_flow_in_order() {
        let (workflow, recorder) = Setup::default().build();

        let result = workflow.execute(request(dec!(12.5))).await;
        assert_eq!(result, Ok(Some(id(TX))));

        let mut expected = vec![
            Event::Submitted {
                asset_id: id(ASSET),
                amount: "12500000".to_string(),
                params: CallParams::new()
                    .forward(7, id(BASE_ASSET))
                    .add_contract(id(ORACLE_ID)),
            },
            Event::Pending,
            Event::Success(id(TX)),
            Event::SetTransactionId(Some(id(TX))),
            Event::SetInputOpen(false),
            Event::SetAmount(Decimal::ZERO),
            Event::SetSuccessOpen(true),
        ];
        expected.extend(settlement_events(Some(id(ACCOUNT)), true));
        assert_eq!(recorder.events(), expected);
    }

    #[tokio::test]
    async fn test_zero_amount_still_submits() {
        let (workflow, recorder) = Setup {
            registry: Some(registry(9)),
            ..Default::default()
        }
        .build();

        assert_eq!(workflow.execute(request(dec!(0))).await, Ok(Some(id(TX))));
        assert!(matches!(
            &recorder.events()[0],
            Event::Submitted { amount, .. } if amount == "0"
        ));
    }

    #[tokio::test]
    async fn test_missing_account_skips() {
        let (workflow, recorder) = Setup {
            account: None,
            ..Default::default()
        }
        .build();

        assert_eq!(workflow.execute(request(dec!(1))).await, Ok(None));
        // Only the settlement invalidations, with the account slot absent
        assert_eq!(recorder.events(), settlement_events(None, true));
        let Event::Invalidate(key, _) = &recorder.events()[1] else {
            panic!("expected invalidation");
        };
        assert_eq!(key.parts()[1], KeyPart::Absent);
    }

    #[tokio::test]
    async fn test_each_missing_precondition_skips() {
        let setups = [
            Setup {
                asset_id: None,
                ..Default::default()
            },
            Setup {
                registry: None,
                ..Default::default()
            },
            Setup {
                with_market: false,
                ..Default::default()
            },
            Setup {
                with_oracle: false,
                ..Default::default()
            },
        ];

        for setup in setups {
            let (workflow, recorder) = setup.build();
            assert_eq!(workflow.execute(request(dec!(1))).await, Ok(None));

            let events = recorder.events();
            assert_eq!(events.len(), 2);
            assert!(events.iter().all(|e| matches!(e, Event::Invalidate(..))));
        }
    }

    #[tokio::test]
    async fn test_submit_failure_reports_error() {
        let (workflow, recorder) = Setup {
            behavior: Behavior::RejectSubmit,
            ..Default::default()
        }
        .build();

        let err = workflow.execute(request(dec!(1))).await.unwrap_err();
        assert_eq!(
            err,
            Error::Contract(ContractError::Provider("node offline".to_string()))
        );

        let events = recorder.events();
        assert!(matches!(events[0], Event::Submitted { .. }));
        assert_eq!(
            events[1],
            Event::Error("Provider error: node offline".to_string())
        );
        assert_eq!(&events[2..], settlement_events(Some(id(ACCOUNT)), true));
    }

    #[tokio::test]
    async fn test_finality_failure_after_pending() {
        let (workflow, recorder) = Setup {
            behavior: Behavior::FailFinality,
            ..Default::default()
        }
        .build();

        assert!(workflow.execute(request(dec!(1))).await.is_err());

        let events = recorder.events();
        assert_eq!(events[1], Event::Pending);
        assert_eq!(
            events[2],
            Event::Error("Transaction reverted: NotCollateralized".to_string())
        );
        assert_eq!(events.len(), 5);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, Event::SetInputOpen(_) | Event::Success(_)))
        );
    }

    #[tokio::test]
    async fn test_unknown_asset_is_failure() {
        let (workflow, recorder) = Setup {
            asset_id: Some(id(0x42)),
            ..Default::default()
        }
        .build();

        let err = workflow.execute(request(dec!(1))).await.unwrap_err();
        assert!(matches!(err, Error::UnknownCollateral(_)));

        let events = recorder.events();
        assert!(matches!(&events[0], Event::Error(msg) if msg.starts_with("Collateral asset not found")));
        assert!(!events.iter().any(|e| matches!(e, Event::Submitted { .. })));
    }

    #[tokio::test]
    async fn test_negative_amount_is_failure() {
        let (workflow, recorder) = Setup::default().build();

        let err = workflow.execute(request(dec!(-1))).await.unwrap_err();
        assert!(matches!(err, Error::Scale(_)));
        assert!(!recorder
            .events()
            .iter()
            .any(|e| matches!(e, Event::Submitted { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_finality_timeout() {
        let (workflow, recorder) = Setup {
            behavior: Behavior::Hang,
            timeout: Some(Duration::from_secs(30)),
            ..Default::default()
        }
        .build();

        let err = workflow.execute(request(dec!(1))).await.unwrap_err();
        assert_eq!(
            err,
            Error::FinalityTimeout {
                transaction_id: id(TX),
                timeout_ms: 30_000
            }
        );
        assert!(matches!(&recorder.events()[2], Event::Error(msg) if msg.starts_with("Timed out")));
    }

    #[tokio::test]
    async fn test_in_flight_tracking() {
        let (workflow, _recorder) = Setup::default().build();

        assert!(!workflow.is_pending());
        workflow.execute(request(dec!(1))).await.unwrap();
        assert!(!workflow.is_pending());
        assert_eq!(workflow.ctx.tracker.total(), 0);
    }

    #[test]
    fn test_mutation_key_identity() {
        let (workflow, _recorder) = Setup::default().build();
        let key = workflow.mutation_key();

        assert_eq!(
            key,
            Keys::withdraw_collateral(
                Some(id(ASSET)),
                Some(id(ACCOUNT)),
                Some(ContractHandle::new(id(ACCOUNT), id(MARKET_ID))),
                Some(ContractHandle::new(id(ACCOUNT), id(ORACLE_ID))),
            )
        );
    }
}
