use std::sync::Arc;

use checkout_common::order;
use checkout_common::{
    ensure_checkout, Amount, Messages, Navigator, Notifier, OrderId, OrderPaymentService,
    PayeeId, PaymentStatus, PromptPayPayload, QrRenderOptions, StatusChecker,
};
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{FormInner, FormState, PaymentForm, PollConfig, SharedOrderService};
use crate::checker::SimulatedStatusChecker;
use crate::Error;

/// Builder for creating a new [`PaymentForm`]
#[allow(missing_debug_implementations)]
#[derive(Default)]
pub struct PaymentFormBuilder {
    order_id: Option<OrderId>,
    total: Option<Amount>,
    payee: Option<PayeeId>,
    messages: Option<Messages>,
    poll: PollConfig,
    qr: QrRenderOptions,
    order_service: Option<SharedOrderService>,
    status_checker: Option<Arc<dyn StatusChecker + Send + Sync>>,
    notifier: Option<Arc<dyn Notifier + Send + Sync>>,
    navigator: Option<Arc<dyn Navigator + Send + Sync>>,
}

impl PaymentFormBuilder {
    /// Create a new PaymentFormBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the order being paid
    pub fn order_id(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Set the checkout total
    pub fn total(mut self, total: Amount) -> Self {
        self.total = Some(total);
        self
    }

    /// Set the payee, defaults to [`PayeeId::from_env`]
    pub fn payee(mut self, payee: PayeeId) -> Self {
        self.payee = Some(payee);
        self
    }

    /// Set the message catalog, defaults to Thai
    pub fn messages(mut self, messages: Messages) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Set the poll configuration
    pub fn poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Set the QR rendering hints
    pub fn qr_options(mut self, qr: QrRenderOptions) -> Self {
        self.qr = qr;
        self
    }

    /// Set the order payment service
    pub fn order_service<S>(mut self, order_service: S) -> Self
    where
        S: OrderPaymentService<Err = order::Error> + Send + Sync + 'static,
    {
        self.order_service = Some(Arc::new(order_service));
        self
    }

    /// Set the order payment service from Arc
    pub fn shared_order_service(mut self, order_service: SharedOrderService) -> Self {
        self.order_service = Some(order_service);
        self
    }

    /// Set the status checker, defaults to [`SimulatedStatusChecker`]
    pub fn status_checker<C: StatusChecker + Send + Sync + 'static>(mut self, checker: C) -> Self {
        self.status_checker = Some(Arc::new(checker));
        self
    }

    /// Set the status checker from Arc
    pub fn shared_status_checker(mut self, checker: Arc<dyn StatusChecker + Send + Sync>) -> Self {
        self.status_checker = Some(checker);
        self
    }

    /// Set the notifier
    pub fn notifier<N: Notifier + Send + Sync + 'static>(mut self, notifier: N) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    /// Set the notifier from Arc
    pub fn shared_notifier(mut self, notifier: Arc<dyn Notifier + Send + Sync>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set the navigator
    pub fn navigator<N: Navigator + Send + Sync + 'static>(mut self, navigator: N) -> Self {
        self.navigator = Some(Arc::new(navigator));
        self
    }

    /// Set the navigator from Arc
    pub fn shared_navigator(mut self, navigator: Arc<dyn Navigator + Send + Sync>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Build the form
    pub fn build(self) -> Result<PaymentForm, Error> {
        let order_id = self
            .order_id
            .ok_or(Error::Custom("Order id required".to_string()))?;
        let total = self
            .total
            .ok_or(Error::Custom("Total required".to_string()))?;
        ensure_checkout!(!total.is_zero(), checkout_common::Error::ZeroAmount.into());

        let order_service = self
            .order_service
            .ok_or(Error::Custom("Order service required".to_string()))?;
        let notifier = self
            .notifier
            .ok_or(Error::Custom("Notifier required".to_string()))?;
        let navigator = self
            .navigator
            .ok_or(Error::Custom("Navigator required".to_string()))?;

        self.poll.validate()?;

        let payee = match self.payee {
            Some(payee) => payee,
            None => PayeeId::from_env()?,
        };
        let status_checker = self
            .status_checker
            .unwrap_or_else(|| Arc::new(SimulatedStatusChecker::default()));

        let (status_tx, _) = watch::channel(PaymentStatus::Pending);
        let id = Uuid::new_v4();

        tracing::debug!(
            "Created payment form {} for order {} ({})",
            id,
            order_id,
            total
        );

        Ok(PaymentForm::from_inner(FormInner {
            id,
            payload: PromptPayPayload::new(payee, total),
            order_id,
            total,
            qr: self.qr,
            messages: self.messages.unwrap_or_default(),
            poll: self.poll,
            order_service,
            status_checker,
            notifier,
            navigator,
            state: Mutex::new(FormState::default()),
            status_tx,
            teardown: CancellationToken::new(),
        }))
    }
}
