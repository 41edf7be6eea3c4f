//! Payment form
//!
//! A [`PaymentForm`] lives for one visit of the checkout page. It owns the
//! payment status, the check counter and the history, and it is the only
//! place those change. All changes go through one mutex so a poll attempt
//! and a button press can never interleave half way.

use std::fmt;
use std::sync::Arc;

use checkout_common::order;
use checkout_common::{
    Amount, Messages, Navigator, Notifier, OrderId, OrderPaymentService, PaymentHistory,
    PaymentStatus, PromptPayPayload, QrRenderOptions, StatusChecker,
};
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::view::PaymentView;

mod builder;
mod check;
mod confirm;

pub use builder::PaymentFormBuilder;
pub use check::{PollConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
pub use confirm::ConfirmOutcome;

/// Order payment service shared with the form
pub type SharedOrderService = Arc<dyn OrderPaymentService<Err = order::Error> + Send + Sync>;

/// Mutable part of the form
#[derive(Debug, Default)]
pub(crate) struct FormState {
    pub(crate) status: PaymentStatus,
    pub(crate) history: PaymentHistory,
    pub(crate) check_count: u32,
    pub(crate) is_loading: bool,
    /// Token of the running poll, if any
    pub(crate) check_cancel: Option<CancellationToken>,
}

pub(crate) struct FormInner {
    pub(crate) id: Uuid,
    pub(crate) order_id: OrderId,
    pub(crate) total: Amount,
    pub(crate) payload: PromptPayPayload,
    pub(crate) qr: QrRenderOptions,
    pub(crate) messages: Messages,
    pub(crate) poll: PollConfig,
    pub(crate) order_service: SharedOrderService,
    pub(crate) status_checker: Arc<dyn StatusChecker + Send + Sync>,
    pub(crate) notifier: Arc<dyn Notifier + Send + Sync>,
    pub(crate) navigator: Arc<dyn Navigator + Send + Sync>,
    pub(crate) state: Mutex<FormState>,
    pub(crate) status_tx: watch::Sender<PaymentStatus>,
    /// Cancelled when the form is torn down; poll tokens are children of it
    pub(crate) teardown: CancellationToken,
}

impl FormInner {
    /// Must be called with the state lock held
    pub(crate) fn set_status(&self, state: &mut FormState, status: PaymentStatus) {
        if state.status != status {
            tracing::debug!("Payment status {} -> {}", state.status, status);
        }
        state.status = status;
        self.status_tx.send_replace(status);
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.teardown.is_cancelled()
    }
}

/// Checkout payment form of one order
pub struct PaymentForm {
    inner: Arc<FormInner>,
}

impl fmt::Debug for PaymentForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentForm")
            .field("id", &self.inner.id)
            .field("order_id", &self.inner.order_id)
            .field("total", &self.inner.total)
            .field("poll", &self.inner.poll)
            .field("closed", &self.inner.is_closed())
            .finish_non_exhaustive()
    }
}

impl PaymentForm {
    /// Create a new [`PaymentFormBuilder`]
    pub fn builder() -> PaymentFormBuilder {
        PaymentFormBuilder::new()
    }

    pub(crate) fn from_inner(inner: FormInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Form id, used to correlate log lines
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Order being paid
    pub fn order_id(&self) -> &OrderId {
        &self.inner.order_id
    }

    /// Checkout total
    pub fn total(&self) -> Amount {
        self.inner.total
    }

    /// QR payload string
    pub fn payload(&self) -> String {
        self.inner.payload.to_string()
    }

    /// QR rendering hints
    pub fn qr_options(&self) -> QrRenderOptions {
        self.inner.qr
    }

    /// Message catalog in use
    pub fn messages(&self) -> &Messages {
        &self.inner.messages
    }

    /// Poll configuration
    pub fn poll_config(&self) -> PollConfig {
        self.inner.poll
    }

    /// Current status
    pub async fn status(&self) -> PaymentStatus {
        self.inner.state.lock().await.status
    }

    /// Snapshot of the history
    pub async fn history(&self) -> PaymentHistory {
        self.inner.state.lock().await.history.clone()
    }

    /// Attempts made by the current or last check
    pub async fn check_count(&self) -> u32 {
        self.inner.state.lock().await.check_count
    }

    /// Whether a confirmation is in flight
    pub async fn is_loading(&self) -> bool {
        self.inner.state.lock().await.is_loading
    }

    /// Whether the form was torn down
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Watch status changes
    pub fn subscribe_status(&self) -> watch::Receiver<PaymentStatus> {
        self.inner.status_tx.subscribe()
    }

    /// Render model of the current state
    pub async fn render(&self) -> PaymentView {
        let state = self.inner.state.lock().await;
        PaymentView::new(&self.inner, &state)
    }

    /// Tear the form down, stopping any running check
    pub fn close(&self) {
        if !self.inner.is_closed() {
            tracing::debug!("Closing payment form {}", self.inner.id);
        }
        self.inner.teardown.cancel();
    }
}

impl Drop for PaymentForm {
    fn drop(&mut self) {
        self.inner.teardown.cancel();
    }
}
