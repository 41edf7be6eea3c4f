//! Payment confirmation

use checkout_common::{ensure_checkout, HistoryStatus, Notification, PaymentStatus, Route};
use tracing::instrument;

use super::PaymentForm;
use crate::Error;

/// Result of a confirmation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Order marked paid, the buyer was sent to the order page
    Confirmed,
    /// The order service refused or failed, the form stays open
    Rejected {
        /// Message shown to the buyer
        message: String,
    },
}

impl ConfirmOutcome {
    /// Whether the order was marked paid
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ConfirmOutcome::Confirmed)
    }
}

impl PaymentForm {
    /// Confirm the detected payment with the order service
    ///
    /// Service failures are not returned as errors: they are recorded in the
    /// history, shown to the buyer and reported as [`ConfirmOutcome::Rejected`].
    /// An `Err` only means the action was not allowed right now.
    ///
    /// A refusal or error message that is empty or only whitespace is
    /// replaced by the catalog's generic text.
    #[instrument(skip(self), fields(form_id = %self.inner.id, order_id = %self.inner.order_id))]
    pub async fn confirm_payment(&self) -> Result<ConfirmOutcome, Error> {
        let inner = &self.inner;
        ensure_checkout!(!inner.is_closed(), Error::Closed);

        {
            let mut state = inner.state.lock().await;
            ensure_checkout!(
                state.status == PaymentStatus::Completed,
                Error::InvalidStatus(state.status)
            );
            ensure_checkout!(!state.is_loading, Error::ConfirmInProgress);
            state.is_loading = true;
        }

        let result = inner
            .order_service
            .update_order_payment_status(&inner.order_id)
            .await;

        let mut state = inner.state.lock().await;
        state.is_loading = false;

        if inner.is_closed() {
            tracing::warn!("Form closed while confirming order {}", inner.order_id);
            return Err(Error::Closed);
        }

        let message = match result {
            Ok(response) if response.success => {
                tracing::info!("Order {} marked paid", inner.order_id);
                state.history.record(HistoryStatus::Completed, inner.total);
                inner.notifier.notify(Notification::success(
                    &inner.messages.success_title,
                    &inner.messages.payment_confirmed,
                ));
                inner
                    .navigator
                    .navigate(Route::OrderDetail(inner.order_id.clone()));
                inner.teardown.cancel();
                return Ok(ConfirmOutcome::Confirmed);
            }
            Ok(response) => {
                tracing::warn!(
                    "Order service refused payment update: {:?}",
                    response.message
                );
                response
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| inner.messages.confirm_failed.clone())
            }
            Err(err) => {
                tracing::error!("Order service error: {}", err);
                let message = err.to_string();
                if message.trim().is_empty() {
                    inner.messages.confirm_error.clone()
                } else {
                    message
                }
            }
        };

        state.history.record(HistoryStatus::Failed, inner.total);
        inner.notifier.notify(Notification::destructive(
            &inner.messages.error_title,
            &message,
        ));

        Ok(ConfirmOutcome::Rejected { message })
    }
}
