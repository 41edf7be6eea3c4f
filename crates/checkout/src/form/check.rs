//! Payment status poll

use std::sync::Arc;
use std::time::Duration;

use checkout_common::{ensure_checkout, CheckOutcome, HistoryStatus, Notification, PaymentStatus};
use serde::{Deserialize, Serialize};
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::{FormInner, PaymentForm};
use crate::Error;

/// Default delay between two status checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default number of status checks before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// How the form polls the payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay before each attempt
    pub interval: Duration,
    /// Attempts before the check is reported as failed
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PollConfig {
    /// Reject configurations that could never finish a check
    pub fn validate(&self) -> Result<(), Error> {
        ensure_checkout!(
            self.max_attempts > 0,
            Error::InvalidPollConfig("max_attempts must be at least 1".to_string())
        );
        ensure_checkout!(
            !self.interval.is_zero(),
            Error::InvalidPollConfig("interval must be greater than zero".to_string())
        );
        Ok(())
    }
}

impl PaymentForm {
    /// Start checking the payment status
    ///
    /// Resets the attempt counter, records a pending history entry and spawns
    /// the poll. Only allowed while the payment is pending.
    #[instrument(skip(self), fields(form_id = %self.inner.id, order_id = %self.inner.order_id))]
    pub async fn start_payment_check(&self) -> Result<(), Error> {
        let inner = &self.inner;
        ensure_checkout!(!inner.is_closed(), Error::Closed);

        let cancel = {
            let mut state = inner.state.lock().await;
            ensure_checkout!(
                state.status == PaymentStatus::Pending,
                Error::InvalidStatus(state.status)
            );
            ensure_checkout!(!state.is_loading, Error::ConfirmInProgress);

            if let Some(previous) = state.check_cancel.take() {
                previous.cancel();
            }
            let cancel = inner.teardown.child_token();
            state.check_cancel = Some(cancel.clone());
            state.check_count = 0;
            state.history.record(HistoryStatus::Pending, inner.total);
            inner.set_status(&mut state, PaymentStatus::Checking);

            cancel
        };

        tracing::info!(
            "Started payment check, {} attempts every {:?}",
            inner.poll.max_attempts,
            inner.poll.interval
        );

        tokio::spawn(run_check(Arc::clone(inner), cancel));

        Ok(())
    }
}

/// Poll until the payment is found, the attempts run out or `cancel` fires
async fn run_check(inner: Arc<FormInner>, cancel: CancellationToken) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Payment check of form {} cancelled", inner.id);
                return;
            }
            _ = time::sleep(inner.poll.interval) => {}
        }

        let attempt = {
            let mut state = inner.state.lock().await;
            if cancel.is_cancelled() || state.status != PaymentStatus::Checking {
                return;
            }
            state.check_count += 1;
            state.check_count
        };

        let outcome = match inner
            .status_checker
            .check_payment(&inner.order_id, attempt)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!("Status check attempt {} failed: {}", attempt, err);
                CheckOutcome::NotPaid
            }
        };

        let mut state = inner.state.lock().await;
        if cancel.is_cancelled() || state.status != PaymentStatus::Checking {
            return;
        }

        if outcome.is_paid() {
            tracing::info!("Payment for order {} detected on attempt {}", inner.order_id, attempt);
            state.history.record(HistoryStatus::Completed, inner.total);
            state.check_cancel = None;
            inner.notifier.notify(Notification::success(
                &inner.messages.success_title,
                &inner.messages.payment_detected,
            ));
            inner.set_status(&mut state, PaymentStatus::Completed);
            return;
        }

        if attempt >= inner.poll.max_attempts {
            tracing::info!(
                "No payment for order {} after {} attempts",
                inner.order_id,
                attempt
            );
            state.history.record(HistoryStatus::Failed, inner.total);
            state.check_cancel = None;
            inner.notifier.notify(Notification::destructive(
                &inner.messages.payment_not_found_title,
                &inner.messages.payment_not_found,
            ));
            inner.set_status(&mut state, PaymentStatus::Pending);
            return;
        }

        tracing::debug!(
            "No payment yet, attempt {}/{}",
            attempt,
            inner.poll.max_attempts
        );
    }
}
