//! Checkout shared types and functions.
//!
//! This crate is the base foundation to build things that can interact with the
//! checkout payment form and its collaborators.
//!
//! It holds the shared data model (amounts, payment status, history), the
//! PromptPay display payload, the localized message catalog and the traits the
//! form uses to reach the outside world: the order payment mutation, the
//! payment status checker, the notifier and the navigator.

pub mod amount;
pub mod checker;
pub mod error;
pub mod messages;
pub mod notification;
pub mod order;
pub mod payment;
pub mod promptpay;

pub use amount::Amount;
pub use checker::{CheckOutcome, StatusChecker};
pub use error::Error;
pub use messages::{Locale, Messages};
pub use notification::{Navigator, Notification, NotificationVariant, Notifier, Route};
pub use order::{OrderId, OrderPaymentService, UpdatePaymentResponse};
pub use payment::{HistoryStatus, PaymentHistory, PaymentHistoryEntry, PaymentStatus};
pub use promptpay::{PayeeId, PromptPayPayload, QrErrorCorrection, QrRenderOptions};

/// Ensure a condition holds, returning the given error otherwise
#[macro_export]
macro_rules! ensure_checkout {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}
