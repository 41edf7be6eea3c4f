//! PromptPay checkout payment form
//!
//! The form shows a QR payload for an order, polls the payment status a bounded
//! number of times and, once a payment was detected, lets the buyer confirm it.
//! Confirmation marks the order paid through an
//! [`OrderPaymentService`](checkout_common::OrderPaymentService) and sends the
//! buyer to the order page.
//!
//! Status, attempt counter and history are local to one [`PaymentForm`] and
//! are dropped with it.

pub mod checker;
pub mod error;
pub mod form;
pub mod view;

pub use checker::SimulatedStatusChecker;
pub use checkout_common as common;
pub use checkout_common::{CheckOutcome, StatusChecker};
pub use error::Error;
pub use form::{ConfirmOutcome, PaymentForm, PaymentFormBuilder, PollConfig};
pub use view::{Control, HistoryRow, PaymentView};
