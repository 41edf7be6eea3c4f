//! Errors

use checkout_common::PaymentStatus;
use thiserror::Error;

/// Checkout Error
#[derive(Debug, Error)]
pub enum Error {
    /// Action not available in the current status
    #[error("Action not allowed while payment is `{0}`")]
    InvalidStatus(PaymentStatus),
    /// A confirmation is already in flight
    #[error("Payment confirmation already in progress")]
    ConfirmInProgress,
    /// Form was torn down
    #[error("Payment form is closed")]
    Closed,
    /// Poll configuration rejected
    #[error("Invalid poll config: {0}")]
    InvalidPollConfig(String),
    /// Success threshold outside of `[0, 1]`
    #[error("Success threshold must be within [0, 1], got `{0}`")]
    InvalidThreshold(f64),
    /// Custom
    #[error("`{0}`")]
    Custom(String),
    /// Checkout common Error
    #[error(transparent)]
    Common(#[from] checkout_common::Error),
}
