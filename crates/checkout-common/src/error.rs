//! Errors

use thiserror::Error;

/// Checkout common Error
#[derive(Debug, Error)]
pub enum Error {
    /// Order id is empty
    #[error("Order id cannot be empty")]
    EmptyOrderId,
    /// Payee id is not a digit string
    #[error("Invalid PromptPay id `{0}`: expected digits only")]
    InvalidPayeeId(String),
    /// Checkout total must be positive
    #[error("Checkout amount must be greater than zero")]
    ZeroAmount,
    /// Unknown locale
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
    /// Status check failed
    #[error("Status check failed: {0}")]
    StatusCheck(String),
    /// Amount Error
    #[error(transparent)]
    Amount(#[from] crate::amount::Error),
}
