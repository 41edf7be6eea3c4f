//! Fake Order Service Error

use thiserror::Error;

/// Fake Order Service Error
#[derive(Debug, Error)]
pub enum Error {
    /// Order already exists
    #[error("Order `{0}` already exists")]
    DuplicateOrder(String),
    /// Simulated service failure
    #[error("{0}")]
    Simulated(String),
}

impl From<Error> for checkout_common::order::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Simulated(message) => Self::Custom(message),
            other => Self::Custom(other.to_string()),
        }
    }
}
