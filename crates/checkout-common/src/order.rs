//! Order payment mutation
//!
//! The checkout never owns an order. It only knows the order id and asks an
//! [`OrderPaymentService`] to flip the order's payment status once the buyer
//! confirms.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Order payment service Error
#[derive(Debug, Error)]
pub enum Error {
    /// Message reported by the service
    #[error("{0}")]
    Custom(String),
}

/// Opaque order identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new [`OrderId`]
    pub fn new(id: impl Into<String>) -> Result<Self, crate::Error> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(crate::Error::EmptyOrderId);
        }
        Ok(Self(id))
    }

    /// Id as str
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrderId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Response of an order payment status update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePaymentResponse {
    /// Whether the order is now marked paid
    pub success: bool,
    /// Reason when the update was refused
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UpdatePaymentResponse {
    /// Successful update
    pub fn paid() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Refused update
    pub fn refused(message: Option<String>) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

/// Order payment status mutation
#[async_trait]
pub trait OrderPaymentService {
    /// Order service Error
    type Err: Into<Error> + From<Error>;

    /// Mark the order as paid
    async fn update_order_payment_status(
        &self,
        order_id: &OrderId,
    ) -> Result<UpdatePaymentResponse, Self::Err>;
}
