//! Payment status verification seam
//!
//! How a transfer is actually verified (provider polling, webhook, bank
//! statement) is not decided here. The form only asks once per poll attempt
//! whether the order has been paid.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Error, OrderId};

/// Result of one status check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Payment arrived
    Paid,
    /// Nothing yet
    NotPaid,
}

impl CheckOutcome {
    /// Whether the payment arrived
    pub fn is_paid(&self) -> bool {
        matches!(self, CheckOutcome::Paid)
    }
}

/// Checks whether an order has been paid
#[async_trait]
pub trait StatusChecker {
    /// Check the payment of `order_id`; `attempt` starts at 1
    async fn check_payment(&self, order_id: &OrderId, attempt: u32)
        -> Result<CheckOutcome, Error>;
}
