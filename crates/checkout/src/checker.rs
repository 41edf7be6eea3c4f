//! Simulated payment status checker
//!
//! Stands in for a real verification backend: each attempt draws a uniform
//! random number and reports the payment as arrived when the draw is strictly
//! above the threshold.

use async_trait::async_trait;
use checkout_common::{CheckOutcome, OrderId, StatusChecker};
use tracing::instrument;

use crate::Error;

/// Default success threshold, roughly a 30% chance per attempt
pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 0.7;

/// Random payment status checker
#[derive(Debug, Clone, Copy)]
pub struct SimulatedStatusChecker {
    threshold: f64,
}

impl SimulatedStatusChecker {
    /// Create a new [`SimulatedStatusChecker`]
    pub fn new(threshold: f64) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    /// Success threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn outcome(&self, draw: f64) -> CheckOutcome {
        if draw > self.threshold {
            CheckOutcome::Paid
        } else {
            CheckOutcome::NotPaid
        }
    }
}

impl Default for SimulatedStatusChecker {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SUCCESS_THRESHOLD,
        }
    }
}

#[async_trait]
impl StatusChecker for SimulatedStatusChecker {
    #[instrument(skip(self))]
    async fn check_payment(
        &self,
        order_id: &OrderId,
        attempt: u32,
    ) -> Result<CheckOutcome, checkout_common::Error> {
        let draw: f64 = rand::random();
        let outcome = self.outcome(draw);
        tracing::debug!("Simulated draw {:.3} -> {:?}", draw, outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_bounds() {
        assert!(SimulatedStatusChecker::new(0.0).is_ok());
        assert!(SimulatedStatusChecker::new(1.0).is_ok());
        assert!(matches!(
            SimulatedStatusChecker::new(1.5),
            Err(Error::InvalidThreshold(_))
        ));
        assert!(matches!(
            SimulatedStatusChecker::new(-0.1),
            Err(Error::InvalidThreshold(_))
        ));
        assert!(SimulatedStatusChecker::new(f64::NAN).is_err());
    }

    #[test]
    fn test_draw_must_exceed_threshold() {
        let checker = SimulatedStatusChecker::default();
        assert_eq!(checker.outcome(0.7), CheckOutcome::NotPaid);
        assert_eq!(checker.outcome(0.2), CheckOutcome::NotPaid);
        assert_eq!(checker.outcome(0.71), CheckOutcome::Paid);
    }

    #[tokio::test]
    async fn test_threshold_one_never_pays() {
        let checker = SimulatedStatusChecker::new(1.0).unwrap();
        let order_id = OrderId::new("ord_1").unwrap();
        for attempt in 1..=20 {
            let outcome = checker.check_payment(&order_id, attempt).await.unwrap();
            assert_eq!(outcome, CheckOutcome::NotPaid);
        }
    }
}
