//! Checkout fake collaborators
//!
//! Used for testing and for running the checkout without a storefront backend.
//!
//! [`FakeOrderService`] keeps orders in memory and marks them paid on request.
//! Per order, a [`FakeOrderBehavior`] can make the service refuse the update or
//! fail outright, which is how the confirmation error paths are exercised.
//! [`ScriptedStatusChecker`] replays a fixed sequence of check outcomes so poll
//! tests do not depend on random draws.

#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use checkout_common::order;
use checkout_common::{
    Amount, CheckOutcome, Navigator, Notification, Notifier, OrderId, OrderPaymentService, Route,
    StatusChecker, UpdatePaymentResponse,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time;
use tracing::instrument;

pub mod error;

use error::Error;

/// Message returned for unknown orders
pub const ORDER_NOT_FOUND: &str = "Order not found";

/// Message returned when the order was paid before
pub const ORDER_ALREADY_PAID: &str = "Order is already paid";

/// How the fake service answers for an order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FakeOrderBehavior {
    /// Mark the order paid
    #[default]
    Accept,
    /// Answer `success: false`
    Reject {
        /// Message of the refusal
        message: Option<String>,
    },
    /// Fail the call
    Error {
        /// Error message
        message: String,
    },
}

/// Order as stored by the fake service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FakeOrder {
    /// Order total
    pub total: Amount,
    /// Whether the order was marked paid
    pub is_paid: bool,
}

/// Fake Order Service
#[derive(Debug, Clone, Default)]
pub struct FakeOrderService {
    orders: Arc<Mutex<HashMap<OrderId, FakeOrder>>>,
    behaviors: Arc<Mutex<HashMap<OrderId, FakeOrderBehavior>>>,
    default_behavior: FakeOrderBehavior,
    response_delay: Duration,
    calls: Arc<AtomicU32>,
}

impl FakeOrderService {
    /// Create new [`FakeOrderService`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every answer by `delay`
    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    /// Behaviour for orders without an override
    pub fn with_default_behavior(mut self, behavior: FakeOrderBehavior) -> Self {
        self.default_behavior = behavior;
        self
    }

    /// Add an unpaid order
    pub async fn add_order(&self, order_id: OrderId, total: Amount) -> Result<(), Error> {
        let mut orders = self.orders.lock().await;
        if orders.contains_key(&order_id) {
            return Err(Error::DuplicateOrder(order_id.to_string()));
        }
        orders.insert(
            order_id,
            FakeOrder {
                total,
                is_paid: false,
            },
        );
        Ok(())
    }

    /// Override the behaviour for one order
    pub async fn set_behavior(&self, order_id: OrderId, behavior: FakeOrderBehavior) {
        self.behaviors.lock().await.insert(order_id, behavior);
    }

    /// Stored order
    pub async fn order(&self, order_id: &OrderId) -> Option<FakeOrder> {
        self.orders.lock().await.get(order_id).cloned()
    }

    /// Whether the order was marked paid
    pub async fn is_paid(&self, order_id: &OrderId) -> bool {
        self.order(order_id)
            .await
            .map(|order| order.is_paid)
            .unwrap_or(false)
    }

    /// Number of update calls received
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderPaymentService for FakeOrderService {
    type Err = order::Error;

    #[instrument(skip(self))]
    async fn update_order_payment_status(
        &self,
        order_id: &OrderId,
    ) -> Result<UpdatePaymentResponse, Self::Err> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.response_delay.is_zero() {
            time::sleep(self.response_delay).await;
        }

        let behavior = self
            .behaviors
            .lock()
            .await
            .get(order_id)
            .cloned()
            .unwrap_or_else(|| self.default_behavior.clone());

        match behavior {
            FakeOrderBehavior::Accept => (),
            FakeOrderBehavior::Reject { message } => {
                tracing::debug!("Fake refusal for order {}", order_id);
                return Ok(UpdatePaymentResponse::refused(message));
            }
            FakeOrderBehavior::Error { message } => {
                tracing::debug!("Fake error for order {}", order_id);
                return Err(Error::Simulated(message).into());
            }
        }

        let mut orders = self.orders.lock().await;
        match orders.get_mut(order_id) {
            None => Ok(UpdatePaymentResponse::refused(Some(
                ORDER_NOT_FOUND.to_string(),
            ))),
            Some(order) if order.is_paid => Ok(UpdatePaymentResponse::refused(Some(
                ORDER_ALREADY_PAID.to_string(),
            ))),
            Some(order) => {
                order.is_paid = true;
                tracing::info!("Fake order {} marked paid ({})", order_id, order.total);
                Ok(UpdatePaymentResponse::paid())
            }
        }
    }
}

/// Status checker replaying a fixed script
///
/// Once the script is exhausted every further check answers
/// [`CheckOutcome::NotPaid`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedStatusChecker {
    script: Arc<Mutex<VecDeque<Result<CheckOutcome, String>>>>,
    calls: Arc<AtomicU32>,
}

impl ScriptedStatusChecker {
    /// Replay `outcomes` in order
    pub fn new(outcomes: impl IntoIterator<Item = CheckOutcome>) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into_iter().map(Ok).collect())),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Never finds the payment
    pub fn never_paid() -> Self {
        Self::default()
    }

    /// Finds the payment on attempt `attempt` (1-based)
    pub fn paid_on_attempt(attempt: u32) -> Self {
        let misses = attempt.saturating_sub(1) as usize;
        Self::new(
            std::iter::repeat_n(CheckOutcome::NotPaid, misses).chain([CheckOutcome::Paid]),
        )
    }

    /// Append a failing check to the script
    pub async fn push_error(&self, message: impl Into<String>) {
        self.script.lock().await.push_back(Err(message.into()));
    }

    /// Append an outcome to the script
    pub async fn push(&self, outcome: CheckOutcome) {
        self.script.lock().await.push_back(Ok(outcome));
    }

    /// Number of checks performed
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusChecker for ScriptedStatusChecker {
    async fn check_payment(
        &self,
        order_id: &OrderId,
        attempt: u32,
    ) -> Result<CheckOutcome, checkout_common::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().await.pop_front();
        tracing::debug!("Scripted check {} for {}: {:?}", attempt, order_id, next);

        match next {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(message)) => Err(checkout_common::Error::StatusCheck(message)),
            None => Ok(CheckOutcome::NotPaid),
        }
    }
}

/// Notifier keeping every notification
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<parking_lot::Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Create new [`RecordingNotifier`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    /// Most recent notification
    pub fn last(&self) -> Option<Notification> {
        self.notifications.lock().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}

/// Navigator keeping every route
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    routes: Arc<parking_lot::Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    /// Create new [`RecordingNavigator`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes navigated to so far
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }
}
