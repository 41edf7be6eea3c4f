//! Payment form tests
//!
//! Run in paused tokio time so the 5 second poll interval elapses instantly.

use std::sync::Arc;
use std::time::Duration;

use checkout::{Control, ConfirmOutcome, Error, PaymentForm, PollConfig};
use checkout_common::{
    Amount, CheckOutcome, HistoryStatus, Locale, Messages, NotificationVariant, OrderId, PayeeId,
    PaymentHistory, PaymentStatus, Route,
};
use checkout_fake::{
    FakeOrderBehavior, FakeOrderService, RecordingNavigator, RecordingNotifier,
    ScriptedStatusChecker, ORDER_NOT_FOUND,
};
use tokio::time;

const ORDER: &str = "ord_66f1c0ffee";

struct Harness {
    form: PaymentForm,
    orders: FakeOrderService,
    checker: ScriptedStatusChecker,
    notifier: RecordingNotifier,
    navigator: RecordingNavigator,
}

fn order_id() -> OrderId {
    OrderId::new(ORDER).unwrap()
}

fn total() -> Amount {
    "199.50".parse().unwrap()
}

async fn harness_with(checker: ScriptedStatusChecker, orders: FakeOrderService) -> Harness {
    orders.add_order(order_id(), total()).await.unwrap();
    let notifier = RecordingNotifier::new();
    let navigator = RecordingNavigator::new();

    let form = PaymentForm::builder()
        .order_id(order_id())
        .total(total())
        .payee(PayeeId::new("0812345678").unwrap())
        .messages(Messages::for_locale(Locale::En))
        .order_service(orders.clone())
        .status_checker(checker.clone())
        .notifier(notifier.clone())
        .navigator(navigator.clone())
        .build()
        .unwrap();

    Harness {
        form,
        orders,
        checker,
        notifier,
        navigator,
    }
}

async fn harness(checker: ScriptedStatusChecker) -> Harness {
    harness_with(checker, FakeOrderService::new()).await
}

async fn wait_for_status(form: &PaymentForm, status: PaymentStatus) {
    let mut rx = form.subscribe_status();
    rx.wait_for(|current| *current == status).await.unwrap();
}

fn statuses(history: &PaymentHistory) -> Vec<HistoryStatus> {
    history.iter().map(|entry| entry.status).collect()
}

/// Harness whose payment was already detected on the first attempt
async fn detected(orders: FakeOrderService) -> Harness {
    let h = harness_with(ScriptedStatusChecker::paid_on_attempt(1), orders).await;
    h.form.start_payment_check().await.unwrap();
    wait_for_status(&h.form, PaymentStatus::Completed).await;
    h
}

#[tokio::test(start_paused = true)]
async fn test_start_check_records_pending_and_resets_counter() {
    let h = harness(ScriptedStatusChecker::never_paid()).await;
    assert_eq!(h.form.status().await, PaymentStatus::Pending);
    assert!(h.form.history().await.is_empty());

    h.form.start_payment_check().await.unwrap();

    assert_eq!(h.form.status().await, PaymentStatus::Checking);
    assert_eq!(h.form.check_count().await, 0);
    assert_eq!(
        statuses(&h.form.history().await),
        vec![HistoryStatus::Pending]
    );
    assert_eq!(h.form.history().await.entries()[0].amount, total());
}

#[tokio::test(start_paused = true)]
async fn test_poll_waits_interval_before_each_attempt() {
    let h = harness(ScriptedStatusChecker::never_paid()).await;
    h.form.start_payment_check().await.unwrap();

    time::sleep(Duration::from_millis(4_900)).await;
    assert_eq!(h.checker.calls(), 0);

    time::sleep(Duration::from_millis(200)).await;
    assert_eq!(h.checker.calls(), 1);
    assert_eq!(h.form.check_count().await, 1);

    time::sleep(Duration::from_secs(5)).await;
    assert_eq!(h.checker.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_check_returns_to_pending() {
    let h = harness(ScriptedStatusChecker::never_paid()).await;
    h.form.start_payment_check().await.unwrap();

    wait_for_status(&h.form, PaymentStatus::Pending).await;

    assert_eq!(h.checker.calls(), 5);
    assert_eq!(h.form.check_count().await, 5);
    assert_eq!(
        statuses(&h.form.history().await),
        vec![HistoryStatus::Pending, HistoryStatus::Failed]
    );

    let notifications = h.notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].variant, NotificationVariant::Destructive);
    assert_eq!(notifications[0].title, "Payment not found");

    // nothing left running
    time::sleep(Duration::from_secs(60)).await;
    assert_eq!(h.checker.calls(), 5);
    assert_eq!(h.form.history().await.len(), 2);
    assert!(h.navigator.routes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_success_on_any_attempt_stops_the_poll() {
    for k in 1..=5 {
        let h = harness(ScriptedStatusChecker::paid_on_attempt(k)).await;
        h.form.start_payment_check().await.unwrap();

        wait_for_status(&h.form, PaymentStatus::Completed).await;

        assert_eq!(h.form.check_count().await, k);
        assert_eq!(
            statuses(&h.form.history().await),
            vec![HistoryStatus::Pending, HistoryStatus::Completed]
        );

        let last = h.notifier.last().unwrap();
        assert_eq!(last.variant, NotificationVariant::Default);
        assert_eq!(last.description, "Payment detected");

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(h.checker.calls(), k, "timer fired after success at {k}");
        assert_eq!(h.form.history().await.len(), 2);
    }
}

#[tokio::test(start_paused = true)]
async fn test_checker_errors_count_as_misses() {
    let checker = ScriptedStatusChecker::never_paid();
    checker.push_error("provider timeout").await;
    checker.push_error("provider timeout").await;
    checker.push(CheckOutcome::Paid).await;

    let h = harness(checker).await;
    h.form.start_payment_check().await.unwrap();
    wait_for_status(&h.form, PaymentStatus::Completed).await;

    assert_eq!(h.form.check_count().await, 3);
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_failure() {
    let checker = ScriptedStatusChecker::new([CheckOutcome::NotPaid; 5]);
    checker.push(CheckOutcome::NotPaid).await;
    checker.push(CheckOutcome::Paid).await;

    let h = harness(checker).await;
    h.form.start_payment_check().await.unwrap();
    wait_for_status(&h.form, PaymentStatus::Pending).await;
    assert_eq!(h.form.check_count().await, 5);

    h.form.start_payment_check().await.unwrap();
    assert_eq!(h.form.check_count().await, 0);

    wait_for_status(&h.form, PaymentStatus::Completed).await;
    assert_eq!(h.form.check_count().await, 2);
    assert_eq!(
        statuses(&h.form.history().await),
        vec![
            HistoryStatus::Pending,
            HistoryStatus::Failed,
            HistoryStatus::Pending,
            HistoryStatus::Completed
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_actions_rejected_in_wrong_status() {
    let h = harness(ScriptedStatusChecker::never_paid()).await;

    assert!(matches!(
        h.form.confirm_payment().await,
        Err(Error::InvalidStatus(PaymentStatus::Pending))
    ));

    h.form.start_payment_check().await.unwrap();
    assert!(matches!(
        h.form.start_payment_check().await,
        Err(Error::InvalidStatus(PaymentStatus::Checking))
    ));
    assert!(matches!(
        h.form.confirm_payment().await,
        Err(Error::InvalidStatus(PaymentStatus::Checking))
    ));

    // rejected actions leave no trace
    assert_eq!(h.form.history().await.len(), 1);
    assert_eq!(h.orders.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_confirm_success_navigates_and_closes() {
    let h = detected(FakeOrderService::new()).await;

    let outcome = h.form.confirm_payment().await.unwrap();
    assert_eq!(outcome, ConfirmOutcome::Confirmed);

    assert!(h.orders.is_paid(&order_id()).await);
    assert_eq!(
        statuses(&h.form.history().await),
        vec![
            HistoryStatus::Pending,
            HistoryStatus::Completed,
            HistoryStatus::Completed
        ]
    );
    assert_eq!(h.navigator.routes(), vec![Route::OrderDetail(order_id())]);
    assert_eq!(
        h.navigator.routes()[0].path(),
        format!("/account/orders/{ORDER}")
    );
    assert_eq!(h.notifier.last().unwrap().description, "Payment confirmed");

    assert!(h.form.is_closed());
    assert!(matches!(
        h.form.confirm_payment().await,
        Err(Error::Closed)
    ));
    assert!(matches!(
        h.form.start_payment_check().await,
        Err(Error::Closed)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_confirm_refused_keeps_form_open_for_retry() {
    let h = detected(FakeOrderService::new()).await;
    h.orders
        .set_behavior(
            order_id(),
            FakeOrderBehavior::Reject {
                message: Some("Order is cancelled".to_string()),
            },
        )
        .await;

    let outcome = h.form.confirm_payment().await.unwrap();
    assert_eq!(
        outcome,
        ConfirmOutcome::Rejected {
            message: "Order is cancelled".to_string()
        }
    );
    assert_eq!(
        h.form.history().await.last().map(|e| e.status),
        Some(HistoryStatus::Failed)
    );
    assert!(h.navigator.routes().is_empty());
    assert!(!h.form.is_closed());
    assert!(!h.form.is_loading().await);
    assert_eq!(h.form.status().await, PaymentStatus::Completed);

    let last = h.notifier.last().unwrap();
    assert_eq!(last.variant, NotificationVariant::Destructive);
    assert_eq!(last.title, "Error");
    assert_eq!(last.description, "Order is cancelled");

    h.orders
        .set_behavior(order_id(), FakeOrderBehavior::Accept)
        .await;
    assert!(h.form.confirm_payment().await.unwrap().is_confirmed());
    assert_eq!(h.navigator.routes().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_confirm_failure_messages() {
    let messages = Messages::for_locale(Locale::En);
    let cases = [
        (
            FakeOrderBehavior::Reject { message: None },
            messages.confirm_failed.clone(),
        ),
        (
            FakeOrderBehavior::Reject {
                message: Some("  ".to_string()),
            },
            messages.confirm_failed.clone(),
        ),
        (
            FakeOrderBehavior::Error {
                message: "database down".to_string(),
            },
            "database down".to_string(),
        ),
        (
            FakeOrderBehavior::Error {
                message: String::new(),
            },
            messages.confirm_error.clone(),
        ),
    ];

    for (behavior, expected) in cases {
        let h = detected(FakeOrderService::new().with_default_behavior(behavior)).await;

        let outcome = h.form.confirm_payment().await.unwrap();
        assert_eq!(
            outcome,
            ConfirmOutcome::Rejected {
                message: expected.clone()
            }
        );
        assert_eq!(h.notifier.last().unwrap().description, expected);
        assert_eq!(h.form.history().await.count(HistoryStatus::Failed), 1);
        assert!(h.navigator.routes().is_empty());
        assert!(!h.orders.is_paid(&order_id()).await);
    }
}

#[tokio::test(start_paused = true)]
async fn test_confirm_unknown_order() {
    let notifier = RecordingNotifier::new();
    let form = PaymentForm::builder()
        .order_id(OrderId::new("ord_missing").unwrap())
        .total(total())
        .payee(PayeeId::default())
        .messages(Messages::for_locale(Locale::En))
        .order_service(FakeOrderService::new())
        .status_checker(ScriptedStatusChecker::paid_on_attempt(1))
        .notifier(notifier.clone())
        .navigator(RecordingNavigator::new())
        .build()
        .unwrap();

    form.start_payment_check().await.unwrap();
    wait_for_status(&form, PaymentStatus::Completed).await;

    let outcome = form.confirm_payment().await.unwrap();
    assert_eq!(
        outcome,
        ConfirmOutcome::Rejected {
            message: ORDER_NOT_FOUND.to_string()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_confirm_in_flight_is_guarded() {
    let h = detected(FakeOrderService::new().with_response_delay(Duration::from_secs(2))).await;
    let form = Arc::new(h.form);

    let confirming = {
        let form = Arc::clone(&form);
        tokio::spawn(async move { form.confirm_payment().await })
    };

    while !form.is_loading().await {
        tokio::task::yield_now().await;
    }

    let view = form.render().await;
    assert_eq!(
        view.control,
        Control::Confirm {
            label: "Confirming...".to_string(),
            disabled: true
        }
    );
    assert!(matches!(
        form.confirm_payment().await,
        Err(Error::ConfirmInProgress)
    ));

    let outcome = confirming.await.unwrap().unwrap();
    assert!(outcome.is_confirmed());
    assert_eq!(h.orders.calls(), 1);
    assert!(!form.is_loading().await);
}

#[tokio::test(start_paused = true)]
async fn test_close_stops_running_check() {
    let h = harness(ScriptedStatusChecker::never_paid()).await;
    h.form.start_payment_check().await.unwrap();

    time::sleep(Duration::from_secs(7)).await;
    assert_eq!(h.checker.calls(), 1);

    h.form.close();
    time::sleep(Duration::from_secs(60)).await;

    assert_eq!(h.checker.calls(), 1);
    assert_eq!(
        statuses(&h.form.history().await),
        vec![HistoryStatus::Pending]
    );
    assert!(h.notifier.notifications().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_running_check() {
    let h = harness(ScriptedStatusChecker::never_paid()).await;
    h.form.start_payment_check().await.unwrap();

    let Harness {
        form,
        checker,
        notifier,
        ..
    } = h;
    drop(form);

    time::sleep(Duration::from_secs(60)).await;
    assert_eq!(checker.calls(), 0);
    assert!(notifier.notifications().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_history_only_grows() {
    let checker = ScriptedStatusChecker::new([CheckOutcome::NotPaid; 5]);
    checker.push(CheckOutcome::Paid).await;
    let h = harness(checker).await;
    h.orders
        .set_behavior(order_id(), FakeOrderBehavior::Reject { message: None })
        .await;

    let mut snapshots = vec![h.form.history().await];

    h.form.start_payment_check().await.unwrap();
    snapshots.push(h.form.history().await);
    wait_for_status(&h.form, PaymentStatus::Pending).await;
    snapshots.push(h.form.history().await);
    h.form.start_payment_check().await.unwrap();
    snapshots.push(h.form.history().await);
    wait_for_status(&h.form, PaymentStatus::Completed).await;
    snapshots.push(h.form.history().await);
    h.form.confirm_payment().await.unwrap();
    snapshots.push(h.form.history().await);

    for pair in snapshots.windows(2) {
        let (before, after) = (pair[0].entries(), pair[1].entries());
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], before);
    }
}

#[tokio::test(start_paused = true)]
async fn test_render_follows_status() {
    let h = harness(ScriptedStatusChecker::paid_on_attempt(2)).await;

    let view = h.form.render().await;
    assert_eq!(view.title, "Pay with PromptPay");
    assert_eq!(view.price, "฿199.50");
    assert_eq!(view.qr_value, h.form.payload());
    assert_eq!(view.qr_value.matches("199.50").count(), 1);
    assert_eq!(view.qr_options.size, 200);
    assert_eq!(view.instructions.len(), 5);
    assert!(view.history.is_empty());
    assert_eq!(
        view.control,
        Control::StartCheck {
            label: "Start checking payment".to_string(),
            disabled: false
        }
    );
    assert!(!view.to_string().contains("Check history:"));

    h.form.start_payment_check().await.unwrap();
    let view = h.form.render().await;
    assert!(matches!(view.control, Control::Checking { .. }));
    assert_eq!(view.history.len(), 1);
    assert_eq!(view.history[0].status_label, "Awaiting check");
    assert_eq!(view.history[0].amount, "฿199.50");

    wait_for_status(&h.form, PaymentStatus::Completed).await;
    let view = h.form.render().await;
    assert_eq!(
        view.control,
        Control::Confirm {
            label: "I have paid".to_string(),
            disabled: false
        }
    );

    let text = view.to_string();
    assert!(text.contains("Check history:"));
    assert!(text.contains("  5. Press the button below once the payment is done"));
    assert!(text.contains("Payment successful"));
}

#[tokio::test]
async fn test_default_messages_are_thai() {
    let form = PaymentForm::builder()
        .order_id(order_id())
        .total(total())
        .payee(PayeeId::default())
        .order_service(FakeOrderService::new())
        .notifier(RecordingNotifier::new())
        .navigator(RecordingNavigator::new())
        .build()
        .unwrap();

    let view = form.render().await;
    assert_eq!(view.title, "ชำระเงินผ่าน PromptPay");
    assert_eq!(view.instructions[1], "สแกน QR Code ด้านบน");
}

#[tokio::test]
async fn test_builder_validation() {
    let zero = PaymentForm::builder()
        .order_id(order_id())
        .total(Amount::ZERO)
        .payee(PayeeId::default())
        .order_service(FakeOrderService::new())
        .notifier(RecordingNotifier::new())
        .navigator(RecordingNavigator::new())
        .build();
    assert!(matches!(
        zero,
        Err(Error::Common(checkout_common::Error::ZeroAmount))
    ));

    let missing_service = PaymentForm::builder()
        .order_id(order_id())
        .total(total())
        .notifier(RecordingNotifier::new())
        .navigator(RecordingNavigator::new())
        .build();
    assert!(matches!(missing_service, Err(Error::Custom(_))));

    let bad_poll = PaymentForm::builder()
        .order_id(order_id())
        .total(total())
        .payee(PayeeId::default())
        .poll_config(PollConfig {
            max_attempts: 0,
            ..Default::default()
        })
        .order_service(FakeOrderService::new())
        .notifier(RecordingNotifier::new())
        .navigator(RecordingNavigator::new())
        .build();
    assert!(matches!(bad_poll, Err(Error::InvalidPollConfig(_))));
}
