//! Terminal notifier and navigator

use checkout_common::{Navigator, Notification, Notifier, Route};

/// Prints notifications to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let marker = if notification.is_destructive() {
            "!"
        } else {
            "*"
        };
        println!(
            "[{marker}] {}: {}",
            notification.title, notification.description
        );
    }
}

/// Prints the route the buyer would be sent to
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        println!("-> {}", route.path());
    }
}
