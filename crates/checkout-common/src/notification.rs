//! Notification and navigation seams

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::OrderId;

/// Visual variant of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    /// Informational or success
    #[default]
    Default,
    /// Failure
    Destructive,
}

/// Transient message shown to the buyer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Variant
    pub variant: NotificationVariant,
}

impl Notification {
    /// Success notification
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    /// Destructive notification
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    /// Whether this reports a failure
    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// Surfaces transient notifications
pub trait Notifier {
    /// Show a notification
    fn notify(&self, notification: Notification);
}

/// Navigation target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Order detail page of the buyer's account
    OrderDetail(OrderId),
}

impl Route {
    /// Path of the route
    pub fn path(&self) -> String {
        match self {
            Route::OrderDetail(order_id) => format!("/account/orders/{order_id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Moves the buyer to another view
pub trait Navigator {
    /// Navigate to `route`
    fn navigate(&self, route: Route);
}
