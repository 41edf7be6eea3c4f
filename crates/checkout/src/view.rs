//! Render model of the payment form
//!
//! Everything a front end needs to draw the form, already localized. The
//! [`fmt::Display`] impl gives a plain text rendering for terminals.

use std::fmt;

use checkout_common::{HistoryStatus, PaymentStatus, QrRenderOptions};
use serde::Serialize;

use crate::form::{FormInner, FormState};

/// Control shown below the instructions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Control {
    /// Button starting the status check
    StartCheck {
        /// Button label
        label: String,
        /// Disabled while a confirmation is in flight
        disabled: bool,
    },
    /// Indicator while the check runs
    Checking {
        /// Headline
        headline: String,
        /// Hint below the headline
        hint: String,
    },
    /// Button confirming the payment
    Confirm {
        /// Button label, switches while loading
        label: String,
        /// Disabled while a confirmation is in flight
        disabled: bool,
    },
}

/// One row of the history list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    /// Formatted timestamp
    pub time: String,
    /// Raw status
    pub status: HistoryStatus,
    /// Localized status
    pub status_label: String,
    /// Formatted price
    pub amount: String,
}

/// Render model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentView {
    /// Title
    pub title: String,
    /// Prompt above the QR code
    pub scan_prompt: String,
    /// Value to encode in the QR code
    pub qr_value: String,
    /// QR rendering hints
    pub qr_options: QrRenderOptions,
    /// Label above the price
    pub amount_label: String,
    /// Formatted price
    pub price: String,
    /// Heading of the instructions
    pub instructions_heading: String,
    /// Ordered instruction steps
    pub instructions: Vec<String>,
    /// Control for the current status
    pub control: Control,
    /// Heading of the history list
    pub history_heading: String,
    /// History rows, oldest first
    pub history: Vec<HistoryRow>,
    /// Labels used for history rows: time, status, amount
    #[serde(skip)]
    history_labels: [String; 3],
}

impl PaymentView {
    pub(crate) fn new(inner: &FormInner, state: &FormState) -> Self {
        let messages = &inner.messages;
        let symbol = messages.currency_symbol.as_str();

        let control = match state.status {
            PaymentStatus::Pending => Control::StartCheck {
                label: messages.start_check.clone(),
                disabled: state.is_loading,
            },
            PaymentStatus::Checking => Control::Checking {
                headline: messages.checking.clone(),
                hint: messages.checking_hint.clone(),
            },
            PaymentStatus::Completed => Control::Confirm {
                label: if state.is_loading {
                    messages.confirming.clone()
                } else {
                    messages.confirm.clone()
                },
                disabled: state.is_loading,
            },
        };

        let history = state
            .history
            .iter()
            .map(|entry| HistoryRow {
                time: messages.format_datetime(&entry.timestamp),
                status: entry.status,
                status_label: messages.history_status_label(entry.status).to_string(),
                amount: entry.amount.to_price_string(symbol),
            })
            .collect();

        Self {
            title: messages.title.clone(),
            scan_prompt: messages.scan_prompt.clone(),
            qr_value: inner.payload.to_string(),
            qr_options: inner.qr,
            amount_label: messages.amount_label.clone(),
            price: inner.total.to_price_string(symbol),
            instructions_heading: messages.instructions_heading.clone(),
            instructions: messages.instructions.clone(),
            control,
            history_heading: messages.history_heading.clone(),
            history,
            history_labels: [
                messages.history_time.clone(),
                messages.history_status.clone(),
                messages.history_amount.clone(),
            ],
        }
    }
}

impl fmt::Display for PaymentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.scan_prompt)?;
        writeln!(f, "  {}", self.qr_value)?;
        writeln!(f)?;
        writeln!(f, "{} {}", self.amount_label, self.price)?;
        writeln!(f)?;
        writeln!(f, "{}", self.instructions_heading)?;
        for (i, step) in self.instructions.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, step)?;
        }
        writeln!(f)?;

        match &self.control {
            Control::StartCheck { label, disabled } | Control::Confirm { label, disabled } => {
                let marker = if *disabled { " (disabled)" } else { "" };
                writeln!(f, "[ {label} ]{marker}")?;
            }
            Control::Checking { headline, hint } => {
                writeln!(f, "{headline}")?;
                writeln!(f, "{hint}")?;
            }
        }

        if !self.history.is_empty() {
            let [time, status, amount] = &self.history_labels;
            writeln!(f)?;
            writeln!(f, "{}", self.history_heading)?;
            for row in &self.history {
                writeln!(f, "  {time}: {}", row.time)?;
                writeln!(f, "  {status}: {}", row.status_label)?;
                writeln!(f, "  {amount}: {}", row.amount)?;
                writeln!(f, "  ---")?;
            }
        }

        Ok(())
    }
}
