//! Payment status and history

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Amount;

/// Status of the payment form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Waiting for the buyer to start a check
    #[default]
    Pending,
    /// Status poll running
    Checking,
    /// Payment detected, waiting for confirmation
    Completed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Checking => write!(f, "checking"),
            PaymentStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "checking" => Ok(PaymentStatus::Checking),
            "completed" => Ok(PaymentStatus::Completed),
            _ => Err(format!("Unknown payment status: {}", s)),
        }
    }
}

/// Status recorded in a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    /// A check was started
    Pending,
    /// Payment detected or confirmed
    Completed,
    /// Check exhausted or confirmation refused
    Failed,
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryStatus::Pending => write!(f, "pending"),
            HistoryStatus::Completed => write!(f, "completed"),
            HistoryStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One status-check or confirmation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentHistoryEntry {
    /// When the attempt was recorded
    pub timestamp: DateTime<Utc>,
    /// Outcome
    pub status: HistoryStatus,
    /// Amount of the checkout
    pub amount: Amount,
}

impl PaymentHistoryEntry {
    /// Entry stamped with the current time
    pub fn now(status: HistoryStatus, amount: Amount) -> Self {
        Self {
            timestamp: Utc::now(),
            status,
            amount,
        }
    }
}

/// Append-only payment history
///
/// Entries are never removed or reordered, so the length only grows for the
/// lifetime of the form that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PaymentHistory {
    entries: Vec<PaymentHistoryEntry>,
}

impl PaymentHistory {
    /// Empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn push(&mut self, entry: PaymentHistoryEntry) {
        self.entries.push(entry);
    }

    /// Append an entry stamped now
    pub fn record(&mut self, status: HistoryStatus, amount: Amount) {
        self.push(PaymentHistoryEntry::now(status, amount));
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[PaymentHistoryEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry was recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with the given status
    pub fn count(&self, status: HistoryStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&PaymentHistoryEntry> {
        self.entries.last()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, PaymentHistoryEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a PaymentHistory {
    type Item = &'a PaymentHistoryEntry;
    type IntoIter = std::slice::Iter<'a, PaymentHistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
