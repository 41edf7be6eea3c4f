//! Checkout Amount
//!
//! Money is held in minor units (two decimal places) so formatting never goes
//! through floating point.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of minor units in one major unit
const MINOR_PER_MAJOR: u64 = 100;

/// Amount Error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Amount overflow
    #[error("Amount Overflow")]
    AmountOverflow,
    /// Invalid amount
    #[error("Invalid Amount: {0}")]
    InvalidAmount(String),
    /// More than two fractional digits
    #[error("Amount `{0}` has more than two decimal places")]
    TooPrecise(String),
}

/// Amount in minor units (satang, cents, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Amount zero
    pub const ZERO: Amount = Amount(0);

    /// Create from minor units
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Create from whole major units
    pub fn from_major(major: u64) -> Result<Self, Error> {
        major
            .checked_mul(MINOR_PER_MAJOR)
            .map(Amount)
            .ok_or(Error::AmountOverflow)
    }

    /// Minor units
    pub fn to_minor(self) -> u64 {
        self.0
    }

    /// Whether the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition for Amount. Returns None if overflow occurs.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Price for display: currency symbol, thousands separators and two decimals.
    ///
    /// ```
    /// use checkout_common::Amount;
    ///
    /// let price: Amount = "1250".parse().unwrap();
    /// assert_eq!(price.to_price_string("฿"), "฿1,250.00");
    /// ```
    pub fn to_price_string(&self, symbol: &str) -> String {
        let major = (self.0 / MINOR_PER_MAJOR).to_string();
        let mut grouped = String::with_capacity(major.len() + major.len() / 3);
        for (i, digit) in major.chars().enumerate() {
            if i > 0 && (major.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        format!("{symbol}{grouped}.{:02}", self.0 % MINOR_PER_MAJOR)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::ZERO
    }
}

/// Always two decimals, no grouping: `1250.00`
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / MINOR_PER_MAJOR,
            self.0 % MINOR_PER_MAJOR
        )
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || Error::InvalidAmount(s.to_owned());

        let (major, fraction) = match trimmed.split_once('.') {
            Some((major, fraction)) => (major, fraction),
            None => (trimmed, ""),
        };

        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > 2 {
            return Err(Error::TooPrecise(s.to_owned()));
        }

        let major: u64 = major.parse().map_err(|_| invalid())?;
        let minor: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        Amount::from_major(major)?
            .checked_add(Amount(minor))
            .ok_or(Error::AmountOverflow)
    }
}

impl From<Amount> for u64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}
