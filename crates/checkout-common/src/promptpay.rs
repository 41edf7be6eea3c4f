//! PromptPay QR payload
//!
//! The payload follows a fixed display template. It is not a valid EMVCo
//! merchant-presented QR: there is no CRC and the field lengths are not
//! recomputed, so it must not be used to move real money.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Amount, Error};

/// Environment variable holding the payee PromptPay id
pub const PROMPTPAY_ID_ENV_VAR: &str = "CHECKOUT_PROMPTPAY_ID";

/// Payee used when [`PROMPTPAY_ID_ENV_VAR`] is unset
pub const DEFAULT_PROMPTPAY_ID: &str = "0812345678";

const PAYLOAD_PREFIX: &str = "00020101021229370016A00000067701011101130066";
const PAYLOAD_COUNTRY_CURRENCY: &str = "5802TH53037646304";
const PAYLOAD_SUFFIX: &str = "6304";

/// PromptPay payee identifier (phone number or national id digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayeeId(String);

impl PayeeId {
    /// Create a new [`PayeeId`]
    pub fn new(id: impl Into<String>) -> Result<Self, Error> {
        let id = id.into();
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidPayeeId(id));
        }
        Ok(Self(id))
    }

    /// Payee from [`PROMPTPAY_ID_ENV_VAR`], falling back to [`DEFAULT_PROMPTPAY_ID`]
    pub fn from_env() -> Result<Self, Error> {
        match env::var(PROMPTPAY_ID_ENV_VAR) {
            Ok(id) if !id.trim().is_empty() => Self::new(id.trim()),
            _ => Ok(Self::default()),
        }
    }

    /// Id as str
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PayeeId {
    fn default() -> Self {
        Self(DEFAULT_PROMPTPAY_ID.to_string())
    }
}

impl FromStr for PayeeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PayeeId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PayeeId> for String {
    fn from(value: PayeeId) -> Self {
        value.0
    }
}

impl fmt::Display for PayeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level of the rendered QR code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QrErrorCorrection {
    /// ~7%
    L,
    /// ~15%
    M,
    /// ~25%
    Q,
    /// ~30%
    #[default]
    H,
}

/// Rendering hints handed to whatever draws the QR code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrRenderOptions {
    /// Edge length in pixels
    pub size: u32,
    /// Error correction level
    pub level: QrErrorCorrection,
    /// Draw the quiet zone around the code
    pub include_margin: bool,
}

impl Default for QrRenderOptions {
    fn default() -> Self {
        Self {
            size: 200,
            level: QrErrorCorrection::H,
            include_margin: true,
        }
    }
}

/// Display payload for a PromptPay transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayPayload {
    payee: PayeeId,
    amount: Amount,
}

impl PromptPayPayload {
    /// Payload for paying `amount` to `payee`
    pub fn new(payee: PayeeId, amount: Amount) -> Self {
        Self { payee, amount }
    }

    /// Payee
    pub fn payee(&self) -> &PayeeId {
        &self.payee
    }

    /// Amount
    pub fn amount(&self) -> Amount {
        self.amount
    }
}

impl fmt::Display for PromptPayPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PAYLOAD_PREFIX}{}{PAYLOAD_COUNTRY_CURRENCY}{}{PAYLOAD_SUFFIX}",
            self.payee, self.amount
        )
    }
}
