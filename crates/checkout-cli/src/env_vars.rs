//! Environment variable overrides
//!
//! Applied on top of the defaults and the config file.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use checkout_common::promptpay::PROMPTPAY_ID_ENV_VAR;
use checkout_common::Locale;

use crate::config::{FakeOrders, Poll, Settings};

pub const ENV_LOCALE: &str = "CHECKOUT_LOCALE";
pub const ENV_CURRENCY_SYMBOL: &str = "CHECKOUT_CURRENCY_SYMBOL";
pub const ENV_UTC_OFFSET_MINUTES: &str = "CHECKOUT_UTC_OFFSET_MINUTES";

// Poll
pub const ENV_POLL_INTERVAL_SECS: &str = "CHECKOUT_POLL_INTERVAL_SECS";
pub const ENV_POLL_MAX_ATTEMPTS: &str = "CHECKOUT_POLL_MAX_ATTEMPTS";
pub const ENV_POLL_SUCCESS_THRESHOLD: &str = "CHECKOUT_POLL_SUCCESS_THRESHOLD";

// Fake order service
pub const ENV_FAKE_ORDERS_RESPONSE_DELAY_MS: &str = "CHECKOUT_FAKE_ORDERS_RESPONSE_DELAY_MS";

impl Settings {
    pub fn from_env(mut self) -> Result<Self> {
        if let Ok(payee_id) = env::var(PROMPTPAY_ID_ENV_VAR) {
            if !payee_id.trim().is_empty() {
                self.promptpay.payee_id = Some(payee_id.trim().to_string());
            }
        }

        if let Ok(locale) = env::var(ENV_LOCALE) {
            self.promptpay.locale = Locale::from_str(&locale).map_err(|err| anyhow!(err))?;
        }

        if let Ok(symbol) = env::var(ENV_CURRENCY_SYMBOL) {
            self.promptpay.currency_symbol = Some(symbol);
        }

        if let Ok(offset_str) = env::var(ENV_UTC_OFFSET_MINUTES) {
            if let Ok(offset) = offset_str.parse() {
                self.promptpay.utc_offset_minutes = Some(offset);
            }
        }

        self.poll = self.poll.from_env();
        self.fake_orders = self.fake_orders.from_env();

        Ok(self)
    }
}

impl Poll {
    pub fn from_env(mut self) -> Self {
        if let Ok(interval_str) = env::var(ENV_POLL_INTERVAL_SECS) {
            if let Ok(interval) = interval_str.parse() {
                self.interval_secs = interval;
            }
        }

        if let Ok(attempts_str) = env::var(ENV_POLL_MAX_ATTEMPTS) {
            if let Ok(attempts) = attempts_str.parse() {
                self.max_attempts = attempts;
            }
        }

        if let Ok(threshold_str) = env::var(ENV_POLL_SUCCESS_THRESHOLD) {
            if let Ok(threshold) = threshold_str.parse() {
                self.success_threshold = threshold;
            }
        }

        self
    }
}

impl FakeOrders {
    pub fn from_env(mut self) -> Self {
        if let Ok(delay_str) = env::var(ENV_FAKE_ORDERS_RESPONSE_DELAY_MS) {
            if let Ok(delay) = delay_str.parse() {
                self.response_delay_ms = delay;
            }
        }

        self
    }
}
