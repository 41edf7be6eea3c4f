use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use checkout::checker::DEFAULT_SUCCESS_THRESHOLD;
use checkout::form::{DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
use checkout::{PollConfig, SimulatedStatusChecker};
use checkout_common::{Locale, Messages, PayeeId};
use checkout_fake::{FakeOrderBehavior, FakeOrderService};
use config::{Config, ConfigError, File, Source};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptPay {
    /// PromptPay id receiving the payments
    pub payee_id: Option<String>,
    pub locale: Locale,
    /// Overrides the currency symbol of the locale
    pub currency_symbol: Option<String>,
    /// Overrides the UTC offset history times are shown in
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Poll {
    pub interval_secs: u64,
    pub max_attempts: u32,
    /// Random draws above this count as paid
    pub success_threshold: f64,
}

impl Default for Poll {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FakeOrders {
    pub behavior: FakeOrderBehavior,
    pub response_delay_ms: u64,
}

impl FakeOrders {
    pub fn service(&self) -> FakeOrderService {
        FakeOrderService::new()
            .with_default_behavior(self.behavior.clone())
            .with_response_delay(Duration::from_millis(self.response_delay_ms))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub promptpay: PromptPay,
    pub poll: Poll,
    pub fake_orders: FakeOrders,
}

impl Settings {
    /// Defaults, overridden by `config_file` when given
    pub fn new(config_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        match config_file {
            Some(path) => {
                tracing::debug!("Reading config file {}", path.display());
                Self::layered(File::from(path))
            }
            None => Ok(Self::default()),
        }
    }

    fn layered<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let default = Self::default();
        let config: Config = Config::builder()
            // use defaults
            .add_source(Config::try_from(&default)?)
            // override with file contents
            .add_source(source)
            .build()?;

        config.try_deserialize()
    }

    pub fn payee(&self) -> Result<PayeeId> {
        let payee = match &self.promptpay.payee_id {
            Some(id) => PayeeId::new(id.as_str())?,
            None => PayeeId::default(),
        };
        Ok(payee)
    }

    pub fn messages(&self) -> Messages {
        let mut messages = Messages::for_locale(self.promptpay.locale);
        if let Some(symbol) = &self.promptpay.currency_symbol {
            messages.currency_symbol = symbol.clone();
        }
        if let Some(offset) = self.promptpay.utc_offset_minutes {
            messages.utc_offset_minutes = offset;
        }
        messages
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_secs(self.poll.interval_secs),
            max_attempts: self.poll.max_attempts,
        }
    }

    pub fn status_checker(&self) -> Result<SimulatedStatusChecker> {
        Ok(SimulatedStatusChecker::new(self.poll.success_threshold)?)
    }
}
