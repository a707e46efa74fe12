//! Configuration for market data operations

use crate::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Exchange suffixes probed by the ticker resolver, in order
pub const DEFAULT_SUFFIXES: [&str; 3] = ["", ".NS", ".BO"];

/// Suffix appended to tickers named by the language model
pub const DEFAULT_ADVISOR_SUFFIX: &str = ".NS";

/// Configuration for market data operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Candidate exchange suffixes, probed in order; first hit wins
    pub suffixes: Vec<String>,

    /// Exchange suffix appended to advisor tickers
    pub advisor_suffix: String,

    /// Currency symbol used when rendering prices
    pub currency: String,

    /// Timeout applied to every market-data request
    pub request_timeout: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| (*s).to_string()).collect(),
            advisor_suffix: DEFAULT_ADVISOR_SUFFIX.to_string(),
            currency: "₹".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl MarketConfig {
    /// Create a new configuration builder
    pub fn builder() -> MarketConfigBuilder {
        MarketConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.suffixes.is_empty() {
            return Err(MarketError::ConfigError(
                "at least one exchange suffix is required (use \"\" for none)".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(MarketError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for MarketConfig
#[derive(Debug, Default)]
pub struct MarketConfigBuilder {
    suffixes: Option<Vec<String>>,
    advisor_suffix: Option<String>,
    currency: Option<String>,
    request_timeout: Option<Duration>,
}

impl MarketConfigBuilder {
    /// Set the ordered suffix candidates
    pub fn suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suffixes = Some(suffixes.into_iter().map(Into::into).collect());
        self
    }

    /// Set the advisor suffix
    pub fn advisor_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.advisor_suffix = Some(suffix.into());
        self
    }

    /// Set the currency symbol
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Apply `PULSE_SUFFIXES` (comma separated, `-` for "no suffix"),
    /// `PULSE_ADVISOR_SUFFIX` and `PULSE_CURRENCY` when set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var("PULSE_SUFFIXES") {
            self.suffixes = Some(parse_suffix_list(&raw));
        }
        if let Ok(suffix) = std::env::var("PULSE_ADVISOR_SUFFIX") {
            self.advisor_suffix = Some(suffix);
        }
        if let Ok(currency) = std::env::var("PULSE_CURRENCY") {
            self.currency = Some(currency);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MarketConfig> {
        let defaults = MarketConfig::default();

        let config = MarketConfig {
            suffixes: self.suffixes.unwrap_or(defaults.suffixes),
            advisor_suffix: self.advisor_suffix.unwrap_or(defaults.advisor_suffix),
            currency: self.currency.unwrap_or(defaults.currency),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_suffix_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .map(|s| if s == "-" { String::new() } else { s.to_string() })
        .collect()
}
