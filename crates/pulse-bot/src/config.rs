//! Bot configuration

use crate::error::{BotError, Result};
use pulse_llm::providers::OpenAIConfig;
use pulse_market::MarketConfig;
use std::fmt;

/// Model used when `OPENAI_MODEL` is not set
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Which behavior the bot runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BotMode {
    /// Forward questions to the language model and append a live price
    Advisor,
    /// Resolve tickers in the message and reply with data and a suggestion
    #[default]
    Screener,
}

impl fmt::Display for BotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotMode::Advisor => f.write_str("advisor"),
            BotMode::Screener => f.write_str("screener"),
        }
    }
}

/// Configuration for the bot process
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub mode: BotMode,

    /// Bot token from BotFather; only the Telegram platform needs it
    pub telegram_token: Option<String>,

    /// Chat model for advisor mode
    pub model: String,

    /// Language model endpoint; required in advisor mode
    pub llm: Option<OpenAIConfig>,

    pub market: MarketConfig,
}

impl BotConfig {
    /// Create a builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }

    /// Read configuration from the environment.
    ///
    /// `TELEGRAM_BOT_TOKEN` (or the older `TELEGRAM_TOKEN`), `OPENAI_API_KEY`,
    /// `OPENAI_API_BASE`, `OPENAI_MODEL` and the `PULSE_*` market overrides.
    pub fn from_env(mode: BotMode) -> Result<Self> {
        let market = MarketConfig::builder().with_env_overrides().build()?;

        let mut builder = Self::builder().mode(mode).market(market);
        if let Some(token) = env_token() {
            builder = builder.telegram_token(token);
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            builder = builder.model(model);
        }
        if let Ok(llm) = OpenAIConfig::from_env() {
            builder = builder.llm(llm);
        }

        builder.build()
    }

    /// Check what the selected mode needs
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(BotError::ConfigError("model must not be empty".to_string()));
        }

        if self.mode == BotMode::Advisor {
            match &self.llm {
                Some(llm) if !llm.api_key.trim().is_empty() => {}
                _ => {
                    return Err(BotError::ConfigError(
                        "advisor mode needs OPENAI_API_KEY".to_string(),
                    ));
                }
            }
        }

        self.market.validate()?;
        Ok(())
    }

    /// Token for the Telegram platform
    pub fn require_telegram_token(&self) -> Result<&str> {
        self.telegram_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| BotError::ConfigError("TELEGRAM_BOT_TOKEN not set".to_string()))
    }
}

fn env_token() -> Option<String> {
    std::env::var("TELEGRAM_BOT_TOKEN")
        .or_else(|_| std::env::var("TELEGRAM_TOKEN"))
        .ok()
}

/// Builder for BotConfig
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    mode: Option<BotMode>,
    telegram_token: Option<String>,
    model: Option<String>,
    llm: Option<OpenAIConfig>,
    market: Option<MarketConfig>,
}

impl BotConfigBuilder {
    pub fn mode(mut self, mode: BotMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn telegram_token(mut self, token: impl Into<String>) -> Self {
        self.telegram_token = Some(token.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn llm(mut self, config: OpenAIConfig) -> Self {
        self.llm = Some(config);
        self
    }

    pub fn market(mut self, config: MarketConfig) -> Self {
        self.market = Some(config);
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<BotConfig> {
        let config = BotConfig {
            mode: self.mode.unwrap_or_default(),
            telegram_token: self.telegram_token,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm: self.llm,
            market: self.market.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
