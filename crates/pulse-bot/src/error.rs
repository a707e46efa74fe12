//! Error types for the bot

use pulse_llm::LLMError;
use pulse_market::MarketError;
use thiserror::Error;

/// Errors raised while configuring or running the bot
#[derive(Debug, Error)]
pub enum BotError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Market data failure that was not handled per ticker
    #[error(transparent)]
    Market(#[from] MarketError),

    /// Language model failure
    #[error(transparent)]
    Llm(#[from] LLMError),

    /// Telegram API failure
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Console I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;
