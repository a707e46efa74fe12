//! Market data and trading suggestions for stock-pulse
//!
//! - [`TickerResolver`] turns uppercase tokens in free text into tradable
//!   tickers by probing exchange suffixes (`""`, `.NS`, `.BO`)
//! - [`MarketDataFetcher`] builds a [`StockSnapshot`] from the last five
//!   daily bars plus descriptive fields
//! - [`SuggestionEngine`] classifies a 60-day history into an [`Action`]
//!   with target and stop-loss bands
//! - [`ReportFormatter`] renders all of the above as chat text
//!
//! Data comes through the [`MarketDataProvider`] trait; [`YahooFinanceClient`]
//! is the production implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use pulse_market::{MarketConfig, SuggestionEngine, YahooFinanceClient};
//! use std::sync::Arc;
//!
//! let config = MarketConfig::default();
//! let provider = Arc::new(YahooFinanceClient::new(&config)?);
//! let engine = SuggestionEngine::new(provider);
//! let outcome = engine.generate("TCS.NS").await?;
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod formatter;
pub mod provider;
pub mod resolver;
pub mod strategy;

pub use api::YahooFinanceClient;
pub use config::MarketConfig;
pub use error::{MarketError, Result};
pub use fetcher::{MarketDataFetcher, StockSnapshot};
pub use formatter::ReportFormatter;
pub use provider::{HistoryPeriod, MarketDataProvider, PriceBar, PriceHistory, TickerInfo};
pub use resolver::{TickerResolver, extract_tokens};
pub use strategy::{Action, Suggestion, SuggestionEngine, SuggestionOutcome};
