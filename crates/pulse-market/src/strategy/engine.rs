//! Suggestion engine

use super::indicators::Indicators;
use super::rules::{Action, classify};
use crate::error::Result;
use crate::provider::{HistoryPeriod, MarketDataProvider, PriceHistory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Fewest daily bars a suggestion is computed from
pub const MIN_OBSERVATIONS: usize = 20;

/// Stop loss as a fraction of the latest close
pub const STOP_LOSS_RATIO: f64 = 0.95;

/// Target as a fraction of the latest close
pub const TARGET_RATIO: f64 = 1.07;

/// A trading suggestion for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub action: Action,
    pub target: f64,
    pub stop_loss: f64,
    pub holding_period: String,
    pub indicators: Indicators,
}

/// Result of evaluating a history that was fetched successfully
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SuggestionOutcome {
    Ready(Suggestion),
    InsufficientData { observations: usize },
}

/// Evaluate a price history. Pure; no I/O.
pub fn evaluate(history: &PriceHistory) -> Result<SuggestionOutcome> {
    if history.len() < MIN_OBSERVATIONS {
        return Ok(SuggestionOutcome::InsufficientData {
            observations: history.len(),
        });
    }

    let indicators = Indicators::compute(history)?;
    let action = classify(&indicators);

    debug!(
        symbol = %history.symbol,
        pct_change = indicators.pct_change,
        sma_short = ?indicators.sma_short,
        sma_long = ?indicators.sma_long,
        volatility = indicators.volatility,
        ?action,
        "Classified"
    );

    Ok(SuggestionOutcome::Ready(Suggestion {
        action,
        target: indicators.current * TARGET_RATIO,
        stop_loss: indicators.current * STOP_LOSS_RATIO,
        holding_period: action.holding_period().to_string(),
        indicators,
    }))
}

/// Fetches a 60-day history and evaluates it
pub struct SuggestionEngine {
    provider: Arc<dyn MarketDataProvider>,
}

impl SuggestionEngine {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Provider errors come back as `Err`; a short history is
    /// `Ok(InsufficientData)`
    #[instrument(skip(self))]
    pub async fn generate(&self, ticker: &str) -> Result<SuggestionOutcome> {
        let history = self
            .provider
            .history(ticker, HistoryPeriod::SixtyDays)
            .await?;
        evaluate(&history)
    }
}
