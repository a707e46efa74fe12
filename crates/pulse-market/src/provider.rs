//! Market data provider abstraction and the data it returns

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trailing window of daily bars to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryPeriod {
    /// Last five trading days
    FiveDays,
    /// Last sixty trading days
    SixtyDays,
}

impl HistoryPeriod {
    /// Range string understood by the Yahoo chart API
    pub fn as_range(&self) -> &'static str {
        match self {
            HistoryPeriod::FiveDays => "5d",
            HistoryPeriod::SixtyDays => "60d",
        }
    }
}

/// One daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Daily bars for one symbol, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
}

impl PriceHistory {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices, oldest first
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// The most recent `n` bars (all of them if fewer exist)
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        &self.bars[self.bars.len().saturating_sub(n)..]
    }
}

/// Descriptive fields for a ticker; any of them may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    pub symbol: String,
    pub short_name: Option<String>,
    pub sector: Option<String>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub current_price: Option<f64>,
}

impl TickerInfo {
    /// Info record with every descriptive field missing
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }
}

/// Source of price history and descriptive info
///
/// Errors surface as [`crate::MarketError`]; an unknown symbol is either an
/// error or an empty history, callers treat both as "not found".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for the trailing `period`
    async fn history(&self, symbol: &str, period: HistoryPeriod) -> Result<PriceHistory>;

    /// Descriptive info (sector, market cap, P/E, name, live price)
    async fn info(&self, symbol: &str) -> Result<TickerInfo>;
}

/// Bars built from closing prices only, one day apart; test helper
#[cfg(test)]
pub(crate) fn history_from_closes(symbol: &str, closes: &[f64]) -> PriceHistory {
    let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            timestamp: start + chrono::Duration::days(i as i64),
            open: close,
            high: close * 1.01,
            low: close * 0.99,
            close,
            volume: 1_000,
        })
        .collect();
    PriceHistory::new(symbol, bars)
}
