//! Technical indicators used by the suggestion rules

use crate::error::{MarketError, Result};
use crate::provider::PriceHistory;
use serde::{Deserialize, Serialize};
use ta::{Next, indicators::SimpleMovingAverage};

/// Bars back (inclusive of the latest) used as the change reference
pub const LOOKBACK: usize = 5;

/// Short moving-average window
pub const SMA_SHORT: usize = 5;

/// Long moving-average window
pub const SMA_LONG: usize = 50;

/// Simple moving average of the last `period` values.
///
/// `None` when fewer than `period` values exist.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }

    let mut indicator = SimpleMovingAverage::new(period).ok()?;
    values
        .iter()
        .fold(None, |_, &value| Some(indicator.next(value)))
}

/// Indicator values at the most recent bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// Latest close
    pub current: f64,
    /// Close [`LOOKBACK`] bars back, counting the latest as the first
    pub reference: f64,
    /// `current - reference`
    pub change: f64,
    /// `change / reference * 100`
    pub pct_change: f64,
    /// SMA over [`SMA_SHORT`] closes
    pub sma_short: Option<f64>,
    /// SMA over [`SMA_LONG`] closes
    pub sma_long: Option<f64>,
    /// High-low range of the last [`LOOKBACK`] bars as a percent of `current`
    pub volatility: f64,
}

impl Indicators {
    /// Compute indicators from a history with at least [`LOOKBACK`] bars
    pub fn compute(history: &PriceHistory) -> Result<Self> {
        let closes = history.closes();
        if closes.len() < LOOKBACK {
            return Err(MarketError::IndicatorError(format!(
                "need at least {LOOKBACK} closes, got {}",
                closes.len()
            )));
        }

        let current = closes[closes.len() - 1];
        let reference = closes[closes.len() - LOOKBACK];
        if reference == 0.0 || current <= 0.0 {
            return Err(MarketError::IndicatorError(format!(
                "non-positive close for {}",
                history.symbol
            )));
        }

        let change = current - reference;
        let pct_change = change / reference * 100.0;

        let recent = history.tail(LOOKBACK);
        let high = recent.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let low = recent.iter().map(|b| b.low).fold(f64::MAX, f64::min);

        Ok(Self {
            current,
            reference,
            change,
            pct_change,
            sma_short: sma(&closes, SMA_SHORT),
            sma_long: sma(&closes, SMA_LONG),
            volatility: (high - low) / current * 100.0,
        })
    }

    /// Latest close strictly above the short SMA; false when it is unavailable
    pub fn above_sma_short(&self) -> bool {
        self.sma_short.is_some_and(|avg| self.current > avg)
    }

    /// Latest close strictly above the long SMA; false when it is unavailable
    pub fn above_sma_long(&self) -> bool {
        self.sma_long.is_some_and(|avg| self.current > avg)
    }
}
