//! Reply text for snapshots, suggestions and the advisor price line

use crate::config::MarketConfig;
use crate::fetcher::StockSnapshot;
use crate::strategy::{Suggestion, SuggestionOutcome};
use std::fmt::Display;

/// Placeholder for a missing field
pub const NOT_AVAILABLE: &str = "N/A";

pub const INSUFFICIENT_DATA: &str = "⚠️ Not enough data to generate a trading strategy.";
pub const STRATEGY_FAILED: &str = "❌ Could not generate strategy.";
pub const NO_SYMBOLS: &str = "❌ No valid UPPERCASE stock symbols found in your message.";
pub const PRICE_UNAVAILABLE: &str = "\n⚠️ Could not fetch real-time price.";

/// Renders market data into chat replies
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    currency: String,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new("₹")
    }
}

impl ReportFormatter {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn from_config(config: &MarketConfig) -> Self {
        Self::new(config.currency.clone())
    }

    /// Snapshot block; ends with a newline
    pub fn snapshot(&self, snapshot: &StockSnapshot) -> String {
        let cur = &self.currency;
        let info = &snapshot.info;
        let market_cap = info
            .market_cap
            .map_or_else(|| NOT_AVAILABLE.to_string(), group_thousands);

        format!(
            "📈 {ticker}\n\
             Current Price: {cur}{price:.2}\n\
             Change (1d): {change:+.2} ({pct:+.2}%)\n\
             Sector: {sector}\n\
             Market Cap: {cur}{market_cap}\n\
             PE Ratio: {pe}\n",
            ticker = snapshot.ticker,
            price = snapshot.price,
            change = snapshot.change,
            pct = snapshot.pct_change,
            sector = or_na(info.sector.as_deref()),
            pe = or_na(info.trailing_pe),
        )
    }

    pub fn fetch_error(&self, ticker: &str) -> String {
        format!("❌ Error fetching data for {ticker}")
    }

    pub fn suggestion(&self, suggestion: &Suggestion) -> String {
        let cur = &self.currency;
        format!(
            "{action}\n\
             🎯 Target Price: {cur}{target:.2}\n\
             🛑 Stop Loss: {cur}{stop:.2}\n\
             📆 Suggested Holding: {holding}",
            action = suggestion.action.label(),
            target = suggestion.target,
            stop = suggestion.stop_loss,
            holding = suggestion.holding_period,
        )
    }

    pub fn outcome(&self, outcome: &SuggestionOutcome) -> String {
        match outcome {
            SuggestionOutcome::Ready(suggestion) => self.suggestion(suggestion),
            SuggestionOutcome::InsufficientData { .. } => INSUFFICIENT_DATA.to_string(),
        }
    }

    /// One screener reply: info block, then the strategy block
    pub fn report(&self, info: &str, strategy: &str) -> String {
        format!("{info}\n\n📊 {strategy}")
    }

    pub fn found(&self, tickers: &[String]) -> String {
        format!(
            "✅ Found {} stock(s): {}\nFetching data and strategy...",
            tickers.len(),
            tickers.join(", ")
        )
    }

    /// Line appended to an advisor reply after a successful lookup
    pub fn live_price(&self, name: &str, price: Option<f64>) -> String {
        format!(
            "\n\n📊 Live price for {name}: {}{}",
            self.currency,
            or_na(price)
        )
    }
}

fn or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// Whole number with comma separators, e.g. `14080000000000` -> `14,080,000,000,000`
fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
