//! Market data fetcher: latest price, 1-day change and descriptive fields

use crate::error::{MarketError, Result};
use crate::provider::{HistoryPeriod, MarketDataProvider, TickerInfo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// Latest close and 1-day move for a ticker, with its descriptive fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub ticker: String,
    /// Latest close
    pub price: f64,
    /// Latest close minus the previous close
    pub change: f64,
    /// `change` as a percentage of the previous close
    pub pct_change: f64,
    pub info: TickerInfo,
}

pub struct MarketDataFetcher {
    provider: Arc<dyn MarketDataProvider>,
}

impl MarketDataFetcher {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Fetch a snapshot from the 5-day history and the descriptive lookup.
    ///
    /// Fields missing from a successful lookup stay `None`; a failed lookup
    /// fails the snapshot.
    #[instrument(skip(self))]
    pub async fn fetch(&self, ticker: &str) -> Result<StockSnapshot> {
        let history = self.provider.history(ticker, HistoryPeriod::FiveDays).await?;

        let closes = history.closes();
        let &[.., previous, price] = closes.as_slice() else {
            return Err(MarketError::unavailable(
                ticker,
                format!("need two closes, got {}", closes.len()),
            ));
        };
        if previous == 0.0 {
            return Err(MarketError::unavailable(ticker, "previous close is zero"));
        }

        let info = self.provider.info(ticker).await?;

        let change = price - previous;
        Ok(StockSnapshot {
            ticker: ticker.to_string(),
            price,
            change,
            pct_change: change / previous * 100.0,
            info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockMarketDataProvider, history_from_closes};

    #[tokio::test]
    async fn test_fetch_computes_one_day_change() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_history()
            .withf(|symbol, period| symbol == "TCS.NS" && *period == HistoryPeriod::FiveDays)
            .returning(|symbol, _| Ok(history_from_closes(symbol, &[90.0, 100.0, 102.5])));
        mock.expect_info().returning(|symbol| {
            Ok(TickerInfo {
                sector: Some("Technology".to_string()),
                ..TickerInfo::empty(symbol)
            })
        });

        let snapshot = MarketDataFetcher::new(Arc::new(mock))
            .fetch("TCS.NS")
            .await
            .unwrap();

        assert_eq!(snapshot.ticker, "TCS.NS");
        assert_eq!(snapshot.price, 102.5);
        assert!((snapshot.change - 2.5).abs() < 1e-9);
        assert!((snapshot.pct_change - 2.5).abs() < 1e-9);
        assert_eq!(snapshot.info.sector.as_deref(), Some("Technology"));
    }

    #[tokio::test]
    async fn test_info_failure_fails_snapshot() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_history()
            .returning(|symbol, _| Ok(history_from_closes(symbol, &[100.0, 101.0])));
        mock.expect_info()
            .returning(|_| Err(MarketError::YahooFinanceError("Invalid Crumb".to_string())));

        let result = MarketDataFetcher::new(Arc::new(mock)).fetch("TCS.NS").await;
        assert!(matches!(result, Err(MarketError::YahooFinanceError(_))));
    }

    #[tokio::test]
    async fn test_missing_fields_stay_empty() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_history()
            .returning(|symbol, _| Ok(history_from_closes(symbol, &[10.0, 11.0])));
        mock.expect_info()
            .returning(|symbol| Ok(TickerInfo::empty(symbol)));

        let snapshot = MarketDataFetcher::new(Arc::new(mock))
            .fetch("INFY.NS")
            .await
            .unwrap();
        assert_eq!(snapshot.info, TickerInfo::empty("INFY.NS"));
    }

    #[tokio::test]
    async fn test_single_close_is_unavailable() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_history()
            .returning(|symbol, _| Ok(history_from_closes(symbol, &[10.0])));
        mock.expect_info().times(0);

        let result = MarketDataFetcher::new(Arc::new(mock)).fetch("NEWCO").await;
        assert!(matches!(result, Err(MarketError::DataUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_history_error_propagates() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_history()
            .returning(|_, _| Err(MarketError::YahooFinanceError("no data".to_string())));

        let result = MarketDataFetcher::new(Arc::new(mock)).fetch("XXXX").await;
        assert!(matches!(result, Err(MarketError::YahooFinanceError(_))));
    }
}
