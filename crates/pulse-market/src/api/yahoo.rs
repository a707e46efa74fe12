//! Yahoo Finance API client

use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::provider::{HistoryPeriod, MarketDataProvider, PriceBar, PriceHistory, TickerInfo};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use yahoo_finance_api as yahoo;

/// Yahoo Finance API client
///
/// Chart requests share one connector. quoteSummary lookups need the
/// cookie and crumb session kept by a second connector, so that one sits
/// behind a lock.
pub struct YahooFinanceClient {
    chart: yahoo::YahooConnector,
    summary: Mutex<yahoo::YahooConnector>,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new(config: &MarketConfig) -> Result<Self> {
        Ok(Self {
            chart: Self::connector(config)?,
            summary: Mutex::new(Self::connector(config)?),
        })
    }

    fn connector(config: &MarketConfig) -> Result<yahoo::YahooConnector> {
        yahoo::YahooConnector::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(yahoo_error)
    }

    /// Get daily bars for the trailing range
    pub async fn get_history(&self, symbol: &str, period: HistoryPeriod) -> Result<PriceHistory> {
        let response = self
            .chart
            .get_quote_range(symbol, "1d", period.as_range())
            .await
            .map_err(yahoo_error)?;

        let quotes = response.quotes().map_err(yahoo_error)?;

        let bars = quotes
            .iter()
            .map(|q| PriceBar {
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0).unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
            })
            .collect();

        Ok(PriceHistory::new(symbol, bars))
    }

    /// Get the most recent daily close
    pub async fn get_latest_close(&self, symbol: &str) -> Result<f64> {
        let response = self
            .chart
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(yahoo_error)?;

        let quote = response.last_quote().map_err(yahoo_error)?;

        Ok(quote.close)
    }

    /// Get descriptive fields from quoteSummary
    pub async fn get_ticker_info(&self, symbol: &str) -> Result<TickerInfo> {
        let summary = {
            let mut connector = self.summary.lock().await;
            connector.get_ticker_info(symbol).await.map_err(yahoo_error)?
        };

        ticker_info_from_summary(symbol, summary)
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    #[instrument(skip(self))]
    async fn history(&self, symbol: &str, period: HistoryPeriod) -> Result<PriceHistory> {
        self.get_history(symbol, period).await
    }

    /// quoteSummary fields; the chart API fills in a missing live price
    #[instrument(skip(self))]
    async fn info(&self, symbol: &str) -> Result<TickerInfo> {
        let mut info = self.get_ticker_info(symbol).await?;

        if info.current_price.is_none() {
            match self.get_latest_close(symbol).await {
                Ok(close) => info.current_price = Some(close),
                Err(e) => debug!("No latest close for {}: {}", symbol, e),
            }
        }

        Ok(info)
    }
}

fn yahoo_error(e: yahoo::YahooError) -> MarketError {
    MarketError::YahooFinanceError(e.to_string())
}

fn lookup_error(code: Option<String>, description: Option<String>) -> MarketError {
    MarketError::YahooFinanceError(format!(
        "{}: {}",
        code.unwrap_or_default(),
        description.unwrap_or_default()
    ))
}

fn ticker_info_from_summary(symbol: &str, summary: yahoo::YQuoteSummary) -> Result<TickerInfo> {
    if let Some(error) = summary.finance.and_then(|f| f.error) {
        return Err(lookup_error(error.code, error.description));
    }

    let quote_summary = summary
        .quote_summary
        .ok_or_else(|| MarketError::unavailable(symbol, "no quoteSummary in response"))?;

    if let Some(error) = quote_summary.error {
        return Err(lookup_error(error.code, error.description));
    }

    let data = quote_summary
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| MarketError::unavailable(symbol, "empty quoteSummary result"))?;

    let detail = data.summary_detail;

    Ok(TickerInfo {
        symbol: symbol.to_string(),
        short_name: data
            .quote_type
            .and_then(|q| q.short_name)
            .filter(|s| !s.trim().is_empty()),
        sector: data
            .asset_profile
            .and_then(|p| p.sector)
            .filter(|s| !s.trim().is_empty()),
        market_cap: detail.as_ref().and_then(|d| d.market_cap).map(|cap| cap as f64),
        trailing_pe: detail.and_then(|d| d.trailing_pe),
        current_price: data.financial_data.and_then(|f| f.current_price),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(value: serde_json::Value) -> yahoo::YQuoteSummary {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_summary() {
        let body = summary(json!({
            "quoteSummary": {
                "result": [{
                    "quoteType": {"symbol": "TCS.NS", "shortName": "TATA CONSULTANCY SERV LT"},
                    "assetProfile": {"sector": "Technology", "companyOfficers": []},
                    "summaryDetail": {"marketCap": 14_080_000_000_000_u64, "trailingPE": 29.87},
                    "financialData": {"currentPrice": 3890.5}
                }],
                "error": null
            }
        }));

        let info = ticker_info_from_summary("TCS.NS", body).unwrap();
        assert_eq!(info.symbol, "TCS.NS");
        assert_eq!(info.short_name.as_deref(), Some("TATA CONSULTANCY SERV LT"));
        assert_eq!(info.sector.as_deref(), Some("Technology"));
        assert_eq!(info.market_cap, Some(14_080_000_000_000.0));
        assert_eq!(info.trailing_pe, Some(29.87));
        assert_eq!(info.current_price, Some(3890.5));
    }

    #[test]
    fn test_missing_modules() {
        let body = summary(json!({
            "quoteSummary": {
                "result": [{
                    "quoteType": {"shortName": "  "},
                    "summaryDetail": {}
                }]
            }
        }));

        let info = ticker_info_from_summary("XYZ", body).unwrap();
        assert!(info.short_name.is_none());
        assert!(info.sector.is_none());
        assert!(info.market_cap.is_none());
        assert!(info.trailing_pe.is_none());
        assert!(info.current_price.is_none());
    }

    #[test]
    fn test_quote_not_found() {
        let body = summary(json!({
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for symbol: XXXX"}
            }
        }));

        let err = ticker_info_from_summary("XXXX", body).unwrap_err();
        assert!(err.to_string().contains("Quote not found"));
    }

    #[test]
    fn test_rejected_session() {
        let body = summary(json!({
            "finance": {
                "result": null,
                "error": {"code": "Unauthorized", "description": "Invalid Crumb"}
            }
        }));

        let err = ticker_info_from_summary("TCS.NS", body).unwrap_err();
        assert_eq!(err.to_string(), "Yahoo Finance error: Unauthorized: Invalid Crumb");
    }

    #[test]
    fn test_empty_result() {
        let body = summary(json!({"quoteSummary": {"result": []}}));
        assert!(matches!(
            ticker_info_from_summary("XXXX", body),
            Err(MarketError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_client_uses_configured_timeout() {
        let config = MarketConfig::builder()
            .request_timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap();
        assert!(YahooFinanceClient::new(&config).is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_history() {
        let client = YahooFinanceClient::new(&MarketConfig::default()).unwrap();
        let history = client
            .history("TCS.NS", HistoryPeriod::FiveDays)
            .await
            .unwrap();
        assert!(!history.is_empty());
        assert_eq!(history.symbol, "TCS.NS");
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_info_has_price() {
        let client = YahooFinanceClient::new(&MarketConfig::default()).unwrap();
        let info = client.info("RELIANCE.NS").await.unwrap();
        assert!(info.current_price.is_some());
    }
}
