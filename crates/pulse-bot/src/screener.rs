//! Screener mode: resolve symbols, then reply with data and a suggestion
//! for each one

use crate::config::BotMode;
use crate::error::Result;
use crate::reply::ReplySink;
use crate::router::ChatHandler;
use async_trait::async_trait;
use pulse_market::formatter::{NO_SYMBOLS, STRATEGY_FAILED};
use pulse_market::{
    MarketConfig, MarketDataFetcher, MarketDataProvider, ReportFormatter, SuggestionEngine,
    TickerResolver,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

pub const SCREENER_WELCOME: &str =
    "Hi! Send UPPERCASE stock symbols like TCS, TSLA, RELIANCE in your message.";

pub struct ScreenerHandler {
    resolver: TickerResolver,
    fetcher: MarketDataFetcher,
    engine: SuggestionEngine,
    formatter: ReportFormatter,
}

impl ScreenerHandler {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: &MarketConfig) -> Self {
        Self {
            resolver: TickerResolver::new(Arc::clone(&provider), config),
            fetcher: MarketDataFetcher::new(Arc::clone(&provider)),
            engine: SuggestionEngine::new(provider),
            formatter: ReportFormatter::from_config(config),
        }
    }

    /// Snapshot and suggestion for one resolved ticker.
    ///
    /// Each half fails on its own into a fixed line, so this never errors.
    #[instrument(skip(self))]
    pub async fn report(&self, ticker: &str) -> String {
        let info = match self.fetcher.fetch(ticker).await {
            Ok(snapshot) => self.formatter.snapshot(&snapshot),
            Err(e) => {
                error!("Error fetching {}: {}", ticker, e);
                self.formatter.fetch_error(ticker)
            }
        };

        let strategy = match self.engine.generate(ticker).await {
            Ok(outcome) => self.formatter.outcome(&outcome),
            Err(e) => {
                error!("Error in strategy for {}: {}", ticker, e);
                STRATEGY_FAILED.to_string()
            }
        };

        self.formatter.report(&info, &strategy)
    }
}

#[async_trait]
impl ChatHandler for ScreenerHandler {
    fn mode(&self) -> BotMode {
        BotMode::Screener
    }

    fn welcome(&self) -> &'static str {
        SCREENER_WELCOME
    }

    async fn handle(&self, text: &str, sink: &dyn ReplySink) -> Result<()> {
        let tickers = self.resolver.resolve_message(text).await;

        if tickers.is_empty() {
            return sink.send(NO_SYMBOLS).await;
        }

        info!("Found {} ticker(s): {:?}", tickers.len(), tickers);
        deliver(sink, &self.formatter.found(&tickers)).await;

        for ticker in &tickers {
            let reply = self.report(ticker).await;
            deliver(sink, &reply).await;
        }

        Ok(())
    }
}

/// A failed send is logged; later replies still go out
async fn deliver(sink: &dyn ReplySink, text: &str) {
    if let Err(e) = sink.send(text).await {
        error!("Failed to send reply: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::RecordingSink;
    use crate::testing::{MockProvider, history};
    use pulse_market::{HistoryPeriod, MarketError, TickerInfo};

    fn handler(mock: MockProvider) -> ScreenerHandler {
        ScreenerHandler::new(Arc::new(mock), &MarketConfig::default())
    }

    fn not_found() -> pulse_market::Result<pulse_market::PriceHistory> {
        Err(MarketError::YahooFinanceError("not found".to_string()))
    }

    #[tokio::test]
    async fn test_no_symbols() {
        let mut mock = MockProvider::new();
        mock.expect_history().returning(|_, _| not_found());

        let sink = RecordingSink::default();
        handler(mock)
            .handle("what about tcs and 500?", &sink)
            .await
            .unwrap();

        assert_eq!(
            sink.replies(),
            vec!["❌ No valid UPPERCASE stock symbols found in your message."]
        );
    }

    #[tokio::test]
    async fn test_unknown_ticker_report() {
        let mut mock = MockProvider::new();
        mock.expect_history().returning(|_, _| not_found());
        mock.expect_info().times(0);

        let report = handler(mock).report("XXXX").await;
        assert_eq!(
            report,
            "❌ Error fetching data for XXXX\n\n📊 ❌ Could not generate strategy."
        );
    }

    #[tokio::test]
    async fn test_info_failure_report() {
        let mut mock = MockProvider::new();
        mock.expect_history()
            .returning(|symbol, _| Ok(history(symbol, &[100.0, 101.0])));
        mock.expect_info()
            .returning(|_| Err(MarketError::YahooFinanceError("Invalid Crumb".to_string())));

        let report = handler(mock).report("TCS.NS").await;
        assert_eq!(
            report,
            "❌ Error fetching data for TCS.NS\n\n📊 ⚠️ Not enough data to generate a trading strategy."
        );
    }

    #[tokio::test]
    async fn test_short_history_report() {
        let mut mock = MockProvider::new();
        mock.expect_history()
            .returning(|symbol, _| Ok(history(symbol, &[100.0, 101.0, 102.0])));
        mock.expect_info()
            .returning(|symbol| Ok(TickerInfo::empty(symbol)));

        let report = handler(mock).report("NEWCO.NS").await;
        assert!(report.starts_with("📈 NEWCO.NS\nCurrent Price: ₹102.00\n"));
        assert!(report.ends_with("\n\n📊 ⚠️ Not enough data to generate a trading strategy."));
    }

    #[tokio::test]
    async fn test_replies_in_ticker_order() {
        let mut mock = MockProvider::new();
        mock.expect_history().returning(|symbol, period| match (symbol, period) {
            ("INFY.NS" | "TCS.NS", HistoryPeriod::FiveDays) => {
                Ok(history(symbol, &[10.0, 10.5, 11.0, 11.5, 12.0]))
            }
            ("INFY.NS" | "TCS.NS", HistoryPeriod::SixtyDays) => Ok(history(symbol, &[10.0; 25])),
            _ => not_found(),
        });
        mock.expect_info()
            .returning(|symbol| Ok(TickerInfo::empty(symbol)));

        let sink = RecordingSink::default();
        handler(mock)
            .handle("Compare INFY with TCS, then INFY again", &sink)
            .await
            .unwrap();

        let replies = sink.replies();
        assert_eq!(replies.len(), 3);
        assert_eq!(
            replies[0],
            "✅ Found 2 stock(s): INFY.NS, TCS.NS\nFetching data and strategy..."
        );
        assert!(replies[1].starts_with("📈 INFY.NS\n"));
        assert!(replies[2].starts_with("📈 TCS.NS\n"));
        assert!(replies[2].contains("📊 📉 Suggestion: **Wait**"));
    }

    #[tokio::test]
    async fn test_failed_send_does_not_stop_batch() {
        let mut mock = MockProvider::new();
        mock.expect_history().returning(|symbol, period| match (symbol, period) {
            ("INFY.NS" | "TCS.NS", HistoryPeriod::FiveDays) => {
                Ok(history(symbol, &[10.0, 10.5, 11.0, 11.5, 12.0]))
            }
            ("INFY.NS" | "TCS.NS", HistoryPeriod::SixtyDays) => Ok(history(symbol, &[10.0; 25])),
            _ => not_found(),
        });
        mock.expect_info()
            .returning(|symbol| Ok(TickerInfo::empty(symbol)));

        // send 0 is the header, send 1 the INFY report
        let sink = RecordingSink::failing_at(1);
        handler(mock)
            .handle("INFY TCS", &sink)
            .await
            .unwrap();

        let replies = sink.replies();
        assert_eq!(replies.len(), 2);
        assert!(replies[0].starts_with("✅ Found 2 stock(s)"));
        assert!(replies[1].starts_with("📈 TCS.NS\n"));
    }

    #[test]
    fn test_welcome() {
        let handler = handler(MockProvider::new());
        assert_eq!(handler.welcome(), SCREENER_WELCOME);
        assert_eq!(handler.mode(), BotMode::Screener);
    }
}
