//! Advisor mode: ask the language model, then append a live price for the
//! ticker it names

use crate::config::BotMode;
use crate::error::Result;
use crate::reply::ReplySink;
use crate::router::ChatHandler;
use async_trait::async_trait;
use pulse_llm::{CompletionRequest, LLMProvider};
use pulse_market::formatter::PRICE_UNAVAILABLE;
use pulse_market::{MarketConfig, MarketDataProvider, ReportFormatter};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub const ADVISOR_WELCOME: &str = "📈 Welcome! Ask me for an Indian stock suggestion.\n\
                                   Example: 'Suggest a stock for short-term gain'";

/// Wrap the user's text in the prompt template
pub fn build_prompt(text: &str) -> String {
    format!("User Query: {text}")
}

/// Symbol named on the first line that mentions `Ticker`: the text after
/// its last colon, trimmed
pub fn ticker_from_reply(reply: &str) -> Option<&str> {
    reply
        .lines()
        .find(|line| line.contains("Ticker"))
        .and_then(|line| line.rsplit(':').next())
        .map(str::trim)
}

pub struct AdvisorHandler {
    llm: Arc<dyn LLMProvider>,
    market: Arc<dyn MarketDataProvider>,
    model: String,
    suffix: String,
    formatter: ReportFormatter,
}

impl AdvisorHandler {
    pub fn new(
        llm: Arc<dyn LLMProvider>,
        market: Arc<dyn MarketDataProvider>,
        model: impl Into<String>,
        config: &MarketConfig,
    ) -> Self {
        Self {
            llm,
            market,
            model: model.into(),
            suffix: config.advisor_suffix.clone(),
            formatter: ReportFormatter::from_config(config),
        }
    }

    /// Model reply with the live price line appended when a ticker is named
    #[instrument(skip(self, text), fields(model = %self.model))]
    pub async fn answer(&self, text: &str) -> Result<String> {
        let request = CompletionRequest::prompt(&self.model, build_prompt(text));

        let response = self.llm.complete(request).await?;
        let mut reply = response.text().to_string();

        if let Some(symbol) = ticker_from_reply(&reply) {
            let ticker = format!("{symbol}{}", self.suffix);
            let line = self.live_price(&ticker).await;
            reply.push_str(&line);
        }

        Ok(reply)
    }

    async fn live_price(&self, ticker: &str) -> String {
        match self.market.info(ticker).await {
            Ok(info) => {
                let name = info.short_name.as_deref().unwrap_or(ticker);
                self.formatter.live_price(name, info.current_price)
            }
            Err(e) => {
                warn!("Live price lookup failed for {}: {}", ticker, e);
                PRICE_UNAVAILABLE.to_string()
            }
        }
    }
}

#[async_trait]
impl ChatHandler for AdvisorHandler {
    fn mode(&self) -> BotMode {
        BotMode::Advisor
    }

    fn welcome(&self) -> &'static str {
        ADVISOR_WELCOME
    }

    async fn handle(&self, text: &str, sink: &dyn ReplySink) -> Result<()> {
        match self.answer(text).await {
            Ok(reply) => {
                info!("Advisor reply ready ({} chars)", reply.chars().count());
                sink.send(&reply).await
            }
            Err(e) => {
                error!("Advisor request failed: {:?}", e);
                sink.send(&format!("Error: {e}")).await
            }
        }
    }
}
