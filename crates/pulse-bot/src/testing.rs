//! Test doubles shared by the handler tests

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use pulse_llm::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, StopReason, TokenUsage,
};
use pulse_market::{HistoryPeriod, MarketDataProvider, PriceBar, PriceHistory, TickerInfo};
use std::sync::Mutex;

mockall::mock! {
    pub Provider {}

    #[async_trait]
    impl MarketDataProvider for Provider {
        async fn history(&self, symbol: &str, period: HistoryPeriod) -> pulse_market::Result<PriceHistory>;
        async fn info(&self, symbol: &str) -> pulse_market::Result<TickerInfo>;
    }
}

/// Daily bars with the given closes, one day apart
pub fn history(symbol: &str, closes: &[f64]) -> PriceHistory {
    let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    let bars = closes
        .iter()
        .zip(0_i64..)
        .map(|(&close, day)| PriceBar {
            timestamp: start + Duration::days(day),
            open: close,
            high: close,
            low: close,
            close,
            volume: 100,
        })
        .collect();
    PriceHistory::new(symbol, bars)
}

/// Language model that answers with a canned reply and records prompts
pub struct FakeLlm {
    reply: std::result::Result<String, String>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LLMProvider for FakeLlm {
    async fn complete(&self, request: CompletionRequest) -> pulse_llm::Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Ok(text) => Ok(CompletionResponse {
                message: Message::assistant(text.clone()),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            }),
            Err(message) => Err(LLMError::RequestFailed(message.clone())),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
