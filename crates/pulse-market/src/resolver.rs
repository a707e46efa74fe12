//! Ticker resolution from free text
//!
//! Candidate tokens are runs of 2-10 uppercase letters or digits. Each one is
//! probed against the provider with every configured exchange suffix, in
//! order, and the first candidate that has recent bars wins.

use crate::config::MarketConfig;
use crate::provider::{HistoryPeriod, MarketDataProvider};
use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z0-9]{2,10}\b").expect("token pattern is a valid regex")
});

/// Candidate tokens in order of first appearance, without duplicates
pub fn extract_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

/// True when the token has at least one cased character and none of them
/// are lowercase. `"TCS1"` qualifies, `"123"` and `"Tcs"` do not.
pub fn is_fully_uppercase(token: &str) -> bool {
    let mut has_cased = false;
    for c in token.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Resolves tokens to tradable tickers by probing exchange suffixes
pub struct TickerResolver {
    provider: Arc<dyn MarketDataProvider>,
    suffixes: Vec<String>,
}

impl TickerResolver {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: &MarketConfig) -> Self {
        Self {
            provider,
            suffixes: config.suffixes.clone(),
        }
    }

    /// Resolve one token; `None` means no candidate had data
    pub async fn resolve(&self, token: &str) -> Option<String> {
        if !is_fully_uppercase(token) {
            return None;
        }

        for suffix in &self.suffixes {
            let candidate = format!("{token}{suffix}");
            match self
                .provider
                .history(&candidate, HistoryPeriod::FiveDays)
                .await
            {
                Ok(history) if !history.is_empty() => return Some(candidate),
                Ok(_) => debug!("No bars for {}", candidate),
                Err(e) => debug!("Probe for {} failed: {}", candidate, e),
            }
        }

        None
    }

    /// Extract tokens from a message and resolve each one in turn
    pub async fn resolve_message(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();
        for token in extract_tokens(text) {
            if let Some(ticker) = self.resolve(&token).await {
                info!("Resolved {} -> {}", token, ticker);
                found.push(ticker);
            }
        }
        found
    }
}
