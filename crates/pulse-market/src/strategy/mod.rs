//! Trading suggestions from recent price action
//!
//! Indicators are computed from a 60-day daily history, classified by an
//! ordered rule list (first match wins) and turned into a [`Suggestion`]
//! with fixed stop-loss and target bands.

pub mod engine;
pub mod indicators;
pub mod rules;

pub use engine::{
    MIN_OBSERVATIONS, STOP_LOSS_RATIO, Suggestion, SuggestionEngine, SuggestionOutcome,
    TARGET_RATIO, evaluate,
};
pub use indicators::{Indicators, sma};
pub use rules::{Action, RULES, Rule, classify};
