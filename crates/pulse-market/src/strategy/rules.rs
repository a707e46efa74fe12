//! Ordered classification rules
//!
//! Rules are evaluated top to bottom and the first matching predicate picks
//! the action. The last rule always matches.

use super::indicators::Indicators;
use serde::{Deserialize, Serialize};

/// Discrete suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    BuyTheDip,
    HighRiskBuy,
    ProfitBooking,
    Hold,
    Wait,
}

impl Action {
    /// Text shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Action::BuyTheDip => {
                "🟢 Suggestion: **Buy the dip** (strong stock, small correction)."
            }
            Action::HighRiskBuy => {
                "🔽 Suggestion: **High-risk Buy** — sharp dip, possible rebound."
            }
            Action::ProfitBooking => "🔼 Suggestion: **Profit booking** — strong rally.",
            Action::Hold => "📈 Suggestion: **Hold** — price above trend lines.",
            Action::Wait => "📉 Suggestion: **Wait** — weak short-term signal.",
        }
    }

    /// Suggested holding period; buy labels get the longer window
    pub fn holding_period(&self) -> &'static str {
        if self.label().contains("Buy") {
            "3–10 days"
        } else {
            "2–5 days"
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named predicate and the action it selects
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub predicate: fn(&Indicators) -> bool,
    pub action: Action,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

impl Rule {
    pub fn matches(&self, indicators: &Indicators) -> bool {
        (self.predicate)(indicators)
    }
}

fn small_dip_in_uptrend(ind: &Indicators) -> bool {
    (-5.0..=-2.0).contains(&ind.pct_change) && ind.above_sma_long()
}

fn sharp_dip(ind: &Indicators) -> bool {
    ind.pct_change < -5.0
}

fn strong_rally(ind: &Indicators) -> bool {
    ind.pct_change > 8.0
}

fn above_both_averages(ind: &Indicators) -> bool {
    ind.above_sma_short() && ind.above_sma_long()
}

fn always(_: &Indicators) -> bool {
    true
}

/// Classification rules in evaluation order
pub const RULES: [Rule; 5] = [
    Rule {
        name: "small_dip_in_uptrend",
        predicate: small_dip_in_uptrend,
        action: Action::BuyTheDip,
    },
    Rule {
        name: "sharp_dip",
        predicate: sharp_dip,
        action: Action::HighRiskBuy,
    },
    Rule {
        name: "strong_rally",
        predicate: strong_rally,
        action: Action::ProfitBooking,
    },
    Rule {
        name: "above_both_averages",
        predicate: above_both_averages,
        action: Action::Hold,
    },
    Rule {
        name: "fallback",
        predicate: always,
        action: Action::Wait,
    },
];

/// First matching rule's action
pub fn classify(indicators: &Indicators) -> Action {
    RULES
        .iter()
        .find(|rule| rule.matches(indicators))
        .map_or(Action::Wait, |rule| rule.action)
}
