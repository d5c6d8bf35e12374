//! Discrete trading signal types.

use serde::{Deserialize, Serialize};

/// Ternary trading decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Strong bullish consensus
    Buy,
    /// No consensus
    Hold,
    /// Strong bearish consensus
    Sell,
}

impl Action {
    /// Numeric encoding: Buy = +1, Hold = 0, Sell = -1.
    pub fn value(self) -> i8 {
        match self {
            Action::Buy => 1,
            Action::Hold => 0,
            Action::Sell => -1,
        }
    }
}

/// Per-bar component signals and the aggregate decision.
///
/// Component values are in {-1, 0, +1}; `combined_score` is their sum,
/// always in [-4, +4].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRow {
    /// Unix timestamp in milliseconds of the source bar
    pub timestamp: i64,
    /// RSI overbought/oversold signal
    pub rsi: i8,
    /// MACD line vs signal line crossover state
    pub macd: i8,
    /// Close vs Bollinger band position
    pub bollinger: i8,
    /// Stochastic %K/%D extreme signal
    pub stochastic: i8,
    /// Sum of the four component signals
    pub combined_score: i8,
    /// Final decision derived from the combined score
    pub trading_signal: Action,
}
