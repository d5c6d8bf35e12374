//! Forward-return labels for supervised training.

use marketml_core::config::LabelConfig;
use marketml_core::types::Action;
use serde::{Deserialize, Serialize};

use crate::assembler::FeatureRow;

/// Label for one bar: the realized forward return and its ternary class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// close[t + lookahead] / close[t] - 1
    pub future_return: f64,
    /// Buy above +threshold, Sell below -threshold, Hold between
    pub target: Action,
}

/// A feature row joined with its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    pub features: FeatureRow,
    pub future_return: f64,
    pub target: Action,
}

/// Computes forward-looking labels from raw close prices.
///
/// The final `lookahead` bars of any series have no observable future
/// return and are excluded entirely, never imputed or zero-filled.
/// That exclusion is the guard against label leakage.
#[derive(Debug, Clone)]
pub struct LabelGenerator {
    lookahead: usize,
    threshold: f64,
}

impl LabelGenerator {
    /// Create a generator from a validated label configuration.
    pub fn new(config: &LabelConfig) -> Self {
        Self {
            lookahead: config.lookahead,
            threshold: config.threshold,
        }
    }

    /// Number of bars looked ahead.
    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    /// One label per bar with an observable horizon: output length is
    /// `closes.len() - lookahead` (zero when the series is shorter than
    /// the horizon).
    pub fn compute(&self, closes: &[f64]) -> Vec<Label> {
        let eligible = closes.len().saturating_sub(self.lookahead);
        let mut labels = Vec::with_capacity(eligible);

        for t in 0..eligible {
            let future_return = closes[t + self.lookahead] / closes[t] - 1.0;
            let target = if future_return > self.threshold {
                Action::Buy
            } else if future_return < -self.threshold {
                Action::Sell
            } else {
                Action::Hold
            };
            labels.push(Label {
                future_return,
                target,
            });
        }

        labels
    }
}
