//! Flattens bars, indicators, signals and sentiment into per-bar
//! feature candidates.

use marketml_core::types::{BarSeries, SentimentSnapshot, SentimentTable, SignalRow};
use marketml_indicators::IndicatorTable;
use serde::{Deserialize, Serialize};

/// Lags applied to the selected base features.
pub const LAG_STEPS: [usize; 3] = [1, 2, 3];

/// A complete per-bar feature record, ready for a downstream classifier.
///
/// Every numeric field is defined; candidates with undefined required
/// values never become a `FeatureRow` (see [`crate::validity`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Source bar timestamp (Unix ms)
    pub timestamp: i64,

    // Price-derived features
    /// Percent change of close vs the previous bar
    pub price_change: f64,
    /// Percent change of volume vs the previous bar
    pub volume_change: f64,
    /// High divided by low for the bar
    pub high_low_ratio: f64,

    // Indicator features
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    /// Close position inside the Bollinger bands, (close - lower) / (upper - lower)
    pub bb_position: f64,
    pub stoch_k: f64,
    pub stoch_d: f64,
    pub atr: f64,

    // Discrete signal features
    pub signal_rsi: i8,
    pub signal_macd: i8,
    pub signal_bollinger: i8,
    pub signal_stochastic: i8,
    pub combined_score: i8,

    // Sentiment features (forward-filled, zero defaults before any data)
    pub sentiment_score: f64,
    pub sentiment_magnitude: f64,
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub neutral_ratio: f64,
    pub article_count: u32,
    pub has_news: bool,

    // Lagged features, index 0 = lag 1
    pub price_change_lag: [f64; 3],
    pub volume_change_lag: [f64; 3],
    pub rsi_lag: [f64; 3],
}

/// Per-bar feature candidate before the validity pass.
///
/// Required numeric features are `Option` so warm-up and data-quality
/// gaps stay structural until explicitly checked.
#[derive(Debug, Clone)]
pub struct FeatureCandidate {
    pub timestamp: i64,

    pub price_change: Option<f64>,
    pub volume_change: Option<f64>,
    pub high_low_ratio: f64,

    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub bb_position: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub atr: Option<f64>,

    pub signal_rsi: i8,
    pub signal_macd: i8,
    pub signal_bollinger: i8,
    pub signal_stochastic: i8,
    pub combined_score: i8,

    pub sentiment: SentimentSnapshot,

    pub price_change_lag: [Option<f64>; 3],
    pub volume_change_lag: [Option<f64>; 3],
    pub rsi_lag: [Option<f64>; 3],
}

/// Assembles feature candidates from the pipeline stages.
#[derive(Debug, Clone, Default)]
pub struct FeatureAssembler;

impl FeatureAssembler {
    /// Create a feature assembler.
    pub fn new() -> Self {
        Self
    }

    /// Produce one candidate per bar.
    ///
    /// `table` and `signals` must come from the same series. Sentiment
    /// is merged read-only: exact date match first, otherwise the most
    /// recent prior snapshot, zero defaults before any data exists.
    pub fn assemble(
        &self,
        series: &BarSeries,
        table: &IndicatorTable,
        signals: &[SignalRow],
        sentiment: Option<&SentimentTable>,
    ) -> Vec<FeatureCandidate> {
        let bars = series.bars();
        let len = bars.len().min(table.len()).min(signals.len());

        let price_change = percent_change(&series.closes());
        let volume_change = percent_change(&series.volumes());

        let price_change_lags = lag_columns(&price_change);
        let volume_change_lags = lag_columns(&volume_change);
        let rsi_lags = lag_columns(&table.rsi);

        let mut candidates = Vec::with_capacity(len);
        for i in 0..len {
            let bar = &bars[i];
            let signal = &signals[i];

            let bb_position = match (table.bb_lower[i], table.bb_upper[i]) {
                (Some(lower), Some(upper)) if upper > lower => {
                    Some((bar.close - lower) / (upper - lower))
                }
                // Collapsed or undefined bands give no position
                _ => None,
            };

            let snapshot = match sentiment {
                Some(s) => s.forward_filled(bar.date()),
                None => SentimentSnapshot::default(),
            };

            candidates.push(FeatureCandidate {
                timestamp: bar.timestamp,
                price_change: price_change[i],
                volume_change: volume_change[i],
                high_low_ratio: bar.high / bar.low,
                rsi: table.rsi[i],
                macd: table.macd[i],
                macd_signal: table.macd_signal[i],
                bb_position,
                stoch_k: table.stoch_k[i],
                stoch_d: table.stoch_d[i],
                atr: table.atr[i],
                signal_rsi: signal.rsi,
                signal_macd: signal.macd,
                signal_bollinger: signal.bollinger,
                signal_stochastic: signal.stochastic,
                combined_score: signal.combined_score,
                sentiment: snapshot,
                price_change_lag: price_change_lags[i],
                volume_change_lag: volume_change_lags[i],
                rsi_lag: rsi_lags[i],
            });
        }

        candidates
    }
}

/// Percent change vs the previous value; undefined at the first bar and
/// wherever the previous value is zero.
fn percent_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    for i in 1..values.len() {
        let prev = values[i - 1];
        if prev != 0.0 {
            result[i] = Some(values[i] / prev - 1.0);
        }
    }
    result
}

/// Shifted copies of a column at each configured lag.
fn lag_columns(base: &[Option<f64>]) -> Vec<[Option<f64>; 3]> {
    let mut result = vec![[None; 3]; base.len()];
    for (slot, &lag) in LAG_STEPS.iter().enumerate() {
        for i in lag..base.len() {
            result[i][slot] = base[i - lag];
        }
    }
    result
}
