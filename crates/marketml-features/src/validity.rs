//! The explicit per-row validity pass.
//!
//! Rows with an undefined required feature are dropped before they can
//! reach a label or a trainer. The drop is a data-quality policy, not a
//! fault path, so each one is recorded with the responsible field
//! instead of being silently omitted.

use serde::Serialize;

use crate::assembler::{FeatureCandidate, FeatureRow, LAG_STEPS};

/// Why a candidate row did not make it into the emitted table.
///
/// Serialize-only: the audit trail is exported for inspection, never
/// read back, and the static field names make that a one-way record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DropReason {
    /// A required feature was undefined (warm-up or data-quality gap);
    /// names the first offending field.
    UndefinedFeature { field: &'static str },
    /// The bar's labeling horizon extends past the end of the series.
    UnobservableLabel,
}

/// Audit record for a dropped row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DroppedRow {
    /// Bar index in the source series
    pub index: usize,
    /// Source bar timestamp (Unix ms)
    pub timestamp: i64,
    pub reason: DropReason,
}

/// Check one candidate, returning the complete row or the first
/// undefined required field.
///
/// Sentiment fields always carry defaults and never cause a drop.
pub fn check(candidate: &FeatureCandidate) -> Result<FeatureRow, DropReason> {
    let price_change = require(candidate.price_change, "price_change")?;
    let volume_change = require(candidate.volume_change, "volume_change")?;
    let rsi = require(candidate.rsi, "rsi")?;
    let macd = require(candidate.macd, "macd")?;
    let macd_signal = require(candidate.macd_signal, "macd_signal")?;
    let bb_position = require(candidate.bb_position, "bb_position")?;
    let stoch_k = require(candidate.stoch_k, "stoch_k")?;
    let stoch_d = require(candidate.stoch_d, "stoch_d")?;
    let atr = require(candidate.atr, "atr")?;

    let price_change_lag = require_lags(&candidate.price_change_lag, "price_change_lag")?;
    let volume_change_lag = require_lags(&candidate.volume_change_lag, "volume_change_lag")?;
    let rsi_lag = require_lags(&candidate.rsi_lag, "rsi_lag")?;

    Ok(FeatureRow {
        timestamp: candidate.timestamp,
        price_change,
        volume_change,
        high_low_ratio: candidate.high_low_ratio,
        rsi,
        macd,
        macd_signal,
        bb_position,
        stoch_k,
        stoch_d,
        atr,
        signal_rsi: candidate.signal_rsi,
        signal_macd: candidate.signal_macd,
        signal_bollinger: candidate.signal_bollinger,
        signal_stochastic: candidate.signal_stochastic,
        combined_score: candidate.combined_score,
        sentiment_score: candidate.sentiment.score,
        sentiment_magnitude: candidate.sentiment.magnitude,
        positive_ratio: candidate.sentiment.positive_ratio,
        negative_ratio: candidate.sentiment.negative_ratio,
        neutral_ratio: candidate.sentiment.neutral_ratio,
        article_count: candidate.sentiment.article_count,
        has_news: candidate.sentiment.has_news,
        price_change_lag,
        volume_change_lag,
        rsi_lag,
    })
}

fn require(value: Option<f64>, field: &'static str) -> Result<f64, DropReason> {
    value.ok_or(DropReason::UndefinedFeature { field })
}

fn require_lags(lags: &[Option<f64>; 3], field: &'static str) -> Result<[f64; 3], DropReason> {
    debug_assert_eq!(lags.len(), LAG_STEPS.len());
    match (lags[0], lags[1], lags[2]) {
        (Some(a), Some(b), Some(c)) => Ok([a, b, c]),
        _ => Err(DropReason::UndefinedFeature { field }),
    }
}
