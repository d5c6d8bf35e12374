//! Discrete trading signals from indicator values.
//!
//! Each indicator maps to a per-bar ternary signal; the four component
//! signals sum into a combined score which thresholds into the final
//! decision. The thresholds are fixed policy, not configuration:
//! changing them changes the strategy, so they live here as documented
//! constants.

use marketml_core::types::{Action, SignalRow};
use marketml_indicators::IndicatorTable;

/// RSI below this is oversold (bullish).
pub const RSI_OVERSOLD: f64 = 30.0;
/// RSI above this is overbought (bearish).
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// Stochastic %K and %D below this is oversold (bullish).
pub const STOCH_OVERSOLD: f64 = 20.0;
/// Stochastic %K and %D above this is overbought (bearish).
pub const STOCH_OVERBOUGHT: f64 = 80.0;
/// Combined score at or above this is a Buy; at or below its negation,
/// a Sell.
pub const SCORE_THRESHOLD: i8 = 2;

/// Maps indicator rows to per-bar discrete signals.
#[derive(Debug, Clone, Default)]
pub struct SignalGenerator;

impl SignalGenerator {
    /// Create a signal generator.
    pub fn new() -> Self {
        Self
    }

    /// Produce one signal row per bar.
    ///
    /// `closes` must be the close prices of the bars behind `table`.
    /// An undefined indicator contributes 0 (no signal), never a
    /// substituted neutral value.
    pub fn generate(&self, table: &IndicatorTable, closes: &[f64]) -> Vec<SignalRow> {
        let len = table.len().min(closes.len());
        let mut rows = Vec::with_capacity(len);

        for i in 0..len {
            let rsi = rsi_signal(table.rsi[i]);
            let macd = macd_signal(table.macd[i], table.macd_signal[i]);
            let bollinger = bollinger_signal(closes[i], table.bb_lower[i], table.bb_upper[i]);
            let stochastic = stochastic_signal(table.stoch_k[i], table.stoch_d[i]);

            let combined_score = rsi + macd + bollinger + stochastic;

            rows.push(SignalRow {
                timestamp: table.timestamps[i],
                rsi,
                macd,
                bollinger,
                stochastic,
                combined_score,
                trading_signal: decide(combined_score),
            });
        }

        rows
    }
}

/// RSI component: +1 oversold, -1 overbought, 0 otherwise or undefined.
fn rsi_signal(rsi: Option<f64>) -> i8 {
    match rsi {
        Some(value) if value < RSI_OVERSOLD => 1,
        Some(value) if value > RSI_OVERBOUGHT => -1,
        _ => 0,
    }
}

/// MACD component: sign of the line relative to its signal line.
fn macd_signal(macd: Option<f64>, signal: Option<f64>) -> i8 {
    match (macd, signal) {
        (Some(m), Some(s)) if m > s => 1,
        (Some(m), Some(s)) if m < s => -1,
        _ => 0,
    }
}

/// Bollinger component: +1 close below the lower band, -1 above the upper.
fn bollinger_signal(close: f64, lower: Option<f64>, upper: Option<f64>) -> i8 {
    match (lower, upper) {
        (Some(l), _) if close < l => 1,
        (_, Some(u)) if close > u => -1,
        _ => 0,
    }
}

/// Stochastic component: both %K and %D must agree on the extreme.
fn stochastic_signal(k: Option<f64>, d: Option<f64>) -> i8 {
    match (k, d) {
        (Some(k), Some(d)) if k < STOCH_OVERSOLD && d < STOCH_OVERSOLD => 1,
        (Some(k), Some(d)) if k > STOCH_OVERBOUGHT && d > STOCH_OVERBOUGHT => -1,
        _ => 0,
    }
}

/// Threshold the combined score into the final decision.
///
/// Boundaries are inclusive: exactly +2 is a Buy, exactly -2 a Sell.
fn decide(combined_score: i8) -> Action {
    if combined_score >= SCORE_THRESHOLD {
        Action::Buy
    } else if combined_score <= -SCORE_THRESHOLD {
        Action::Sell
    } else {
        Action::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketml_core::config::IndicatorConfig;
    use marketml_core::types::{Bar, BarSeries};
    use marketml_indicators::IndicatorEngine;

    #[test]
    fn test_rsi_component() {
        assert_eq!(rsi_signal(Some(25.0)), 1);
        assert_eq!(rsi_signal(Some(75.0)), -1);
        assert_eq!(rsi_signal(Some(50.0)), 0);
        // Exactly on the thresholds is neutral
        assert_eq!(rsi_signal(Some(30.0)), 0);
        assert_eq!(rsi_signal(Some(70.0)), 0);
        // Undefined RSI is "no signal", not neutral-by-substitution
        assert_eq!(rsi_signal(None), 0);
    }

    #[test]
    fn test_macd_component() {
        assert_eq!(macd_signal(Some(1.0), Some(0.5)), 1);
        assert_eq!(macd_signal(Some(0.5), Some(1.0)), -1);
        assert_eq!(macd_signal(Some(1.0), Some(1.0)), 0);
        assert_eq!(macd_signal(None, Some(1.0)), 0);
    }

    #[test]
    fn test_bollinger_component() {
        assert_eq!(bollinger_signal(89.0, Some(90.0), Some(110.0)), 1);
        assert_eq!(bollinger_signal(111.0, Some(90.0), Some(110.0)), -1);
        assert_eq!(bollinger_signal(100.0, Some(90.0), Some(110.0)), 0);
        assert_eq!(bollinger_signal(100.0, None, None), 0);
    }

    #[test]
    fn test_stochastic_component_requires_both() {
        assert_eq!(stochastic_signal(Some(15.0), Some(18.0)), 1);
        assert_eq!(stochastic_signal(Some(15.0), Some(25.0)), 0);
        assert_eq!(stochastic_signal(Some(85.0), Some(90.0)), -1);
        assert_eq!(stochastic_signal(Some(85.0), Some(75.0)), 0);
        assert_eq!(stochastic_signal(Some(15.0), None), 0);
    }

    #[test]
    fn test_decision_boundaries() {
        assert_eq!(decide(4), Action::Buy);
        assert_eq!(decide(2), Action::Buy);
        assert_eq!(decide(1), Action::Hold);
        assert_eq!(decide(0), Action::Hold);
        assert_eq!(decide(-1), Action::Hold);
        assert_eq!(decide(-2), Action::Sell);
        assert_eq!(decide(-4), Action::Sell);
    }

    #[test]
    fn test_generate_score_bounds() {
        let mut series = BarSeries::new("TEST".to_string());
        for i in 0..80 {
            // Oscillating closes to exercise both signal directions
            let close = 100.0 + ((i as f64) * 0.7).sin() * 10.0;
            series.push(Bar::new(
                i as i64 * 86_400_000,
                close,
                close + 2.0,
                close - 2.0,
                close,
                1000.0,
            ));
        }

        let engine = IndicatorEngine::new(IndicatorConfig::default());
        let table = engine.compute(&series).unwrap();
        let rows = SignalGenerator::new().generate(&table, &series.closes());

        assert_eq!(rows.len(), 80);
        for row in &rows {
            assert!((-4..=4).contains(&row.combined_score));
            assert_eq!(
                row.combined_score,
                row.rsi + row.macd + row.bollinger + row.stochastic
            );
            let expected = if row.combined_score >= 2 {
                Action::Buy
            } else if row.combined_score <= -2 {
                Action::Sell
            } else {
                Action::Hold
            };
            assert_eq!(row.trading_signal, expected);
        }
    }

    #[test]
    fn test_warmup_rows_are_hold() {
        let mut series = BarSeries::new("TEST".to_string());
        for i in 0..5 {
            let close = 100.0 + i as f64;
            series.push(Bar::new(
                i as i64 * 86_400_000,
                close,
                close + 1.0,
                close - 1.0,
                close,
                1000.0,
            ));
        }

        let engine = IndicatorEngine::new(IndicatorConfig::default());
        let table = engine.compute(&series).unwrap();
        let rows = SignalGenerator::new().generate(&table, &series.closes());

        // RSI/Bollinger/Stochastic are all in warm-up; only MACD can
        // contribute, which is never enough to cross the +-2 threshold
        for row in &rows {
            assert_eq!(row.trading_signal, Action::Hold);
        }
    }
}
