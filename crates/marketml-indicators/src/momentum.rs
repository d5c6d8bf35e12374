//! Momentum indicators.

use marketml_core::traits::{Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

use crate::moving_average::Ema;

/// Relative Strength Index (RSI).
///
/// Average gain over average loss across a trailing window of price
/// deltas, mapped into [0, 100]. Uses plain rolling means of gains and
/// losses (not Wilder smoothing).
///
/// Edge policy: when the average loss is zero but gains exist the RSI is
/// 100 (maximal strength); when both averages are zero (flat window) the
/// RSI is undefined, not 50; callers must treat that as "no signal".
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn compute(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        if data.len() <= self.period {
            return result;
        }

        // Split deltas into gains and losses; delta i belongs to bar i+1
        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);
        for i in 1..data.len() {
            let change = data[i] - data[i - 1];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let period_f64 = self.period as f64;
        let mut gain_sum: f64 = gains[..self.period].iter().sum();
        let mut loss_sum: f64 = losses[..self.period].iter().sum();

        for t in self.period..data.len() {
            if t > self.period {
                let drop_idx = t - self.period - 1;
                gain_sum = gain_sum - gains[drop_idx] + gains[t - 1];
                loss_sum = loss_sum - losses[drop_idx] + losses[t - 1];
            }

            let avg_gain = gain_sum / period_f64;
            let avg_loss = loss_sum / period_f64;

            result[t] = if avg_loss == 0.0 {
                if avg_gain > 0.0 {
                    Some(100.0)
                } else {
                    // Flat window: no strength either way
                    None
                }
            } else {
                let rs = avg_gain / avg_loss;
                Some(100.0 - 100.0 / (1.0 + rs))
            };
        }

        result
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period deltas, so period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// Uses two recursive EMAs to identify trend direction and momentum.
/// Because the EMAs are seeded from the first observation, MACD values
/// are defined for every bar.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn compute(&self, data: &[f64]) -> Vec<Option<MacdOutput>> {
        let fast_ema = Ema::new(self.fast_period).smooth(data);
        let slow_ema = Ema::new(self.slow_period).smooth(data);

        let macd_line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        let signal_line = Ema::new(self.signal_period).smooth(&macd_line);

        macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(&macd, &signal)| {
                Some(MacdOutput {
                    macd,
                    signal,
                    histogram: macd - signal,
                })
            })
            .collect()
    }

    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// Stochastic oscillator output columns, aligned with the input bars.
#[derive(Debug, Clone)]
pub struct StochasticOutput {
    /// %K (fast stochastic)
    pub k: Vec<Option<f64>>,
    /// %D (SMA of %K)
    pub d: Vec<Option<f64>>,
}

/// Stochastic oscillator.
///
/// Compares the closing price to the high/low range over a period.
/// When the range is zero, %K is explicitly undefined for that bar
/// rather than a divide-by-zero NaN.
#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Stochastic {
    /// Create a new stochastic oscillator with default parameters (14, 3).
    pub fn new() -> Self {
        Self::with_periods(14, 3)
    }

    /// Create with custom periods.
    pub fn with_periods(k_period: usize, d_period: usize) -> Self {
        assert!(k_period > 0 && d_period > 0);
        Self { k_period, d_period }
    }

    /// Calculate %K and %D from OHLC data.
    pub fn compute_ohlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> StochasticOutput {
        let len = high.len().min(low.len()).min(close.len());
        let mut k_values = vec![None; len];

        for i in (self.k_period.saturating_sub(1))..len {
            let start = i + 1 - self.k_period;
            let highest = high[start..=i]
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            let lowest = low[start..=i].iter().cloned().fold(f64::INFINITY, f64::min);

            let range = highest - lowest;
            if range > 0.0 {
                k_values[i] = Some(((close[i] - lowest) / range) * 100.0);
            }
            // Zero range: %K stays undefined for this bar
        }

        // %D is a trailing SMA over %K, defined only when every %K in
        // the window is defined
        let mut d_values = vec![None; len];
        for i in (self.d_period.saturating_sub(1))..len {
            let window = &k_values[(i + 1 - self.d_period)..=i];
            if window.iter().all(|k| k.is_some()) {
                let sum: f64 = window.iter().flatten().sum();
                d_values[i] = Some(sum / self.d_period as f64);
            }
        }

        StochasticOutput {
            k: k_values,
            d: d_values,
        }
    }

    /// Minimum bars for the first defined %D value.
    pub fn period(&self) -> usize {
        self.k_period + self.d_period - 1
    }
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_bounds() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.compute(&data);
        assert_eq!(result.len(), data.len());

        for value in result.iter().flatten() {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
        // Defined from bar `period` onward
        assert!(result[..14].iter().all(|v| v.is_none()));
        assert!(result[14..].iter().all(|v| v.is_some()));
    }

    #[test]
    fn test_rsi_all_gains() {
        let rsi = Rsi::new(5);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let result = rsi.compute(&data);

        // All gains, zero losses: RSI pegged at 100
        assert!((result[5].unwrap() - 100.0).abs() < 1e-10);
        assert!((result[6].unwrap() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let data = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let result = rsi.compute(&data);

        assert!(result[5].unwrap().abs() < 1e-10);
    }

    #[test]
    fn test_rsi_flat_price_undefined() {
        // 14 consecutive equal closes: gain = loss = 0, RSI undefined,
        // not 50
        let rsi = Rsi::new(14);
        let data = vec![100.0; 20];
        let result = rsi.compute(&data);

        assert!(result.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_rsi_sliding_window_matches_direct() {
        let rsi = Rsi::new(3);
        let data = vec![10.0, 11.0, 10.5, 12.0, 11.0, 13.0, 12.5];
        let result = rsi.compute(&data);

        // Bar 5 covers the deltas of bars 3, 4 and 5: +1.5, -1.0, +2.0,
        // so avg_gain = 3.5/3 and avg_loss = 1.0/3
        let avg_gain = 3.5 / 3.0;
        let avg_loss = 1.0 / 3.0;
        let expected = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
        assert!((result[5].unwrap() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_macd_defined_everywhere() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = macd.compute(&data);

        assert_eq!(result.len(), data.len());
        assert!(result.iter().all(|v| v.is_some()));
        // In an uptrend, MACD line should be positive at the tail
        assert!(result.last().unwrap().unwrap().macd > 0.0);
    }

    #[test]
    fn test_macd_histogram_consistency() {
        let macd = Macd::with_periods(5, 10, 3);
        let data: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64).sin()).collect();

        for output in macd.compute(&data).into_iter().flatten() {
            assert!((output.histogram - (output.macd - output.signal)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_stochastic_basic() {
        let stoch = Stochastic::new();
        let high: Vec<f64> = (0..30).map(|i| 105.0 + i as f64).collect();
        let low: Vec<f64> = (0..30).map(|i| 95.0 + i as f64).collect();
        let close: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();

        let result = stoch.compute_ohlc(&high, &low, &close);
        assert_eq!(result.k.len(), 30);
        assert_eq!(result.d.len(), 30);

        for k in result.k.iter().flatten() {
            assert!(*k >= 0.0 && *k <= 100.0);
        }
        // %K warm-up is k_period - 1 bars, %D needs d_period defined %K
        assert!(result.k[..13].iter().all(|v| v.is_none()));
        assert!(result.k[13..].iter().all(|v| v.is_some()));
        assert!(result.d[..15].iter().all(|v| v.is_none()));
        assert!(result.d[15..].iter().all(|v| v.is_some()));
    }

    #[test]
    fn test_stochastic_zero_range_undefined() {
        let stoch = Stochastic::with_periods(3, 2);
        let flat = vec![100.0; 8];

        let result = stoch.compute_ohlc(&flat, &flat, &flat);
        assert!(result.k.iter().all(|v| v.is_none()));
        assert!(result.d.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_stochastic_close_at_high() {
        let stoch = Stochastic::with_periods(5, 3);
        let high = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0];
        let low = vec![5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let close = high.clone();

        let result = stoch.compute_ohlc(&high, &low, &close);
        assert!((result.k.last().unwrap().unwrap() - 100.0).abs() < 1e-10);
    }
}
