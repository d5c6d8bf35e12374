//! Volatility indicators.

use marketml_core::traits::MultiOutputIndicator;
use serde::{Deserialize, Serialize};

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
}

/// Bollinger Bands.
///
/// A middle band (SMA) with upper and lower bands at `k` standard
/// deviations. The deviation is the sample standard deviation
/// (denominator N-1) over the same trailing window as the middle band.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerOutput;

    fn compute(&self, data: &[f64]) -> Vec<Option<BollingerOutput>> {
        let mut result = vec![None; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        for (i, window) in data.windows(self.period).enumerate() {
            let mean: f64 = window.iter().sum::<f64>() / period_f64;
            // Sample variance (N-1 denominator)
            let variance: f64 =
                window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (period_f64 - 1.0);
            let band = self.std_dev_multiplier * variance.sqrt();

            result[self.period - 1 + i] = Some(BollingerOutput {
                upper: mean + band,
                middle: mean,
                lower: mean - band,
            });
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}

/// Average True Range (ATR).
///
/// True range is the largest of (high - low), |high - prev close| and
/// |low - prev close|; the first bar has no previous close and uses its
/// own range. ATR is the trailing simple mean of the true range.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate ATR from OHLC data, aligned 1:1 with the input.
    pub fn compute_ohlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Option<f64>> {
        let len = high.len().min(low.len()).min(close.len());
        let mut result = vec![None; len];
        if len < self.period {
            return result;
        }

        let mut tr = Vec::with_capacity(len);
        for i in 0..len {
            let hl = high[i] - low[i];
            let value = if i == 0 {
                hl
            } else {
                let hc = (high[i] - close[i - 1]).abs();
                let lc = (low[i] - close[i - 1]).abs();
                hl.max(hc).max(lc)
            };
            tr.push(value);
        }

        let period_f64 = self.period as f64;
        let mut sum: f64 = tr[..self.period].iter().sum();
        result[self.period - 1] = Some(sum / period_f64);

        for i in self.period..len {
            sum = sum - tr[i - self.period] + tr[i];
            result[i] = Some(sum / period_f64);
        }

        result
    }

    /// Minimum bars for the first defined value.
    pub fn period(&self) -> usize {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_sample_stddev() {
        let bb = BollingerBands::with_params(3, 2.0);
        let data = vec![2.0, 4.0, 6.0];
        let result = bb.compute(&data);

        assert!(result[0].is_none());
        assert!(result[1].is_none());

        let out = result[2].unwrap();
        // mean = 4, sample variance = (4 + 0 + 4) / 2 = 4, stddev = 2
        assert!((out.middle - 4.0).abs() < 1e-10);
        assert!((out.upper - 8.0).abs() < 1e-10);
        assert!((out.lower - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_bollinger_band_ordering() {
        let bb = BollingerBands::new();
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0)
            .collect();

        for output in bb.compute(&data).into_iter().flatten() {
            assert!(output.upper > output.middle);
            assert!(output.middle > output.lower);
        }
    }

    #[test]
    fn test_bollinger_flat_price_collapses() {
        let bb = BollingerBands::with_params(5, 2.0);
        let data = vec![100.0; 8];

        for output in bb.compute(&data).into_iter().flatten() {
            assert!((output.upper - 100.0).abs() < 1e-10);
            assert!((output.lower - 100.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_atr_alignment() {
        let atr = Atr::new(3);
        let high = vec![10.0, 11.0, 12.0, 11.0, 13.0, 14.0];
        let low = vec![8.0, 9.0, 10.0, 9.0, 11.0, 12.0];
        let close = vec![9.0, 10.0, 11.0, 10.0, 12.0, 13.0];

        let result = atr.compute_ohlc(&high, &low, &close);
        assert_eq!(result.len(), 6);
        assert!(result[0].is_none());
        assert!(result[1].is_none());
        assert!(result[2..].iter().all(|v| v.is_some()));

        for value in result.iter().flatten() {
            assert!(*value > 0.0);
        }
    }

    #[test]
    fn test_atr_first_bar_uses_range() {
        let atr = Atr::new(2);
        let high = vec![12.0, 11.0];
        let low = vec![8.0, 9.0];
        let close = vec![10.0, 10.0];

        let result = atr.compute_ohlc(&high, &low, &close);
        // tr[0] = 12-8 = 4, tr[1] = max(2, |11-10|, |9-10|) = 2
        assert!((result[1].unwrap() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_atr_gap_open() {
        let atr = Atr::new(1);
        // Second bar gaps above the first close
        let high = vec![10.0, 15.0];
        let low = vec![9.0, 14.0];
        let close = vec![9.5, 14.5];

        let result = atr.compute_ohlc(&high, &low, &close);
        // tr[1] = max(1, |15-9.5|, |14-9.5|) = 5.5
        assert!((result[1].unwrap() - 5.5).abs() < 1e-10);
    }
}
