//! Moving average indicators.

use marketml_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the trailing N values; undefined for the first
/// N-1 bars.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn compute(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        // Initial sum, then slide the window
        let mut sum: f64 = data[..self.period].iter().sum();
        result[self.period - 1] = Some(sum / period_f64);

        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result[i] = Some(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Recursive smoothing with factor 2/(period+1), seeded from the first
/// observed value and defined for every bar. This is the recursive
/// (pandas `adjust=False`) convention, not the weighted-average one;
/// the two differ on early bars and the recursive form is the contract
/// here.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }

    /// Raw smoothed values, one per input point.
    ///
    /// Used directly by MACD, which chains EMAs without the Option layer.
    pub fn smooth(&self, data: &[f64]) -> Vec<f64> {
        let mut result = Vec::with_capacity(data.len());
        let one_minus_mult = 1.0 - self.multiplier;

        let mut ema = match data.first() {
            Some(&first) => first,
            None => return result,
        };
        result.push(ema);

        for &price in &data[1..] {
            ema = price * self.multiplier + ema * one_minus_mult;
            result.push(ema);
        }

        result
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn compute(&self, data: &[f64]) -> Vec<Option<f64>> {
        self.smooth(data).into_iter().map(Some).collect()
    }

    fn period(&self) -> usize {
        // Defined from the first bar; the period only sets the decay.
        1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.compute(&data);

        assert_eq!(result.len(), 5);
        assert!(result[0].is_none());
        assert!(result[1].is_none());
        assert!((result[2].unwrap() - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[3].unwrap() - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[4].unwrap() - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_defined_count() {
        // L - period + 1 defined values, tail-aligned
        let sma = Sma::new(5);
        let data: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let result = sma.compute(&data);

        let defined = result.iter().filter(|v| v.is_some()).count();
        assert_eq!(defined, 12 - 5 + 1);
        assert!(result[..4].iter().all(|v| v.is_none()));
        assert!(result[4..].iter().all(|v| v.is_some()));
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        let data = vec![1.0, 2.0, 3.0];
        let result = sma.compute(&data);

        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_ema_seeded_from_first_value() {
        let ema = Ema::new(3);
        let data = vec![2.0, 4.0, 8.0];
        let result = ema.compute(&data);

        // multiplier = 2/(3+1) = 0.5
        assert_eq!(result.len(), 3);
        assert!((result[0].unwrap() - 2.0).abs() < 1e-10);
        assert!((result[1].unwrap() - 3.0).abs() < 1e-10); // 4*0.5 + 2*0.5
        assert!((result[2].unwrap() - 5.5).abs() < 1e-10); // 8*0.5 + 3*0.5
    }

    #[test]
    fn test_ema_no_warmup_gap() {
        let ema = Ema::new(20);
        let data = vec![100.0, 101.0, 102.0];
        let result = ema.compute(&data);

        // Defined from bar 0 even when the series is shorter than the period
        assert!(result.iter().all(|v| v.is_some()));
    }
}
