//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Trait for technical indicators.
///
/// Indicators are pure functions of the price history up to and
/// including each bar. The output vector is aligned 1:1 with the input:
/// `None` marks the warm-up period (insufficient history), never a
/// silent zero.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Compute indicator values for the given data.
    ///
    /// Returns one entry per input point; warm-up entries are `None`.
    fn compute(&self, data: &[f64]) -> Vec<Option<Self::Output>>;

    /// Get the minimum data points required for the first defined value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data for at least one defined value.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Multi-output indicator (e.g., Bollinger Bands, MACD).
///
/// Some indicators produce multiple related values per bar.
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Compute indicator values, aligned 1:1 with the input.
    fn compute(&self, data: &[f64]) -> Vec<Option<Self::Outputs>>;

    /// Get the minimum data points required for the first defined value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data for at least one defined value.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}
