//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Compact OHLCV bar.
/// Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Calculate the bar's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Get the calendar date of the bar (UTC).
    pub fn date(&self) -> NaiveDate {
        self.datetime().date_naive()
    }

    /// Calculate the true range (used for ATR).
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        match prev_close {
            Some(pc) => {
                let hl = self.high - self.low;
                let hc = (self.high - pc).abs();
                let lc = (self.low - pc).abs();
                hl.max(hc).max(lc)
            }
            None => self.high - self.low,
        }
    }

    /// Check the bar's internal consistency.
    fn check(&self, index: usize) -> Result<(), DataError> {
        if !(self.open > 0.0 && self.high > 0.0 && self.low > 0.0 && self.close > 0.0) {
            return Err(DataError::InvalidBar {
                index,
                reason: "prices must be positive".to_string(),
            });
        }
        if self.high < self.low {
            return Err(DataError::InvalidBar {
                index,
                reason: format!("high {} below low {}", self.high, self.low),
            });
        }
        if self.open < self.low
            || self.open > self.high
            || self.close < self.low
            || self.close > self.high
        {
            return Err(DataError::InvalidBar {
                index,
                reason: "open/close outside the low..high range".to_string(),
            });
        }
        if self.volume < 0.0 {
            return Err(DataError::InvalidBar {
                index,
                reason: "volume must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Time-series container for bars, ordered by timestamp ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarSeries {
    /// Symbol identifier
    pub symbol: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Create a new empty bar series.
    pub fn new(symbol: String) -> Self {
        Self {
            symbol,
            bars: Vec::new(),
        }
    }

    /// Create a series from a vector of bars.
    pub fn from_bars(symbol: String, bars: Vec<Bar>) -> Self {
        Self { symbol, bars }
    }

    /// Push a new bar.
    pub fn push(&mut self, bar: Bar) {
        self.bars.push(bar);
    }

    /// Push multiple bars.
    pub fn extend(&mut self, bars: impl IntoIterator<Item = Bar>) {
        self.bars.extend(bars);
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Get a bar by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract open prices as a vector.
    pub fn opens(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.open).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }

    /// Validate the series: strictly increasing timestamps and
    /// internally consistent bars.
    ///
    /// Malformed input is a caller error and is reported immediately;
    /// the series is never corrected silently.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.bars.is_empty() {
            return Err(DataError::EmptySeries);
        }
        let mut prev_ts: Option<i64> = None;
        for (i, bar) in self.bars.iter().enumerate() {
            bar.check(i)?;
            if let Some(prev) = prev_ts {
                if bar.timestamp <= prev {
                    return Err(DataError::NonMonotonicTimestamp {
                        index: i,
                        timestamp: bar.timestamp,
                        previous: prev,
                    });
                }
            }
            prev_ts = Some(bar.timestamp);
        }
        Ok(())
    }
}

impl FromIterator<Bar> for BarSeries {
    fn from_iter<T: IntoIterator<Item = Bar>>(iter: T) -> Self {
        Self {
            symbol: String::new(),
            bars: iter.into_iter().collect(),
        }
    }
}
