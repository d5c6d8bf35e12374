//! The indicator engine: computes every configured indicator column
//! for a bar series in one pass.

use std::collections::BTreeMap;

use marketml_core::config::IndicatorConfig;
use marketml_core::error::IndicatorError;
use marketml_core::traits::{Indicator, MultiOutputIndicator};
use marketml_core::types::BarSeries;
use serde::{Deserialize, Serialize};

use crate::momentum::{Macd, Rsi, Stochastic};
use crate::moving_average::{Ema, Sma};
use crate::volatility::{Atr, BollingerBands};

/// Columnar per-bar indicator values.
///
/// Every column has one entry per input bar; `None` marks the warm-up
/// period for that column. Moving average columns are keyed by period.
#[derive(Debug, Clone)]
pub struct IndicatorTable {
    /// Source bar timestamps (Unix ms)
    pub timestamps: Vec<i64>,
    /// SMA columns keyed by period
    pub sma: BTreeMap<usize, Vec<Option<f64>>>,
    /// EMA columns keyed by period
    pub ema: BTreeMap<usize, Vec<Option<f64>>>,
    /// RSI
    pub rsi: Vec<Option<f64>>,
    /// MACD line
    pub macd: Vec<Option<f64>>,
    /// MACD signal line
    pub macd_signal: Vec<Option<f64>>,
    /// MACD histogram
    pub macd_histogram: Vec<Option<f64>>,
    /// Bollinger upper band
    pub bb_upper: Vec<Option<f64>>,
    /// Bollinger middle band
    pub bb_middle: Vec<Option<f64>>,
    /// Bollinger lower band
    pub bb_lower: Vec<Option<f64>>,
    /// Stochastic %K
    pub stoch_k: Vec<Option<f64>>,
    /// Stochastic %D
    pub stoch_d: Vec<Option<f64>>,
    /// Average true range
    pub atr: Vec<Option<f64>>,
}

impl IndicatorTable {
    /// Number of bars covered.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Per-bar view of all columns at index `i`.
    pub fn row(&self, i: usize) -> Option<IndicatorRow> {
        if i >= self.len() {
            return None;
        }
        Some(IndicatorRow {
            timestamp: self.timestamps[i],
            sma: self.sma.iter().map(|(&p, col)| (p, col[i])).collect(),
            ema: self.ema.iter().map(|(&p, col)| (p, col[i])).collect(),
            rsi: self.rsi[i],
            macd: self.macd[i],
            macd_signal: self.macd_signal[i],
            macd_histogram: self.macd_histogram[i],
            bb_upper: self.bb_upper[i],
            bb_middle: self.bb_middle[i],
            bb_lower: self.bb_lower[i],
            stoch_k: self.stoch_k[i],
            stoch_d: self.stoch_d[i],
            atr: self.atr[i],
        })
    }
}

/// Per-bar derived indicator values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRow {
    /// Source bar timestamp (Unix ms)
    pub timestamp: i64,
    /// SMA values keyed by period
    pub sma: BTreeMap<usize, Option<f64>>,
    /// EMA values keyed by period
    pub ema: BTreeMap<usize, Option<f64>>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub atr: Option<f64>,
}

/// Computes the full indicator table for a bar series.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    /// Create an engine with the given window configuration.
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Compute every configured indicator column.
    ///
    /// Warm-up cells are `None`; only an empty series is an error.
    pub fn compute(&self, series: &BarSeries) -> Result<IndicatorTable, IndicatorError> {
        if series.is_empty() {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                available: 0,
            });
        }

        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();

        let mut sma_columns = BTreeMap::new();
        for &period in &self.config.sma_periods {
            sma_columns.insert(period, Sma::new(period).compute(&closes));
        }

        let mut ema_columns = BTreeMap::new();
        for &period in &self.config.ema_periods {
            ema_columns.insert(period, Ema::new(period).compute(&closes));
        }

        let rsi = Rsi::new(self.config.rsi_period).compute(&closes);

        let macd_outputs = Macd::with_periods(
            self.config.macd_fast,
            self.config.macd_slow,
            self.config.macd_signal,
        )
        .compute(&closes);
        let macd = macd_outputs.iter().map(|o| o.map(|m| m.macd)).collect();
        let macd_signal = macd_outputs.iter().map(|o| o.map(|m| m.signal)).collect();
        let macd_histogram = macd_outputs
            .iter()
            .map(|o| o.map(|m| m.histogram))
            .collect();

        let bb_outputs =
            BollingerBands::with_params(self.config.bb_period, self.config.bb_k).compute(&closes);
        let bb_upper = bb_outputs.iter().map(|o| o.map(|b| b.upper)).collect();
        let bb_middle = bb_outputs.iter().map(|o| o.map(|b| b.middle)).collect();
        let bb_lower = bb_outputs.iter().map(|o| o.map(|b| b.lower)).collect();

        let stoch = Stochastic::with_periods(self.config.stoch_period, self.config.stoch_smooth)
            .compute_ohlc(&highs, &lows, &closes);

        let atr = Atr::new(self.config.atr_period).compute_ohlc(&highs, &lows, &closes);

        Ok(IndicatorTable {
            timestamps: series.iter().map(|b| b.timestamp).collect(),
            sma: sma_columns,
            ema: ema_columns,
            rsi,
            macd,
            macd_signal,
            macd_histogram,
            bb_upper,
            bb_middle,
            bb_lower,
            stoch_k: stoch.k,
            stoch_d: stoch.d,
            atr,
        })
    }
}
