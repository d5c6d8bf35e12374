//! Pipeline configuration records.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Indicator window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// SMA periods to compute (one column per period)
    #[serde(default = "default_sma_periods")]
    pub sma_periods: Vec<usize>,
    /// EMA periods to compute (one column per period)
    #[serde(default = "default_ema_periods")]
    pub ema_periods: Vec<usize>,
    /// RSI window
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
    /// MACD fast EMA period
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,
    /// MACD slow EMA period
    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,
    /// MACD signal EMA period
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
    /// Bollinger band window
    #[serde(default = "default_bb_period")]
    pub bb_period: usize,
    /// Bollinger band width in standard deviations
    #[serde(default = "default_bb_k")]
    pub bb_k: f64,
    /// Stochastic %K window
    #[serde(default = "default_stoch_period")]
    pub stoch_period: usize,
    /// Stochastic %D smoothing window
    #[serde(default = "default_stoch_smooth")]
    pub stoch_smooth: usize,
    /// ATR window
    #[serde(default = "default_atr_period")]
    pub atr_period: usize,
}

fn default_sma_periods() -> Vec<usize> {
    vec![20, 50, 200]
}
fn default_ema_periods() -> Vec<usize> {
    vec![20]
}
fn default_rsi_period() -> usize {
    14
}
fn default_macd_fast() -> usize {
    12
}
fn default_macd_slow() -> usize {
    26
}
fn default_macd_signal() -> usize {
    9
}
fn default_bb_period() -> usize {
    20
}
fn default_bb_k() -> f64 {
    2.0
}
fn default_stoch_period() -> usize {
    14
}
fn default_stoch_smooth() -> usize {
    3
}
fn default_atr_period() -> usize {
    14
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_periods: default_sma_periods(),
            ema_periods: default_ema_periods(),
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            bb_period: default_bb_period(),
            bb_k: default_bb_k(),
            stoch_period: default_stoch_period(),
            stoch_smooth: default_stoch_smooth(),
            atr_period: default_atr_period(),
        }
    }
}

impl IndicatorConfig {
    /// Validate the configured windows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("stoch_period", self.stoch_period),
            ("stoch_smooth", self.stoch_smooth),
            ("atr_period", self.atr_period),
        ];
        for (name, value) in windows {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }
        for &period in self.sma_periods.iter().chain(self.ema_periods.iter()) {
            if period == 0 {
                return Err(ConfigError::Invalid(
                    "moving average periods must be at least 1".into(),
                ));
            }
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::Invalid(
                "macd_fast must be less than macd_slow".into(),
            ));
        }
        if self.bb_period < 2 {
            return Err(ConfigError::Invalid("bb_period must be at least 2".into()));
        }
        if self.bb_k <= 0.0 {
            return Err(ConfigError::Invalid("bb_k must be positive".into()));
        }
        Ok(())
    }
}

/// Forward-return labeling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Number of bars to look ahead for the future return
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,
    /// Fractional return threshold separating Buy/Sell from Hold
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_lookahead() -> usize {
    5
}
fn default_threshold() -> f64 {
    0.01
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            lookahead: default_lookahead(),
            threshold: default_threshold(),
        }
    }
}

impl LabelConfig {
    /// Validate the labeling parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookahead == 0 {
            return Err(ConfigError::Invalid("lookahead must be at least 1".into()));
        }
        if self.threshold <= 0.0 {
            return Err(ConfigError::Invalid("threshold must be positive".into()));
        }
        Ok(())
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub indicators: IndicatorConfig,
    #[serde(default)]
    pub label: LabelConfig,
}

impl PipelineConfig {
    /// Validate all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indicators.validate()?;
        self.label.validate()
    }
}
