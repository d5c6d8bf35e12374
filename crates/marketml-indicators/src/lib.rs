//! Technical indicator engine.
//!
//! This crate provides the derived time series used by the signal
//! generator and the feature assembler:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD, Stochastic)
//! - Volatility indicators (ATR, Bollinger Bands)
//!
//! All outputs are aligned 1:1 with the input bars; `None` marks the
//! warm-up period where the configured window is not yet full.

pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod volatility;

pub use engine::{IndicatorEngine, IndicatorRow, IndicatorTable};
pub use momentum::{Macd, MacdOutput, Rsi, Stochastic, StochasticOutput};
pub use moving_average::{Ema, Sma};
pub use volatility::{Atr, BollingerBands, BollingerOutput};
