//! Core data types for the market ML pipeline.

mod ohlcv;
mod sentiment;
mod signal;

pub use ohlcv::{Bar, BarSeries};
pub use sentiment::{SentimentSnapshot, SentimentTable};
pub use signal::{Action, SignalRow};
