//! Core types and traits for the market ML pipeline.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries)
//! - Sentiment lookup table
//! - Trading signal types
//! - Pipeline configuration
//! - Core traits for indicators

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{IndicatorConfig, LabelConfig, PipelineConfig};
pub use error::{MarketMlError, MarketMlResult};
pub use traits::*;
pub use types::*;
