//! Error types for the market ML pipeline.

use thiserror::Error;

/// Top-level pipeline error.
#[derive(Error, Debug)]
pub enum MarketMlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Malformed input data errors.
///
/// These are caller errors: the pipeline reports them immediately
/// and never attempts to correct the input.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Empty bar series")]
    EmptySeries,

    #[error("Non-monotonic timestamp at bar {index}: {timestamp} follows {previous}")]
    NonMonotonicTimestamp {
        index: usize,
        timestamp: i64,
        previous: i64,
    },

    #[error("Invalid bar at index {index}: {reason}")]
    InvalidBar { index: usize, reason: String },
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to load configuration: {0}")]
    Load(String),
}

/// Result type alias for pipeline operations.
pub type MarketMlResult<T> = Result<T, MarketMlError>;
