//! Pipeline orchestration.
//!
//! Composes the indicator engine, signal generator, feature assembler
//! and label generator into two transforms:
//! - raw bars -> labeled training table, for an external classifier
//! - raw bars -> live signal snapshot, for inference-time display
//!
//! The pipeline owns no I/O; fetching bars and persisting outputs are
//! the caller's responsibility.

mod config;
mod logging;
mod pipeline;

pub use self::config::load_config;
pub use logging::setup_logging;
pub use pipeline::{LiveSnapshot, Pipeline, TrainingTable};
