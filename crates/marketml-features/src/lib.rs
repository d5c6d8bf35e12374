//! Feature assembly and forward-return labeling.
//!
//! The assembler flattens raw bars, indicator values, discrete signals
//! and externally supplied sentiment into one candidate record per bar.
//! A single explicit validity pass then either accepts each candidate as
//! a complete [`FeatureRow`] or records why it was dropped, so the
//! data-loss policy stays auditable. Labels are computed independently
//! from future closes.

pub mod assembler;
pub mod labels;
pub mod validity;

pub use assembler::{FeatureAssembler, FeatureCandidate, FeatureRow, LAG_STEPS};
pub use labels::{Label, LabelGenerator, LabeledSample};
pub use validity::{DropReason, DroppedRow};
