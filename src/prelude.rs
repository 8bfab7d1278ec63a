//!
//! globally-available parts
//!
pub use crate::config::BatchConfig;
pub use crate::ctc::{
    align_targets, align_targets_batch, align_targets_batch_each, align_targets_with, AlignParams,
    CtcAlignment,
};
pub use crate::error::{AlignError, Result};
pub use crate::matrix::Real;
