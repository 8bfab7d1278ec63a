//!
//! AlignParams: numeric constants of the alignment
//!
use crate::prob::MAX_EXP;
use serde::{Deserialize, Serialize};

///
/// Parameters of ctc target alignment
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignParams {
    ///
    /// log prob charged per target state skipped before the first emission,
    /// and per time step spent before entering the first target state
    pub skip: f64,
    ///
    /// output probs are clipped to at least this value before taking a log
    pub output_floor: f64,
    ///
    /// exponent arguments of the alignment weights are clamped into `[-max_exp, max_exp]`
    pub max_exp: f64,
    ///
    /// lower bound of normalization denominators
    pub norm_floor: f64,
    ///
    /// allowed deviation of row sums from 1 in input/output checks
    pub tolerance: f64,
}

impl AlignParams {
    pub fn new(skip: f64) -> AlignParams {
        assert!(skip <= 0.0, "skip penalty should be a log prob");
        AlignParams {
            skip,
            output_floor: 1e-6,
            max_exp: MAX_EXP,
            norm_floor: 1e-9,
            tolerance: 1e-4,
        }
    }
}

impl Default for AlignParams {
    fn default() -> AlignParams {
        AlignParams::new(-5.0)
    }
}

impl std::fmt::Display for AlignParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "skip: {}", self.skip)?;
        writeln!(f, "output_floor: {}", self.output_floor)?;
        writeln!(f, "max_exp: {}", self.max_exp)?;
        writeln!(f, "norm_floor: {}", self.norm_floor)?;
        writeln!(f, "tolerance: {}", self.tolerance)
    }
}
