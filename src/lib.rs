//!
//! ctcalign: soft alignment of target distributions to the outputs of a
//! sequence model, by log-space forward-backward under a monotonic
//! skip-penalized model.
//!
#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod config;
pub mod ctc;
pub mod error;
pub mod matrix;
pub mod prelude;
pub mod prob;
#[cfg(feature = "python")]
pub mod python;
