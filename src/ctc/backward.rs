//!
//! Backward algorithm definitions
//!
//! The model is symmetric under reversing both the time axis and the target
//! state axis, so the backward table is the forward table of the reversed
//! match matrix, reversed back.
//!
use super::forward::forward_algorithm;
use crate::matrix::reversed;
use ndarray::{Array2, ArrayView2};

///
/// Run Backward algorithm on the log match matrix
///
/// ```text
/// rlmatch[i][j] = lmatch[n-1-i][m-1-j]
/// b[i][j] = forward(rlmatch)[n-1-i][m-1-j]
/// ```
///
/// `b[i][j]` includes the emission `lmatch[i][j]` of the cell itself.
///
pub fn backward_algorithm(lmatch: &ArrayView2<f64>, skip: f64) -> Array2<f64> {
    let rlmatch = reversed(lmatch);
    let rrl = forward_algorithm(&rlmatch.view(), skip);
    reversed(&rrl.view())
}

///
/// Run Forward and Backward and combine them
///
/// ```text
/// both[i][j] = f[i][j] + b[i][j]
/// ```
///
/// The emission of cell `(i, j)` is counted in both `f` and `b`, so `both` is
/// only meaningful up to normalization.
///
pub fn forward_backward(lmatch: &ArrayView2<f64>, skip: f64) -> Array2<f64> {
    let lr = forward_algorithm(lmatch, skip);
    let rl = backward_algorithm(lmatch, skip);
    lr + rl
}
