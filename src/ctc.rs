//!
//! Soft alignment of target distributions to output distributions
//!
//! # Overview of calculation
//!
//! o = o[0],...,o[n1-1] : output distributions over `nc` classes
//! y = y[0],...,y[n2-1] : target distributions over `nc` classes (`n2 <= n1`)
//!
//! Match
//! M[i][j] = log sum_c o[i][c] y[j][c]
//!
//! Forward
//! F[i][j] = log P(o[0..=i] is emitted and the alignment is at state j at time i)
//!
//! Backward
//! B[i][j] = Forward of the matrix reversed along both axes, reversed back
//!
//! Alignment weights
//! E[i][j] = exp(F[i][j] + B[i][j] - max), normalized along i for each j
//!
//! Posteriors
//! P[i][c] = sum_j E[i][j] y[j][c], normalized along c for each i
//!
pub mod backward;
pub mod batch;
pub mod forward;
pub mod matching;
pub mod mocks;
pub mod params;
pub mod posterior;

pub use backward::{backward_algorithm, forward_backward};
pub use batch::{align_targets_batch, align_targets_batch_each};
pub use forward::forward_algorithm;
pub use matching::log_match_matrix;
pub use params::AlignParams;
pub use posterior::{align_targets, align_targets_with, CtcAlignment};
