//!
//! Log match probability matrix between outputs and targets
//!
//! ```text
//! lmatch[t1, t2] = log sum_c o'[t1, c] y[t2, c]
//! ```
//!
//! where `o'[t1]` is the output distribution clipped to `params.output_floor`
//! and renormalized, and `y[t2]` is the target distribution.
//!
use super::params::AlignParams;
use crate::matrix::Real;
use ndarray::{Array1, Array2, ArrayView2};

///
/// Build `lmatch` of shape `(n1, n2)` from outputs `(n1, nc)` and targets `(n2, nc)`.
///
/// Shapes are not checked here; callers should validate them.
/// Disjoint supports give `-inf`, which the forward algorithm accepts.
///
pub fn log_match_matrix<A: Real>(
    outputs: &ArrayView2<A>,
    targets: &ArrayView2<A>,
    params: &AlignParams,
) -> Array2<f64> {
    let n1 = outputs.nrows();
    let n2 = targets.nrows();
    let mut lmatch = Array2::zeros((n1, n2));
    for (t1, output) in outputs.outer_iter().enumerate() {
        let out = clip_and_normalize(output.mapv(|x| x.as_f64()), params.output_floor);
        for (t2, target) in targets.outer_iter().enumerate() {
            let overlap: f64 = out
                .iter()
                .zip(target.iter())
                .map(|(&o, &y)| o * y.as_f64())
                .sum();
            lmatch[[t1, t2]] = overlap.ln();
        }
    }
    lmatch
}

/// clip each entry to `>= floor` and renormalize to sum 1
fn clip_and_normalize(mut out: Array1<f64>, floor: f64) -> Array1<f64> {
    out.mapv_inplace(|x| x.max(floor));
    let total = out.sum();
    out / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ctc::mocks::{mock_scenario, one_hot_diagonal};
    use ndarray::array;

    #[test]
    fn match_matrix_scenario() {
        let (outputs, targets) = mock_scenario();
        let lmatch = log_match_matrix(&outputs.view(), &targets.view(), &AlignParams::default());
        assert_eq!(lmatch.dim(), (3, 2));
        // one-hot targets pick the (clipped) output prob of the class
        assert_abs_diff_eq!(lmatch[[0, 0]], 0.9f64.ln(), epsilon = 1e-5);
        assert_abs_diff_eq!(lmatch[[0, 1]], 0.1f64.ln(), epsilon = 1e-5);
        assert_abs_diff_eq!(lmatch[[1, 0]], 0.5f64.ln(), epsilon = 1e-5);
        assert_abs_diff_eq!(lmatch[[1, 1]], 0.5f64.ln(), epsilon = 1e-5);
        assert_abs_diff_eq!(lmatch[[2, 0]], 0.1f64.ln(), epsilon = 1e-5);
        assert_abs_diff_eq!(lmatch[[2, 1]], 0.9f64.ln(), epsilon = 1e-5);
    }
    #[test]
    fn match_matrix_soft_targets() {
        let outputs = array![[0.25f64, 0.75]];
        let targets = array![[0.5f64, 0.5], [0.2, 0.8]];
        let lmatch = log_match_matrix(&outputs.view(), &targets.view(), &AlignParams::default());
        assert_abs_diff_eq!(lmatch[[0, 0]], 0.5f64.ln(), epsilon = 1e-9);
        assert_abs_diff_eq!(lmatch[[0, 1]], (0.05f64 + 0.6).ln(), epsilon = 1e-9);
    }
    #[test]
    fn match_matrix_zero_outputs_are_clipped() {
        // exact zeros in outputs are floored, so the match is tiny but finite
        let targets = one_hot_diagonal::<f64>(3);
        let lmatch = log_match_matrix(&targets.view(), &targets.view(), &AlignParams::default());
        for t1 in 0..3 {
            for t2 in 0..3 {
                let v = lmatch[[t1, t2]];
                assert!(v.is_finite());
                if t1 == t2 {
                    assert_abs_diff_eq!(v, 0.0, epsilon = 1e-5);
                } else {
                    assert_abs_diff_eq!(v, (1e-6f64).ln(), epsilon = 1e-5);
                }
            }
        }
    }
    #[test]
    fn match_matrix_disjoint_without_floor() {
        let params = AlignParams {
            output_floor: 0.0,
            ..AlignParams::default()
        };
        let outputs = array![[1.0f32, 0.0]];
        let targets = array![[0.0f32, 1.0]];
        let lmatch = log_match_matrix(&outputs.view(), &targets.view(), &params);
        assert_eq!(lmatch[[0, 0]], f64::NEG_INFINITY);
    }
}
