//!
//! Posterior calculation from the result of Forward/Backward.
//!
//! - **Alignment weights** `epath[i][j]` (for each time and target state)
//!     Soft correspondence between output time `i` and target state `j`.
//!     Each column sums to 1.
//!
//! - **Aligned posteriors** `aligned[i][c]` (for each time and class)
//!     Targets projected through the alignment weights. Each row sums to 1.
//!
use super::backward::{backward_algorithm, forward_backward};
use super::forward::forward_algorithm;
use super::matching::log_match_matrix;
use super::params::AlignParams;
use crate::error::{AlignError, Result};
use crate::matrix::{check_row, check_rownorm, max_value, Real};
use crate::prob::limexp;
use log::{debug, warn};
use ndarray::{Array2, ArrayView2};

///
/// Convert `both = f + b` into column-normalized alignment weights
///
/// ```text
/// epath[i][j] = limexp(both[i][j] - max(both))
/// epath[i][j] /= max(norm_floor, sum_i epath[i][j])
/// ```
///
pub fn alignment_weights(both: &ArrayView2<f64>, params: &AlignParams) -> Array2<f64> {
    let max = max_value(both);
    let mut epath = both.mapv(|x| limexp(x - max, params.max_exp));
    for (j, mut column) in epath.columns_mut().into_iter().enumerate() {
        let total = column.sum();
        if total < params.norm_floor {
            warn!("target state {} has no support (sum={})", j, total);
        }
        column /= total.max(params.norm_floor);
    }
    epath
}

///
/// Project the alignment weights through the targets
///
/// ```text
/// aligned[i][c] = sum_j epath[i][j] targets[j][c]
/// ```
///
pub fn project_targets<A: Real>(epath: &ArrayView2<f64>, targets: &ArrayView2<A>) -> Array2<f64> {
    let targets = targets.mapv(|x| x.as_f64());
    epath.dot(&targets)
}

///
/// Divide each row by its sum, floored at `floor`.
///
/// Returns the indices of the rows whose sum was below `floor`. These rows
/// sum to less than 1 after the division.
///
pub fn normalize_rows(aligned: &mut Array2<f64>, floor: f64) -> Vec<usize> {
    let mut floored = Vec::new();
    for (i, mut row) in aligned.rows_mut().into_iter().enumerate() {
        let total = row.sum();
        if total < floor {
            floored.push(i);
        }
        row /= total.max(floor);
    }
    floored
}

///
/// Validate a pair of `outputs (n1, nc)` and `targets (n2, nc)`.
///
/// * the number of classes should be the same
/// * `1 <= n2 <= n1`
/// * every row should be a distribution
///
pub fn check_inputs<A: Real>(
    outputs: &ArrayView2<A>,
    targets: &ArrayView2<A>,
    params: &AlignParams,
) -> Result<()> {
    let (n1, nc_outputs) = outputs.dim();
    let (n2, nc_targets) = targets.dim();
    if nc_outputs != nc_targets {
        return Err(AlignError::InvalidShape(format!(
            "outputs have {} classes but targets have {}",
            nc_outputs, nc_targets
        )));
    }
    if n1 == 0 || n2 == 0 {
        return Err(AlignError::InvalidShape(format!(
            "empty sequence (n1={}, n2={})",
            n1, n2
        )));
    }
    if n2 > n1 {
        return Err(AlignError::InvalidShape(format!(
            "targets are longer than outputs ({} > {})",
            n2, n1
        )));
    }
    check_rownorm(outputs, "outputs", params.tolerance)?;
    check_rownorm(targets, "targets", params.tolerance)?;
    Ok(())
}

///
/// Align the targets to the outputs and return the class posteriors
/// of each output time, with the default parameters.
///
/// * `outputs`: `(n1, nc)`, each row is a distribution over classes
/// * `targets`: `(n2, nc)`, each row is a distribution over classes, `n2 <= n1`
///
/// Returns `(n1, nc)` posteriors whose rows are distributions.
///
pub fn align_targets<A: Real>(outputs: &ArrayView2<A>, targets: &ArrayView2<A>) -> Result<Array2<A>> {
    align_targets_with(outputs, targets, &AlignParams::default())
}

///
/// `align_targets` with the given parameters
///
pub fn align_targets_with<A: Real>(
    outputs: &ArrayView2<A>,
    targets: &ArrayView2<A>,
    params: &AlignParams,
) -> Result<Array2<A>> {
    check_inputs(outputs, targets, params)?;
    debug!(
        "align n1={} n2={} nc={}",
        outputs.nrows(),
        targets.nrows(),
        targets.ncols()
    );
    let lmatch = log_match_matrix(outputs, targets, params);
    let both = forward_backward(&lmatch.view(), params.skip);
    let (_, posteriors) = to_posteriors(&both.view(), targets, params)?;
    Ok(posteriors.mapv(A::from_f64))
}

///
/// `both -> (epath, aligned)` followed by the check of the aligned posteriors
///
/// Rows whose sum hit the floor cannot be normalized and are left out of
/// the check.
///
fn to_posteriors<A: Real>(
    both: &ArrayView2<f64>,
    targets: &ArrayView2<A>,
    params: &AlignParams,
) -> Result<(Array2<f64>, Array2<f64>)> {
    let epath = alignment_weights(both, params);
    let mut aligned = project_targets(&epath.view(), targets);
    let floored = normalize_rows(&mut aligned, params.norm_floor);
    for (i, row) in aligned.outer_iter().enumerate() {
        if floored.contains(&i) {
            warn!(
                "time {} has no support (row sum={}), left unnormalized",
                i,
                row.sum()
            );
        } else {
            check_row(&row, "posteriors", i, params.tolerance)?;
        }
    }
    Ok((epath, aligned))
}

///
/// Every intermediate table of a single alignment
///
#[derive(Debug, Clone)]
pub struct CtcAlignment {
    /// log match matrix `(n1, n2)`
    pub lmatch: Array2<f64>,
    /// forward scores `(n1, n2)`
    pub forward: Array2<f64>,
    /// backward scores `(n1, n2)`
    pub backward: Array2<f64>,
    /// `forward + backward`
    pub both: Array2<f64>,
    /// column-normalized alignment weights `(n1, n2)`
    pub epath: Array2<f64>,
    /// row-normalized class posteriors `(n1, nc)`
    pub posteriors: Array2<f64>,
}

impl CtcAlignment {
    ///
    /// Run the alignment keeping all tables
    ///
    pub fn run<A: Real>(
        outputs: &ArrayView2<A>,
        targets: &ArrayView2<A>,
        params: &AlignParams,
    ) -> Result<CtcAlignment> {
        check_inputs(outputs, targets, params)?;
        let lmatch = log_match_matrix(outputs, targets, params);
        let forward = forward_algorithm(&lmatch.view(), params.skip);
        let backward = backward_algorithm(&lmatch.view(), params.skip);
        let both = &forward + &backward;
        let (epath, posteriors) = to_posteriors(&both.view(), targets, params)?;
        Ok(CtcAlignment {
            lmatch,
            forward,
            backward,
            both,
            epath,
            posteriors,
        })
    }
    ///
    /// Expected target state index `sum_j j epath[i][j] / sum_j epath[i][j]` of each time
    ///
    pub fn expected_states(&self) -> Vec<f64> {
        self.epath
            .rows()
            .into_iter()
            .map(|row| {
                let total = row.sum();
                let weighted: f64 = row.iter().enumerate().map(|(j, &w)| j as f64 * w).sum();
                weighted / total
            })
            .collect()
    }
}

impl std::fmt::Display for CtcAlignment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "lmatch\n{:.4}", self.lmatch)?;
        writeln!(f, "forward\n{:.4}", self.forward)?;
        writeln!(f, "backward\n{:.4}", self.backward)?;
        writeln!(f, "epath\n{:.4}", self.epath)?;
        writeln!(f, "posteriors\n{:.4}", self.posteriors)
    }
}
