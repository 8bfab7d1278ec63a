//!
//! Batch alignment
//!
//! Elements of a batch are independent. Each element is aligned by
//! `align_targets_with` on its own scratch tables, either on a rayon pool
//! or one by one, and the results are placed into disjoint slices of the
//! batch output.
//!
use super::params::AlignParams;
use super::posterior::align_targets_with;
use crate::config::BatchConfig;
use crate::error::{AlignError, Result};
use crate::matrix::Real;
use log::{info, warn};
use ndarray::{Array2, Array3, ArrayView3, Axis};
use rayon::prelude::*;

///
/// Align each `(outputs[b], targets[b])` of the batch
///
/// * `outputs`: `(batch, n1, nc)`
/// * `targets`: `(batch, n2, nc)`
///
/// Returns the posteriors `(batch, n1, nc)`.
///
/// If any element fails, the whole call fails with the error of the
/// element of the smallest index, wrapped in `AlignError::Element`.
///
pub fn align_targets_batch<A: Real>(
    outputs: &ArrayView3<A>,
    targets: &ArrayView3<A>,
    params: &AlignParams,
    config: &BatchConfig,
) -> Result<Array3<A>> {
    let results = align_targets_batch_each(outputs, targets, params, config)?;
    let mut posteriors = Array3::zeros(outputs.dim());
    for (result, mut slot) in results.into_iter().zip(posteriors.outer_iter_mut()) {
        slot.assign(&result?);
    }
    Ok(posteriors)
}

///
/// Align each element of the batch, and return the result of each element.
///
/// Only an inconsistent batch (different batch sizes or class counts) or
/// a failure to create the worker pool fails the whole call.
///
pub fn align_targets_batch_each<A: Real>(
    outputs: &ArrayView3<A>,
    targets: &ArrayView3<A>,
    params: &AlignParams,
    config: &BatchConfig,
) -> Result<Vec<Result<Array2<A>>>> {
    check_batch_shapes(outputs, targets)?;
    let n_batch = outputs.len_of(Axis(0));
    info!("align batch of {} elements ({})", n_batch, config);
    dispatch(n_batch, config, |index| {
        let o = outputs.index_axis(Axis(0), index);
        let t = targets.index_axis(Axis(0), index);
        align_targets_with(&o, &t, params).map_err(|e| {
            warn!("batch element {} failed: {}", index, e);
            e.in_element(index)
        })
    })
}

///
/// Batch sizes and class counts should be the same.
///
fn check_batch_shapes<A: Real>(outputs: &ArrayView3<A>, targets: &ArrayView3<A>) -> Result<()> {
    let (b_outputs, _, nc_outputs) = outputs.dim();
    let (b_targets, _, nc_targets) = targets.dim();
    if b_outputs != b_targets {
        return Err(AlignError::InvalidShape(format!(
            "batch sizes differ (outputs={}, targets={})",
            b_outputs, b_targets
        )));
    }
    if nc_outputs != nc_targets {
        return Err(AlignError::InvalidShape(format!(
            "outputs have {} classes but targets have {}",
            nc_outputs, nc_targets
        )));
    }
    Ok(())
}

///
/// Run `f(0), ..., f(n-1)` according to the config and collect the results in order.
///
fn dispatch<T, F>(n: usize, config: &BatchConfig, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if !config.parallel {
        return Ok((0..n).map(f).collect());
    }
    match config.n_threads {
        Some(n_threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build()?;
            Ok(pool.install(|| (0..n).into_par_iter().map(&f).collect()))
        }
        None => Ok((0..n).into_par_iter().map(f).collect()),
    }
}
