//!
//! 2D matrix helpers on top of `ndarray`
//!
//! Sequences of distributions are stored as `Array2<A>` with shape
//! `(length, n_classes)`, and batches as `Array3<A>` with shape
//! `(batch, length, n_classes)`. All dp tables are `Array2<f64>`.
//!
use crate::error::{AlignError, Result};
use ndarray::{s, Array2, Array3, ArrayView1, ArrayView2};
use num_traits::Float;

///
/// Element type of input/output matrices (`f32` or `f64`).
///
/// Internal calculation is always in `f64`.
///
pub trait Real: Float + Send + Sync + std::fmt::Debug + std::fmt::Display + 'static {
    fn as_f64(self) -> f64;
    fn from_f64(x: f64) -> Self;
}

impl Real for f32 {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
    #[inline]
    fn from_f64(x: f64) -> f32 {
        x as f32
    }
}

impl Real for f64 {
    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
    #[inline]
    fn from_f64(x: f64) -> f64 {
        x
    }
}

///
/// Check that every row of `m` is a probability distribution, that is
/// `0 <= m[i,j] <= 1` and `|sum_j m[i,j] - 1| <= tolerance`.
///
/// Returns `InvalidDistribution` for the first row that violates it.
/// `NaN` entries are rejected.
///
pub fn check_rownorm<A: Real>(m: &ArrayView2<A>, name: &'static str, tolerance: f64) -> Result<()> {
    for (i, row) in m.outer_iter().enumerate() {
        check_row(&row, name, i, tolerance)?;
    }
    Ok(())
}

///
/// Check of a single row `i` of `check_rownorm`
///
pub fn check_row<A: Real>(
    row: &ArrayView1<A>,
    name: &'static str,
    i: usize,
    tolerance: f64,
) -> Result<()> {
    let mut total = 0.0;
    for &x in row.iter() {
        let value = x.as_f64();
        if !(value >= 0.0) {
            return Err(AlignError::InvalidDistribution {
                name,
                row: i,
                reason: format!("entry {} is not non-negative", value),
            });
        }
        if value > 1.0 {
            return Err(AlignError::InvalidDistribution {
                name,
                row: i,
                reason: format!("entry {} is larger than 1", value),
            });
        }
        total += value;
    }
    if !((total - 1.0).abs() <= tolerance) {
        return Err(AlignError::InvalidDistribution {
            name,
            row: i,
            reason: format!("row sum {} is not 1", total),
        });
    }
    Ok(())
}

///
/// Reverse both axes: `r[i,j] = m[n-1-i, m-1-j]`
///
pub fn reversed(m: &ArrayView2<f64>) -> Array2<f64> {
    m.slice(s![..;-1, ..;-1]).to_owned()
}

///
/// Maximum element, ignoring `NaN`. `-inf` for an empty matrix.
///
pub fn max_value(m: &ArrayView2<f64>) -> f64 {
    m.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

///
/// Convert `Vec` of rows into a matrix.
///
/// Rows must have the same length. Empty input becomes `(0, 0)` matrix.
///
pub fn from_rows<A: Clone>(rows: &[Vec<A>]) -> Result<Array2<A>> {
    let n_cols = rows.first().map_or(0, |row| row.len());
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n_cols) {
        return Err(AlignError::InvalidShape(format!(
            "row {} has {} columns but row 0 has {}",
            i,
            row.len(),
            n_cols
        )));
    }
    let data: Vec<A> = rows.iter().flatten().cloned().collect();
    Array2::from_shape_vec((rows.len(), n_cols), data)
        .map_err(|e| AlignError::InvalidShape(e.to_string()))
}

///
/// Convert batch of `Vec` of rows into a 3D array `(batch, rows, cols)`.
///
/// Every element must have the same shape.
///
pub fn from_batch_rows<A: Clone>(batch: &[Vec<Vec<A>>]) -> Result<Array3<A>> {
    let mats = batch
        .iter()
        .map(|rows| from_rows(rows))
        .collect::<Result<Vec<_>>>()?;
    let shape = mats.first().map_or((0, 0), |m| m.dim());
    if let Some((i, m)) = mats.iter().enumerate().find(|(_, m)| m.dim() != shape) {
        return Err(AlignError::InvalidShape(format!(
            "batch element {} has shape {:?} but element 0 has {:?}",
            i,
            m.dim(),
            shape
        )));
    }
    let data: Vec<A> = mats.iter().flat_map(|m| m.iter().cloned()).collect();
    Array3::from_shape_vec((mats.len(), shape.0, shape.1), data)
        .map_err(|e| AlignError::InvalidShape(e.to_string()))
}

///
/// Convert matrix into `Vec` of rows.
///
pub fn to_rows<A: Clone>(m: &ArrayView2<A>) -> Vec<Vec<A>> {
    m.outer_iter().map(|row| row.to_vec()).collect()
}
