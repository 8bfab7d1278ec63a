//!
//! Python bindings
//!
//! Supported features
//!
//! - ctc_align_targets
//! - ctc_align_targets_batch
//! - forward_algorithm
//! - forwardbackward
//!
//! Matrices are passed as nested lists of rows.
//!
use crate::config::BatchConfig;
use crate::ctc::{
    align_targets, align_targets_batch, forward_algorithm, forward_backward, AlignParams,
};
use crate::error::AlignError;
use crate::matrix::{from_batch_rows, from_rows, to_rows};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

impl From<AlignError> for PyErr {
    fn from(e: AlignError) -> PyErr {
        PyValueError::new_err(e.to_string())
    }
}

/// Posteriors `(n1, nc)` of outputs `(n1, nc)` aligned with targets `(n2, nc)`
#[pyfunction]
fn ctc_align_targets(outputs: Vec<Vec<f32>>, targets: Vec<Vec<f32>>) -> PyResult<Vec<Vec<f32>>> {
    let outputs = from_rows(&outputs)?;
    let targets = from_rows(&targets)?;
    let posteriors = align_targets(&outputs.view(), &targets.view())?;
    Ok(to_rows(&posteriors.view()))
}

/// Posteriors `(b, n1, nc)` of batch outputs `(b, n1, nc)` and targets `(b, n2, nc)`
///
/// Elements run in parallel unless `CTC_NOTHREAD` is set to a non-zero integer.
#[pyfunction]
fn ctc_align_targets_batch(
    py: Python,
    outputs: Vec<Vec<Vec<f32>>>,
    targets: Vec<Vec<Vec<f32>>>,
) -> PyResult<Vec<Vec<Vec<f32>>>> {
    let outputs = from_batch_rows(&outputs)?;
    let targets = from_batch_rows(&targets)?;
    let config = BatchConfig::from_env();
    let posteriors = py.allow_threads(|| {
        align_targets_batch(
            &outputs.view(),
            &targets.view(),
            &AlignParams::default(),
            &config,
        )
    })?;
    Ok(posteriors
        .outer_iter()
        .map(|p| to_rows(&p))
        .collect())
}

/// Forward scores of the log match matrix
#[pyfunction(skip = "-5.0")]
#[pyo3(name = "forward_algorithm")]
fn py_forward_algorithm(lmatch: Vec<Vec<f64>>, skip: f64) -> PyResult<Vec<Vec<f64>>> {
    let lmatch = from_rows(&lmatch)?;
    let lr = forward_algorithm(&lmatch.view(), skip);
    Ok(to_rows(&lr.view()))
}

/// Forward + Backward scores of the log match matrix
#[pyfunction]
fn forwardbackward(lmatch: Vec<Vec<f64>>) -> PyResult<Vec<Vec<f64>>> {
    let lmatch = from_rows(&lmatch)?;
    let both = forward_backward(&lmatch.view(), AlignParams::default().skip);
    Ok(to_rows(&both.view()))
}

/// A Python module implemented in Rust.
#[pymodule]
fn ctcalign(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ctc_align_targets, m)?)?;
    m.add_function(wrap_pyfunction!(ctc_align_targets_batch, m)?)?;
    m.add_function(wrap_pyfunction!(py_forward_algorithm, m)?)?;
    m.add_function(wrap_pyfunction!(forwardbackward, m)?)?;
    Ok(())
}
