//!
//! Mock inputs for tests and benchmarks
//!
use crate::matrix::Real;
use ndarray::{Array2, Array3, Axis};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// 3 outputs and 2 one-hot targets over 2 classes
///
/// ```text
/// outputs = [[0.9, 0.1], [0.5, 0.5], [0.1, 0.9]]
/// targets = [[1, 0], [0, 1]]
/// ```
///
pub fn mock_scenario() -> (Array2<f64>, Array2<f64>) {
    let outputs = ndarray::array![[0.9, 0.1], [0.5, 0.5], [0.1, 0.9]];
    let targets = ndarray::array![[1.0, 0.0], [0.0, 1.0]];
    (outputs, targets)
}

///
/// `n x n` matrix whose `t`-th row is one-hot at class `t`
///
pub fn one_hot_diagonal<A: Real>(n: usize) -> Array2<A> {
    Array2::from_shape_fn((n, n), |(i, j)| if i == j { A::one() } else { A::zero() })
}

///
/// Rows of soft one-hot distributions
///
/// `t`-th row has prob `p` at `classes[t]` and `(1-p)/(nc-1)` elsewhere.
///
pub fn soft_one_hot<A: Real>(classes: &[usize], nc: usize, p: f64) -> Array2<A> {
    assert!(nc > 1);
    let q = (1.0 - p) / (nc - 1) as f64;
    Array2::from_shape_fn((classes.len(), nc), |(t, c)| {
        A::from_f64(if classes[t] == c { p } else { q })
    })
}

///
/// Random `n x nc` matrix whose rows are distributions
///
pub fn random_rownorm<A: Real>(n: usize, nc: usize, rng: &mut Xoshiro256PlusPlus) -> Array2<A> {
    let mut m: Array2<f64> = Array2::from_shape_fn((n, nc), |_| rng.gen_range(0.01..1.0));
    for mut row in m.rows_mut() {
        let total = row.sum();
        row /= total;
    }
    m.mapv(A::from_f64)
}

///
/// Random pair of outputs `(n1, nc)` and targets `(n2, nc)`
///
pub fn mock_random_pair<A: Real>(
    n1: usize,
    n2: usize,
    nc: usize,
    seed: u64,
) -> (Array2<A>, Array2<A>) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let outputs = random_rownorm(n1, nc, &mut rng);
    let targets = random_rownorm(n2, nc, &mut rng);
    (outputs, targets)
}

///
/// Random batch of outputs `(batch, n1, nc)` and targets `(batch, n2, nc)`
///
pub fn mock_random_batch<A: Real>(
    batch: usize,
    n1: usize,
    n2: usize,
    nc: usize,
    seed: u64,
) -> (Array3<A>, Array3<A>) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut outputs = Array3::zeros((batch, n1, nc));
    let mut targets = Array3::zeros((batch, n2, nc));
    for b in 0..batch {
        outputs
            .index_axis_mut(Axis(0), b)
            .assign(&random_rownorm::<A>(n1, nc, &mut rng));
        targets
            .index_axis_mut(Axis(0), b)
            .assign(&random_rownorm::<A>(n2, nc, &mut rng));
    }
    (outputs, targets)
}
