//!
//! Forward algorithm definitions
//!
use crate::prob::{log_add, log_mul};
use ndarray::{Array1, Array2, ArrayView2};

///
/// Run Forward algorithm on the log match matrix `lmatch` of shape `(n, m)`
///
/// `f[i][j]` = log P(`x[0..=i]` are emitted and the alignment is at target state `j` at time `i`)
///
/// ```text
/// f[-1][j] = skip * j
///
/// for i = 0, ..., n-1
/// f[i][j] = log_add(
///     f[i-1][j]   + lmatch[i][j],   (stay in j)
///     f[i-1][j-1] + lmatch[i][j],   (advance from j-1 to j)
/// )
/// where f[i-1][-1] := skip * i
/// ```
///
/// The returned table has the same shape as `lmatch` and `lr[i]` is `f[i]`.
///
pub fn forward_algorithm(lmatch: &ArrayView2<f64>, skip: f64) -> Array2<f64> {
    let (n, m) = lmatch.dim();
    let mut lr = Array2::zeros((n, m));
    if m == 0 {
        return lr;
    }
    let mut current: Array1<f64> = Array1::from_shape_fn(m, |j| skip * j as f64);
    let mut previous: Array1<f64> = Array1::zeros(m);
    for i in 0..n {
        f_advance(&mut previous, &current, skip, i);
        for j in 0..m {
            let same = log_mul(current[j], lmatch[[i, j]]);
            let next = log_mul(previous[j], lmatch[[i, j]]);
            current[j] = log_add(same, next);
        }
        lr.row_mut(i).assign(&current);
    }
    lr
}

///
/// Fill `previous` with the scores of paths that enter state `j` at time `i`
///
/// ```text
/// previous[0] = skip * i       (still before the first state after i steps)
/// previous[j] = current[j-1]   (j >= 1)
/// ```
fn f_advance(previous: &mut Array1<f64>, current: &Array1<f64>, skip: f64, i: usize) {
    let m = current.len();
    previous[0] = skip * i as f64;
    for j in 1..m {
        previous[j] = current[j - 1];
    }
}
