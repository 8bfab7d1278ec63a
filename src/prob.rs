//!
//! probability calculation in log space
//! implements the thresholded logaddexp used in the alignment dp
//!

///
/// If two log values differ more than this, `log_add` returns the larger one.
///
pub const LOG_ADD_THRESHOLD: f64 = 10.0;

///
/// Exponent arguments of `limexp` are clamped into `[-MAX_EXP, MAX_EXP]`.
///
pub const MAX_EXP: f64 = 30.0;

/// Addition of two probabilities `px + py` in log space
///
/// ```text
/// log(exp(x) + exp(y))
///  = log(exp(y) (exp(x-y) + 1))
///  = log(exp(x-y) + 1) + y
/// ```
///
/// When `|x - y| > LOG_ADD_THRESHOLD` the smaller term is dropped and the
/// larger value is returned as is. The relative error of this is below
/// `exp(-10)`.
#[inline]
pub fn log_add(x: f64, y: f64) -> f64 {
    if x == f64::NEG_INFINITY && y == f64::NEG_INFINITY {
        // 0 + 0 = 0
        f64::NEG_INFINITY
    } else if (x - y).abs() > LOG_ADD_THRESHOLD {
        x.max(y)
    } else {
        (x - y).exp().ln_1p() + y
    }
}

/// Multiplication of two probabilities `px * py` in log space
///
/// ```text
/// log(px * py) = log(px) + log(py)
/// ```
#[inline]
pub fn log_mul(x: f64, y: f64) -> f64 {
    x + y
}

///
/// `exp(x)` with `x` clamped into `[-max_exp, max_exp]`.
///
/// `NaN` is passed through unchanged.
#[inline]
pub fn limexp(x: f64, max_exp: f64) -> f64 {
    if x < -max_exp {
        (-max_exp).exp()
    } else if x > max_exp {
        max_exp.exp()
    } else {
        x.exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(x: f64, y: f64) -> f64 {
        (x.exp() + y.exp()).ln()
    }

    #[test]
    fn log_add_far_apart_returns_larger() {
        assert_eq!(log_add(0.0, -10.5), 0.0);
        assert_eq!(log_add(-10.5, 0.0), 0.0);
        assert_eq!(log_add(-3.0, -100.0), -3.0);
        assert_eq!(log_add(500.0, 0.0), 500.0);
        // no overflow for huge values
        assert!(log_add(1000.0, 1.0).is_finite());
    }
    #[test]
    fn log_add_close_matches_exact() {
        for &(x, y) in &[
            (0.0, 0.0),
            (-1.0, -2.0),
            (-2.0, -1.0),
            (-5.0, -14.9),
            (3.0, -6.9),
            (-0.1, -2.3),
        ] {
            assert_abs_diff_eq!(log_add(x, y), exact(x, y), epsilon = 1e-12);
        }
        assert_abs_diff_eq!(log_add(0.0, 0.0), 2f64.ln(), epsilon = 1e-12);
    }
    #[test]
    fn log_add_neg_inf() {
        let inf = f64::NEG_INFINITY;
        assert_eq!(log_add(-1.0, inf), -1.0);
        assert_eq!(log_add(inf, -1.0), -1.0);
        assert_eq!(log_add(inf, inf), inf);
    }
    #[test]
    fn log_mul_is_add() {
        assert_eq!(log_mul(-1.0, -2.5), -3.5);
        assert_eq!(log_mul(f64::NEG_INFINITY, 3.0), f64::NEG_INFINITY);
    }
    #[test]
    fn limexp_clamps() {
        assert_abs_diff_eq!(limexp(0.0, MAX_EXP), 1.0);
        assert_abs_diff_eq!(limexp(-1.0, MAX_EXP), (-1f64).exp());
        assert_eq!(limexp(-100.0, MAX_EXP), (-30f64).exp());
        assert_eq!(limexp(f64::NEG_INFINITY, MAX_EXP), (-30f64).exp());
        assert_eq!(limexp(100.0, MAX_EXP), 30f64.exp());
        assert!(limexp(f64::NAN, MAX_EXP).is_nan());
    }
}
