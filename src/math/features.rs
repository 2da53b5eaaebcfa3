//! Degree expansion of scalar inputs.
//!
//! A scalar `x` becomes the row `[x^0, x^1, …, x^d]`. The expansion is a pure
//! per-row transform, so train and test sets are expanded independently with the
//! same degree.
//!
//! No feature scaling is applied. At high degrees the columns span many orders of
//! magnitude and the least-squares problem becomes ill-conditioned; that is part
//! of the experiment.

use nalgebra::DMatrix;

/// Fill `out` with `[x^0, …, x^(out.len()-1)]`.
///
/// Powers are built by repeated multiplication, matching what a caller would get
/// from `x.powi(k)` for small `k` without the per-element call.
pub fn fill_power_row(x: f64, out: &mut [f64]) {
    let mut acc = 1.0;
    for slot in out.iter_mut() {
        *slot = acc;
        acc *= x;
    }
}

/// Design matrix with one row per input and `degree + 1` columns.
pub fn expand_powers(xs: &[f64], degree: usize) -> DMatrix<f64> {
    let cols = degree + 1;
    let mut out = DMatrix::<f64>::zeros(xs.len(), cols);
    let mut row = vec![0.0; cols];
    for (i, &x) in xs.iter().enumerate() {
        fill_power_row(x, &mut row);
        for (j, &v) in row.iter().enumerate() {
            out[(i, j)] = v;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_row_starts_with_bias_column() {
        let mut row = [0.0; 4];
        fill_power_row(2.0, &mut row);
        assert_eq!(row, [1.0, 2.0, 4.0, 8.0]);
    }

    #[test]
    fn expand_shape_and_values() {
        let m = expand_powers(&[-1.0, 0.0, 3.0], 2);
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m[(0, 1)], -1.0);
        assert_eq!(m[(1, 0)], 1.0);
        assert_eq!(m[(1, 2)], 0.0);
        assert_eq!(m[(2, 2)], 9.0);
    }

    #[test]
    fn degree_zero_is_constant_column() {
        let m = expand_powers(&[5.0, -7.0], 0);
        assert_eq!(m.shape(), (2, 1));
        assert!(m.iter().all(|&v| v == 1.0));
    }
}
