//! Ordinary least-squares regression
//!
//! Solves overdetermined linear systems `X b ≈ y` through a QR factorization of
//! the design matrix instead of the normal equations, so nearly collinear
//! columns do not get their condition number squared.
//!
//! Rank deficiency is detected on the diagonal of `R`: column `j` is treated as
//! linearly dependent on the columns before it when `|R[j][j]|` falls below
//! [`RANK_TOLERANCE`] times the euclidean norm of that column.

use crate::{MathError, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Relative threshold on the diagonal of `R` below which a column is dependent
pub const RANK_TOLERANCE: f64 = 1e-10;

/// Coefficients of `y = intercept + slope_x1 * x1 + slope_x2 * x2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OlsCoefficients {
    pub intercept: f64,
    pub slope_x1: f64,
    pub slope_x2: f64,
}

impl OlsCoefficients {
    /// Evaluate the fitted plane at `(x1, x2)`
    pub fn predict(&self, x1: f64, x2: f64) -> f64 {
        self.intercept + self.slope_x1 * x1 + self.slope_x2 * x2
    }
}

/// Solve the least-squares problem `min ||design * b - y||²` by QR factorization.
///
/// The design matrix must have at least as many rows as columns and full
/// column rank, otherwise [`MathError::SingularMatrix`] is returned.
pub fn least_squares_qr(design: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>> {
    let (rows, cols) = design.shape();

    if cols == 0 {
        return Err(MathError::InvalidInput(
            "Design matrix has no columns".to_string(),
        ));
    }

    if y.len() != rows {
        return Err(MathError::InvalidInput(format!(
            "Response length ({}) doesn't match design matrix rows ({})",
            y.len(),
            rows
        )));
    }

    if rows < cols {
        return Err(MathError::SingularMatrix(format!(
            "{} observations cannot determine {} coefficients",
            rows, cols
        )));
    }

    if design.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(
            "Regression inputs must be finite".to_string(),
        ));
    }

    let qr = design.clone().qr();
    let r = qr.r();

    for j in 0..cols {
        let column_norm = design.column(j).norm();
        let diagonal = r[(j, j)].abs();
        if column_norm == 0.0 || diagonal <= RANK_TOLERANCE * column_norm {
            return Err(MathError::SingularMatrix(format!(
                "column {} is linearly dependent on the preceding columns",
                j
            )));
        }
    }

    let q_t_y = qr.q().tr_mul(y);
    let solution = r.solve_upper_triangular(&q_t_y).ok_or_else(|| {
        MathError::SingularMatrix("triangular factor is not invertible".to_string())
    })?;

    if solution.iter().any(|v| !v.is_finite()) {
        return Err(MathError::CalculationError(
            "Least-squares solution is not finite".to_string(),
        ));
    }

    Ok(solution)
}

/// Fit `y = a + b1 * x1 + b2 * x2` by ordinary least squares.
///
/// The design matrix is an intercept column of ones followed by `x1` and `x2`.
/// At least three non-degenerate observations are required.
pub fn ols_two_predictors(y: &[f64], x1: &[f64], x2: &[f64]) -> Result<OlsCoefficients> {
    if x1.len() != y.len() || x2.len() != y.len() {
        return Err(MathError::InvalidInput(format!(
            "Predictor lengths ({}, {}) don't match response length ({})",
            x1.len(),
            x2.len(),
            y.len()
        )));
    }

    let design = DMatrix::from_fn(y.len(), 3, |row, col| match col {
        0 => 1.0,
        1 => x1[row],
        _ => x2[row],
    });
    let response = DVector::from_column_slice(y);

    let beta = least_squares_qr(&design, &response)?;

    Ok(OlsCoefficients {
        intercept: beta[0],
        slope_x1: beta[1],
        slope_x2: beta[2],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn synthetic(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let x1: Vec<f64> = (0..n).map(|i| (i as f64 * 1.3).sin() * 5.0).collect();
        let x2: Vec<f64> = (0..n).map(|i| (i as f64 * 0.4).cos() * 20.0 + i as f64).collect();
        let y = x1
            .iter()
            .zip(&x2)
            .map(|(a, b)| 2.0 + 3.0 * a - 1.0 * b)
            .collect();
        (y, x1, x2)
    }

    #[rstest]
    #[case(3)]
    #[case(4)]
    #[case(10)]
    #[case(250)]
    fn test_recovers_exact_coefficients(#[case] n: usize) {
        let (y, x1, x2) = synthetic(n);
        let coef = ols_two_predictors(&y, &x1, &x2).unwrap();

        assert_abs_diff_eq!(coef.intercept, 2.0, epsilon = 1e-8);
        assert_abs_diff_eq!(coef.slope_x1, 3.0, epsilon = 1e-8);
        assert_abs_diff_eq!(coef.slope_x2, -1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_least_squares_fits_line_through_inconsistent_points() {
        // Best fit through (0, 0), (1, 1), (2, 1) is y = 1/6 + x/2
        let design = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[0.0, 1.0, 1.0]);

        let beta = least_squares_qr(&design, &y).unwrap();
        assert_abs_diff_eq!(beta[0], 1.0 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(beta[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_predict_uses_all_coefficients() {
        let coef = OlsCoefficients {
            intercept: 1.0,
            slope_x1: 2.0,
            slope_x2: -0.5,
        };
        assert_eq!(coef.predict(3.0, 4.0), 5.0);
    }

    #[test]
    fn test_too_few_observations_is_singular() {
        let err = ols_two_predictors(&[1.0, 2.0], &[0.5, 1.5], &[3.0, -1.0]).unwrap_err();
        assert!(matches!(err, MathError::SingularMatrix(_)));
    }

    #[test]
    fn test_duplicated_predictors_are_singular() {
        let x: Vec<f64> = vec![1.0, 4.0, 2.0, 8.0, 5.0];
        let y: Vec<f64> = x.iter().map(|v| 1.0 + v).collect();

        let err = ols_two_predictors(&y, &x, &x).unwrap_err();
        assert!(matches!(err, MathError::SingularMatrix(_)));
    }

    #[test]
    fn test_constant_predictor_is_singular() {
        let y = vec![3.0, 5.0, 4.0, 6.0];
        let x1 = vec![1.0, 1.0, 1.0, 1.0];
        let x2 = vec![0.0, 2.0, 1.0, 3.0];

        let err = ols_two_predictors(&y, &x1, &x2).unwrap_err();
        assert!(matches!(err, MathError::SingularMatrix(_)));
    }

    #[test]
    fn test_zero_predictor_is_singular() {
        let y = vec![3.0, 5.0, 4.0, 6.0];
        let x1 = vec![0.0; 4];
        let x2 = vec![0.0, 2.0, 1.0, 3.0];

        let err = ols_two_predictors(&y, &x1, &x2).unwrap_err();
        assert!(matches!(err, MathError::SingularMatrix(_)));
    }

    #[test]
    fn test_mismatched_lengths_are_invalid() {
        let err = ols_two_predictors(&[1.0, 2.0, 3.0], &[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, MathError::InvalidInput(_)));
    }

    #[test]
    fn test_non_finite_input_is_invalid() {
        let err = ols_two_predictors(
            &[1.0, 2.0, 3.0, 4.0],
            &[1.0, f64::NAN, 0.0, 2.0],
            &[1.0, 5.0, 3.0, 0.0],
        )
        .unwrap_err();
        assert!(matches!(err, MathError::InvalidInput(_)));
    }
}
