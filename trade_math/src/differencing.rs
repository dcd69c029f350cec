//! First differencing of ordered series

use crate::{MathError, Result};

/// Compute the first differences of an ordered sequence.
///
/// For `values` of length N the result has length N - 1 and
/// `diff[k] = values[k + 1] - values[k]`.
///
/// Returns [`MathError::InsufficientData`] when fewer than two values are given.
pub fn first_differences(values: &[f64]) -> Result<Vec<f64>> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "First differences need at least 2 values, got {}",
            values.len()
        )));
    }

    Ok(values.windows(2).map(|pair| pair[1] - pair[0]).collect())
}
