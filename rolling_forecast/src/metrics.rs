//! Metrics for evaluating forecast performance

use crate::error::{ForecastError, Result};

fn check_aligned(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(ForecastError::ValidationError(format!(
            "Actual ({}) and predicted ({}) values must have the same non-zero length",
            actual.len(),
            predicted.len()
        )));
    }
    Ok(())
}

/// Mean of the squared pointwise differences
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_aligned(actual, predicted)?;

    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (p - a).powi(2))
        .sum();

    Ok(sum / actual.len() as f64)
}

/// Mean Absolute Percentage Error, in percent.
///
/// Positions where the actual value is zero add nothing to the sum but are
/// still counted in the divisor, so a series with zero actuals reports a lower
/// MAPE than the conventional definition would.
pub fn mean_absolute_percentage_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_aligned(actual, predicted)?;

    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .filter(|(a, _)| **a != 0.0)
        .map(|(a, p)| ((a - p) / a).abs())
        .sum();

    Ok(sum / actual.len() as f64 * 100.0)
}

/// Evaluate forecast accuracy against actual values
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Result<AccuracySummary> {
    Ok(AccuracySummary {
        mse: mean_squared_error(actual, predicted)?,
        mape: mean_absolute_percentage_error(actual, predicted)?,
    })
}

/// Forecast accuracy over a whole run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracySummary {
    /// Mean Squared Error
    pub mse: f64,
    /// Mean Absolute Percentage Error
    pub mape: f64,
}

impl std::fmt::Display for AccuracySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        Ok(())
    }
}
