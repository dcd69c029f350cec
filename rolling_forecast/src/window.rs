//! Single-window regression fit and one-step forecast

use crate::error::{ForecastError, Result};
use crate::params::ModelCoefficients;
use trade_math::{first_differences, ols_two_predictors, MathError};

/// Smallest window that leaves a regression to fit after differencing
pub const MIN_WINDOW_SIZE: usize = 3;

/// Forecast and coefficients produced from one window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowFit {
    /// Predicted price for the sample following the window
    pub forecast: f64,
    pub coefficients: ModelCoefficients,
}

/// Fits `price[k] = a + b1 * Δprice[k] + b2 * Δvolume[k]` over a window and
/// forecasts from the last differences in that window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowTrainer {
    window_size: usize,
}

impl WindowTrainer {
    /// Create a trainer for windows of `window_size` samples
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size < MIN_WINDOW_SIZE {
            return Err(ForecastError::ConfigError(format!(
                "Window size must be at least {}, got {}",
                MIN_WINDOW_SIZE, window_size
            )));
        }

        Ok(Self { window_size })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Fit one window and forecast the next price.
    ///
    /// Both slices must hold exactly `window_size` values. Regression failures
    /// come back as [`ForecastError::MathError`].
    pub fn train(&self, prices: &[f64], volumes: &[f64]) -> Result<WindowFit> {
        if prices.len() != self.window_size || volumes.len() != self.window_size {
            return Err(ForecastError::ValidationError(format!(
                "Window expects {} prices and volumes, got {} and {}",
                self.window_size,
                prices.len(),
                volumes.len()
            )));
        }

        let price_diffs = first_differences(prices)?;
        let volume_diffs = first_differences(volumes)?;
        let target = &prices[1..];

        let ols = ols_two_predictors(target, &price_diffs, &volume_diffs)?;
        let coefficients = ModelCoefficients {
            intercept: ols.intercept,
            slope_price: ols.slope_x1,
            slope_volume: ols.slope_x2,
        };

        let (last_price_diff, last_volume_diff) = match (price_diffs.last(), volume_diffs.last()) {
            (Some(&p), Some(&v)) => (p, v),
            _ => {
                return Err(MathError::InsufficientData(
                    "Window produced no differences".to_string(),
                )
                .into())
            }
        };

        Ok(WindowFit {
            forecast: coefficients.forecast(last_price_diff, last_volume_diff),
            coefficients,
        })
    }
}
