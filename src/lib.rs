//! # Regression Forecast
//!
//! Umbrella crate for the rolling-window regression forecaster.
//!
//! - [`trade_math`]: first differencing and QR-based least squares
//! - [`rolling_forecast`]: series loading, window fits, rolling forecasts,
//!   parameter persistence and accuracy metrics
//!
//! ## Example
//!
//! ```
//! use regression_forecast_workspace::rolling_forecast::{RollingForecaster, TimeSeriesData};
//!
//! let timestamps: Vec<i64> = (0..8).map(|i| i * 86_400_000).collect();
//! let prices = [10.0, 12.0, 11.5, 13.0, 12.2, 14.1, 13.3, 15.0];
//! let volumes = [1.0, 3.0, 2.5, 6.0, 4.0, 8.5, 5.0, 9.0];
//! let data = TimeSeriesData::from_values(&timestamps, &prices, &volumes).unwrap();
//!
//! let result = RollingForecaster::new(5).unwrap().forecast(&data).unwrap();
//! assert_eq!(result.len(), 3);
//! ```

pub use rolling_forecast;
pub use trade_math;

pub use rolling_forecast::{ForecastError, RollingForecast, RollingForecaster};
pub use trade_math::MathError;
