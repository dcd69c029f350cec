//! # Rolling Forecast
//!
//! Rolling-window linear regression forecasting for price series paired with a
//! volume-like series.
//!
//! ## Features
//!
//! - Aligned price/volume series with year and date-range filtering
//! - Loaders for blockchain.info chart exports and `timestamp,price,volume` CSV files
//! - Per-window OLS fit of price on price and volume differences, solved by QR
//! - One-step-ahead forecasts with per-window parameter records
//! - Parameter persistence through a pluggable [`ParameterSink`]
//! - Accuracy reporting (MSE, MAPE)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rolling_forecast::{DataLoader, JsonFileSink, RollingForecaster};
//!
//! # fn main() -> rolling_forecast::Result<()> {
//! let data = DataLoader::from_blockchain_json("total-bitcoins.json")?.filter_years(2011, 2024);
//!
//! let forecaster = RollingForecaster::new(30)?;
//! let mut sink = JsonFileSink::new("model_parameters.json");
//! let result = forecaster.forecast_and_persist(&data, &mut sink)?;
//!
//! if let Some(err) = result.persistence_error() {
//!     eprintln!("parameters not saved: {}", err);
//! }
//!
//! println!("{}", result.evaluate()?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod params;
pub mod report;
pub mod rolling;
pub mod window;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DataLoader, Sample, TimeSeriesData};
pub use crate::error::{ForecastError, Result};
pub use crate::metrics::AccuracySummary;
pub use crate::params::{
    AllModelParameters, JsonFileSink, MemorySink, ModelCoefficients, ModelParameters,
    ParameterSink,
};
pub use crate::rolling::{CoefficientAverages, RollingForecast, RollingForecaster};
pub use crate::window::{WindowFit, WindowTrainer};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
