//! Run configuration for the rolling forecaster

use crate::error::{ForecastError, Result};
use crate::window::MIN_WINDOW_SIZE;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Default number of samples per regression window
pub const DEFAULT_WINDOW_SIZE: usize = 30;
/// First calendar year kept when filtering the input series
pub const DEFAULT_START_YEAR: i32 = 2011;
/// Last calendar year kept when filtering the input series
pub const DEFAULT_END_YEAR: i32 = 2024;

/// Settings for one forecasting run.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub window_size: usize,
    pub start_year: i32,
    pub end_year: i32,
    /// Input chart export
    pub data_path: PathBuf,
    /// Where per-window parameter records are written
    pub parameters_path: PathBuf,
    /// Optional CSV export of actual vs forecast prices
    pub forecasts_path: Option<PathBuf>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            data_path: PathBuf::from("total-bitcoins.json"),
            parameters_path: PathBuf::from("model_parameters.json"),
            forecasts_path: None,
        }
    }
}

impl ForecastConfig {
    /// Read a config from a JSON file; missing keys take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Check the settings that can be checked without loading data
    pub fn validate(&self) -> Result<()> {
        if self.window_size < MIN_WINDOW_SIZE {
            return Err(ForecastError::ConfigError(format!(
                "Window size must be at least {}, got {}",
                MIN_WINDOW_SIZE, self.window_size
            )));
        }

        if self.start_year > self.end_year {
            return Err(ForecastError::ConfigError(format!(
                "Start year {} is after end year {}",
                self.start_year, self.end_year
            )));
        }

        Ok(())
    }
}
