//! Per-window model parameters and their persistence

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Fitted coefficients of one window regression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCoefficients {
    pub intercept: f64,
    pub slope_price: f64,
    pub slope_volume: f64,
}

impl ModelCoefficients {
    /// Evaluate the model at the given price and volume differences
    pub fn forecast(&self, price_diff: f64, volume_diff: f64) -> f64 {
        self.intercept + self.slope_price * price_diff + self.slope_volume * volume_diff
    }
}

/// Coefficients of one window together with the dates it covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelParameters {
    pub intercept: f64,
    pub slope_price: f64,
    pub slope_volume: f64,
    /// Timestamp of the first sample in the window
    pub start_date: DateTime<Utc>,
    /// Timestamp of the sample being forecast
    pub end_date: DateTime<Utc>,
}

impl ModelParameters {
    pub fn new(
        coefficients: ModelCoefficients,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            intercept: coefficients.intercept,
            slope_price: coefficients.slope_price,
            slope_volume: coefficients.slope_volume,
            start_date,
            end_date,
        }
    }

    pub fn coefficients(&self) -> ModelCoefficients {
        ModelCoefficients {
            intercept: self.intercept,
            slope_price: self.slope_price,
            slope_volume: self.slope_volume,
        }
    }
}

/// Ordered parameter records of a whole run, persisted as `{"parameters": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllModelParameters {
    pub parameters: Vec<ModelParameters>,
}

impl AllModelParameters {
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelParameters> {
        self.parameters.iter()
    }
}

/// Destination for the parameter records of a finished run
pub trait ParameterSink {
    /// Store the complete, ordered collection of parameter records
    fn save(&mut self, parameters: &AllModelParameters) -> Result<()>;
}

/// Writes parameter records as JSON to a file
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, parameters: &AllModelParameters) -> std::result::Result<(), String> {
        let file = File::create(&self.path).map_err(|e| e.to_string())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, parameters).map_err(|e| e.to_string())?;
        writer.write_all(b"\n").map_err(|e| e.to_string())?;
        writer.flush().map_err(|e| e.to_string())
    }
}

impl ParameterSink for JsonFileSink {
    fn save(&mut self, parameters: &AllModelParameters) -> Result<()> {
        self.write(parameters).map_err(|reason| {
            ForecastError::PersistenceError(format!(
                "Failed to write {}: {}",
                self.path.display(),
                reason
            ))
        })?;

        tracing::info!(
            path = %self.path.display(),
            records = parameters.len(),
            "saved model parameters"
        );
        Ok(())
    }
}

/// Keeps every saved collection in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    saved: Vec<AllModelParameters>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collections saved so far, oldest first
    pub fn saved(&self) -> &[AllModelParameters] {
        &self.saved
    }
}

impl ParameterSink for MemorySink {
    fn save(&mut self, parameters: &AllModelParameters) -> Result<()> {
        self.saved.push(parameters.clone());
        Ok(())
    }
}

/// Read a parameter file written by [`JsonFileSink`]
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<AllModelParameters> {
    let file = File::open(path)?;
    let parameters = serde_json::from_reader(BufReader::new(file))?;
    Ok(parameters)
}
