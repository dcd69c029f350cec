//! Export of forecast results

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Write `timestamp,actual,forecast` rows, timestamps as RFC 3339
pub fn write_forecast_csv<P: AsRef<Path>>(
    path: P,
    timestamps: &[DateTime<Utc>],
    actual: &[f64],
    forecast: &[f64],
) -> Result<()> {
    if timestamps.len() != actual.len() || timestamps.len() != forecast.len() {
        return Err(ForecastError::ValidationError(format!(
            "Timestamps ({}), actual ({}) and forecast ({}) must have the same length",
            timestamps.len(),
            actual.len(),
            forecast.len()
        )));
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["timestamp", "actual", "forecast"])?;

    for ((ts, a), f) in timestamps.iter().zip(actual).zip(forecast) {
        writer.write_record([ts.to_rfc3339(), a.to_string(), f.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}
