//! Time series data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A single `(timestamp, value)` observation, timestamp in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "x")]
    pub timestamp_ms: i64,
    #[serde(rename = "y")]
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp_ms: i64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }

    /// Timestamp as a UTC datetime
    pub fn datetime(&self) -> Result<DateTime<Utc>> {
        datetime_from_millis(self.timestamp_ms)
    }
}

/// Convert epoch milliseconds into a UTC datetime
pub fn datetime_from_millis(timestamp_ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(timestamp_ms).ok_or_else(|| {
        ForecastError::DataError(format!("Timestamp {} is out of range", timestamp_ms))
    })
}

/// Price series and a volume-like series, paired by position.
///
/// Nothing here checks that `price[i]` and `volume[i]` were sampled at the same
/// instant; callers own that guarantee. [`TimeSeriesData::is_timestamp_aligned`]
/// is available for callers who want to verify it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesData {
    price: Vec<Sample>,
    volume: Vec<Sample>,
}

impl TimeSeriesData {
    /// Create a new TimeSeriesData from already loaded samples
    pub fn new(price: Vec<Sample>, volume: Vec<Sample>) -> Self {
        Self { price, volume }
    }

    /// Create a series sharing one timestamp column (for testing and synthetic data)
    pub fn from_values(timestamps_ms: &[i64], prices: &[f64], volumes: &[f64]) -> Result<Self> {
        if timestamps_ms.len() != prices.len() || timestamps_ms.len() != volumes.len() {
            return Err(ForecastError::ValidationError(format!(
                "Timestamps ({}), prices ({}) and volumes ({}) must have the same length",
                timestamps_ms.len(),
                prices.len(),
                volumes.len()
            )));
        }

        let price = timestamps_ms
            .iter()
            .zip(prices)
            .map(|(&t, &v)| Sample::new(t, v))
            .collect();
        let volume = timestamps_ms
            .iter()
            .zip(volumes)
            .map(|(&t, &v)| Sample::new(t, v))
            .collect();

        Ok(Self { price, volume })
    }

    pub fn price(&self) -> &[Sample] {
        &self.price
    }

    pub fn volume(&self) -> &[Sample] {
        &self.volume
    }

    /// Get the price values as a vector
    pub fn price_values(&self) -> Vec<f64> {
        self.price.iter().map(|s| s.value).collect()
    }

    /// Get the volume values as a vector
    pub fn volume_values(&self) -> Vec<f64> {
        self.volume.iter().map(|s| s.value).collect()
    }

    /// Timestamps of the price series in epoch milliseconds
    pub fn timestamps_ms(&self) -> Vec<i64> {
        self.price.iter().map(|s| s.timestamp_ms).collect()
    }

    /// Number of price samples
    pub fn len(&self) -> usize {
        self.price.len()
    }

    pub fn is_empty(&self) -> bool {
        self.price.is_empty()
    }

    /// True when both series hold the same number of samples
    pub fn has_matching_lengths(&self) -> bool {
        self.price.len() == self.volume.len()
    }

    /// True when both series have equal length and identical timestamps at every index
    pub fn is_timestamp_aligned(&self) -> bool {
        self.has_matching_lengths()
            && self
                .price
                .iter()
                .zip(&self.volume)
                .all(|(p, v)| p.timestamp_ms == v.timestamp_ms)
    }

    /// Get a slice `[start, end)` of both series
    pub fn slice(&self, start: usize, end: usize) -> Result<Self> {
        let limit = self.price.len().min(self.volume.len());
        if start > end || end > limit {
            return Err(ForecastError::ValidationError(format!(
                "Invalid slice {}..{} for series of length {}",
                start, end, limit
            )));
        }

        Ok(Self {
            price: self.price[start..end].to_vec(),
            volume: self.volume[start..end].to_vec(),
        })
    }

    /// Keep samples whose UTC calendar year lies in `start_year..=end_year`.
    ///
    /// Each series is filtered on its own timestamps.
    pub fn filter_years(&self, start_year: i32, end_year: i32) -> Self {
        let in_range = |s: &&Sample| {
            DateTime::from_timestamp_millis(s.timestamp_ms)
                .map(|dt| (start_year..=end_year).contains(&dt.year()))
                .unwrap_or(false)
        };

        Self {
            price: self.price.iter().filter(in_range).copied().collect(),
            volume: self.volume.iter().filter(in_range).copied().collect(),
        }
    }

    /// Keep samples with `start <= timestamp <= end`
    pub fn filter_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let (lo, hi) = (start.timestamp_millis(), end.timestamp_millis());
        let in_range = |s: &&Sample| (lo..=hi).contains(&s.timestamp_ms);

        Self {
            price: self.price.iter().filter(in_range).copied().collect(),
            volume: self.volume.iter().filter(in_range).copied().collect(),
        }
    }
}

/// Chart export in the blockchain.info JSON layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockchainChart {
    #[serde(default)]
    pub metric1: String,
    #[serde(default)]
    pub metric2: String,
    #[serde(rename = "total-bitcoins", default)]
    pub total_bitcoins: Vec<Sample>,
    #[serde(rename = "market-price", default)]
    pub market_price: Vec<Sample>,
    #[serde(rename = "type", default)]
    pub chart_type: String,
    #[serde(default)]
    pub average: String,
    #[serde(default)]
    pub timespan: String,
}

impl From<BlockchainChart> for TimeSeriesData {
    fn from(chart: BlockchainChart) -> Self {
        TimeSeriesData::new(chart.market_price, chart.total_bitcoins)
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: i64,
    price: f64,
    volume: f64,
}

/// Data loader for time series data
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a blockchain.info chart export (`market-price` and `total-bitcoins`)
    pub fn from_blockchain_json<P: AsRef<Path>>(path: P) -> Result<TimeSeriesData> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let chart: BlockchainChart = serde_json::from_reader(BufReader::new(file))?;

        tracing::info!(
            path = %path.display(),
            prices = chart.market_price.len(),
            volumes = chart.total_bitcoins.len(),
            "loaded chart export"
        );

        Self::chart_into_series(chart)
    }

    /// Parse a blockchain.info chart export held in memory
    pub fn from_blockchain_json_str(json: &str) -> Result<TimeSeriesData> {
        let chart: BlockchainChart = serde_json::from_str(json)?;
        Self::chart_into_series(chart)
    }

    /// Load a CSV file with a `timestamp,price,volume` header, timestamps in epoch milliseconds
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeriesData> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let data = Self::from_csv_reader(file)?;

        tracing::info!(path = %path.display(), samples = data.len(), "loaded csv series");

        Ok(data)
    }

    /// Read `timestamp,price,volume` rows from any reader
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<TimeSeriesData> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut price = Vec::new();
        let mut volume = Vec::new();

        for row in rdr.deserialize() {
            let row: CsvRow = row?;
            price.push(Sample::new(row.timestamp, row.price));
            volume.push(Sample::new(row.timestamp, row.volume));
        }

        if price.is_empty() {
            return Err(ForecastError::DataError(
                "CSV input contains no rows".to_string(),
            ));
        }

        Ok(TimeSeriesData::new(price, volume))
    }

    fn chart_into_series(chart: BlockchainChart) -> Result<TimeSeriesData> {
        if chart.market_price.is_empty() {
            return Err(ForecastError::DataError(
                "Chart export contains no market-price samples".to_string(),
            ));
        }

        Ok(chart.into())
    }
}
