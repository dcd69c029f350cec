//! Error types for the rolling_forecast crate

use thiserror::Error;
use trade_math::MathError;

/// Custom error types for the rolling_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to loading or shaping series data
    #[error("Data error: {0}")]
    DataError(String),

    /// Invalid run configuration, raised before any computation
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Regression failure inside the rolling pass
    #[error("Numerical error in window {window}: {source}")]
    NumericalError {
        /// Zero-based index of the window whose fit failed
        window: usize,
        #[source]
        source: MathError,
    },

    /// Error related to input validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from mathematical operations outside the rolling pass
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Failure to write parameter records
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
