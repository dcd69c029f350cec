//! # Trade Math
//!
//! Numerical building blocks for price series forecasting.
//! This crate provides first differencing of ordered series and an ordinary
//! least-squares solver backed by a QR factorization.

use thiserror::Error;

pub mod differencing;
pub mod regression;

pub use differencing::first_differences;
pub use regression::{least_squares_qr, ols_two_predictors, OlsCoefficients};

/// Errors that can occur in trading-related calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    /// The design matrix does not have full column rank
    #[error("Singular or ill-conditioned design matrix: {0}")]
    SingularMatrix(String),
}

/// Result type for trading math operations
pub type Result<T> = std::result::Result<T, MathError>;
