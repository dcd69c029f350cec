//! Rolling-window forecasting over a full price/volume series
//!
//! For a series of length `M` and window size `W` the forecaster fits one
//! regression per index `i` in `W..M`, using samples `i - W ..= i - 1`, and
//! forecasts the price at `i`. Windows are independent; the only state carried
//! across them is the running coefficient sums and the append-only record
//! collection, both local to one call.

use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use crate::metrics::{self, AccuracySummary};
use crate::params::{AllModelParameters, ModelParameters, ParameterSink};
use crate::window::WindowTrainer;
use chrono::{DateTime, Utc};

/// Mean coefficients across all windows of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientAverages {
    pub intercept: f64,
    pub slope_price: f64,
    pub slope_volume: f64,
}

/// Output of one rolling pass, in chronological window order
#[derive(Debug)]
pub struct RollingForecast {
    forecasts: Vec<f64>,
    timestamps: Vec<DateTime<Utc>>,
    actuals: Vec<f64>,
    parameters: AllModelParameters,
    averages: CoefficientAverages,
    persistence_error: Option<ForecastError>,
}

impl RollingForecast {
    /// Forecasted prices, one per window
    pub fn forecasts(&self) -> &[f64] {
        &self.forecasts
    }

    /// Timestamps of the forecast targets
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Actual prices at the forecast targets
    pub fn actuals(&self) -> &[f64] {
        &self.actuals
    }

    pub fn parameters(&self) -> &AllModelParameters {
        &self.parameters
    }

    pub fn averages(&self) -> CoefficientAverages {
        self.averages
    }

    /// Number of fitted windows
    pub fn len(&self) -> usize {
        self.forecasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forecasts.is_empty()
    }

    /// Error raised while persisting the parameter records, if any
    pub fn persistence_error(&self) -> Option<&ForecastError> {
        self.persistence_error.as_ref()
    }

    /// Take ownership of the persistence error, leaving `None` behind
    pub fn take_persistence_error(&mut self) -> Option<ForecastError> {
        self.persistence_error.take()
    }

    /// MSE and MAPE of the forecasts against the actual prices
    pub fn evaluate(&self) -> Result<AccuracySummary> {
        metrics::evaluate(&self.actuals, &self.forecasts)
    }
}

/// Slides a [`WindowTrainer`] across a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingForecaster {
    trainer: WindowTrainer,
}

impl RollingForecaster {
    /// Create a forecaster with the given window size (at least 3)
    pub fn new(window_size: usize) -> Result<Self> {
        Ok(Self {
            trainer: WindowTrainer::new(window_size)?,
        })
    }

    pub fn window_size(&self) -> usize {
        self.trainer.window_size()
    }

    /// Run the rolling pass without persisting anything.
    ///
    /// Fails with [`ForecastError::ConfigError`] when the series is not longer
    /// than the window, [`ForecastError::ValidationError`] when price and volume
    /// lengths differ, and aborts with [`ForecastError::NumericalError`] on the
    /// first window whose regression cannot be solved.
    pub fn forecast(&self, series: &TimeSeriesData) -> Result<RollingForecast> {
        let window = self.window_size();

        if !series.has_matching_lengths() {
            return Err(ForecastError::ValidationError(format!(
                "Price ({}) and volume ({}) series must have the same length",
                series.price().len(),
                series.volume().len()
            )));
        }

        let total = series.len();
        if total <= window {
            return Err(ForecastError::ConfigError(format!(
                "Window size {} leaves no forecast for a series of {} samples",
                window, total
            )));
        }

        tracing::info!(window, samples = total, "starting rolling forecast");

        let prices = series.price_values();
        let volumes = series.volume_values();
        let samples = series.price();

        let count = total - window;
        let mut forecasts = Vec::with_capacity(count);
        let mut timestamps = Vec::with_capacity(count);
        let mut actuals = Vec::with_capacity(count);
        let mut parameters = AllModelParameters {
            parameters: Vec::with_capacity(count),
        };
        let (mut sum_intercept, mut sum_slope_price, mut sum_slope_volume) = (0.0, 0.0, 0.0);

        for i in window..total {
            let start = i - window;
            let fit = self
                .trainer
                .train(&prices[start..i], &volumes[start..i])
                .map_err(|err| match err {
                    ForecastError::MathError(source) => ForecastError::NumericalError {
                        window: start,
                        source,
                    },
                    other => other,
                })?;

            let coefficients = fit.coefficients;
            tracing::debug!(
                window = start,
                intercept = coefficients.intercept,
                slope_price = coefficients.slope_price,
                slope_volume = coefficients.slope_volume,
                forecast = fit.forecast,
                "fitted window"
            );

            sum_intercept += coefficients.intercept;
            sum_slope_price += coefficients.slope_price;
            sum_slope_volume += coefficients.slope_volume;

            let target_date = samples[i].datetime()?;
            let start_date = samples[start].datetime()?;

            forecasts.push(fit.forecast);
            timestamps.push(target_date);
            actuals.push(prices[i]);
            parameters
                .parameters
                .push(ModelParameters::new(coefficients, start_date, target_date));
        }

        let models = count as f64;
        let averages = CoefficientAverages {
            intercept: sum_intercept / models,
            slope_price: sum_slope_price / models,
            slope_volume: sum_slope_volume / models,
        };

        tracing::info!(
            windows = count,
            avg_slope_price = averages.slope_price,
            avg_slope_volume = averages.slope_volume,
            "rolling forecast complete"
        );

        Ok(RollingForecast {
            forecasts,
            timestamps,
            actuals,
            parameters,
            averages,
            persistence_error: None,
        })
    }

    /// Run the rolling pass, then hand all parameter records to `sink` once.
    ///
    /// A failing sink does not discard the forecast: the error is logged and
    /// kept on the result, see [`RollingForecast::persistence_error`].
    pub fn forecast_and_persist<S>(
        &self,
        series: &TimeSeriesData,
        sink: &mut S,
    ) -> Result<RollingForecast>
    where
        S: ParameterSink + ?Sized,
    {
        let mut result = self.forecast(series)?;

        if let Err(err) = sink.save(&result.parameters) {
            tracing::warn!(error = %err, "model parameters were not persisted");
            result.persistence_error = Some(err);
        }

        Ok(result)
    }
}
