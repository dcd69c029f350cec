//! Rolling-window regression forecast over a blockchain.info chart export.
//!
//! Usage:
//! ```text
//! cargo run --bin rolling_forecast -- --data total-bitcoins.json --window 30
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rolling_forecast::report::write_forecast_csv;
use rolling_forecast::{DataLoader, ForecastConfig, JsonFileSink, RollingForecaster};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rolling-window linear regression price forecast")]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chart export with market-price and total-bitcoins series
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Number of samples per regression window
    #[arg(short, long)]
    window: Option<usize>,

    /// First calendar year to keep
    #[arg(long)]
    start_year: Option<i32>,

    /// Last calendar year to keep
    #[arg(long)]
    end_year: Option<i32>,

    /// Output file for per-window model parameters
    #[arg(long)]
    params_out: Option<PathBuf>,

    /// Optional CSV export of actual vs forecast prices
    #[arg(long)]
    forecast_out: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<ForecastConfig> {
        let mut config = match &self.config {
            Some(path) => ForecastConfig::from_json_file(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => ForecastConfig::default(),
        };

        if let Some(data) = self.data {
            config.data_path = data;
        }
        if let Some(window) = self.window {
            config.window_size = window;
        }
        if let Some(year) = self.start_year {
            config.start_year = year;
        }
        if let Some(year) = self.end_year {
            config.end_year = year;
        }
        if let Some(path) = self.params_out {
            config.parameters_path = path;
        }
        if self.forecast_out.is_some() {
            config.forecasts_path = self.forecast_out;
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(config: &ForecastConfig) -> Result<()> {
    let data = DataLoader::from_blockchain_json(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?
        .filter_years(config.start_year, config.end_year);

    let forecaster = RollingForecaster::new(config.window_size)?;
    let mut sink = JsonFileSink::new(&config.parameters_path);
    let result = forecaster.forecast_and_persist(&data, &mut sink)?;

    if let Some(err) = result.persistence_error() {
        tracing::warn!("Continuing without saved parameters: {}", err);
    }

    let averages = result.averages();
    println!(
        "Average SlopePrice: {:.6}, SlopeVolume: {:.6}",
        averages.slope_price, averages.slope_volume
    );
    println!("{}", result.evaluate()?);

    if let Some(path) = &config.forecasts_path {
        write_forecast_csv(path, result.timestamps(), result.actuals(), result.forecasts())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Forecasts written to {}", path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config()?;

    if let Err(err) = run(&config) {
        tracing::error!("Forecast run failed: {:#}", err);
        return Err(err);
    }

    Ok(())
}
