use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rolling_forecast::report::write_forecast_csv;
use rolling_forecast::{MemorySink, RollingForecaster, TimeSeriesData};

const DAY_MS: i64 = 86_400_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Random-walk price with a slowly growing supply-like volume series
    let mut rng = StdRng::seed_from_u64(7);
    let price_noise = Normal::new(0.0, 25.0)?;
    let volume_noise = Normal::new(0.0, 40.0)?;

    let n = 365;
    let start_ms = 1_609_459_200_000; // 2021-01-01
    let timestamps: Vec<i64> = (0..n).map(|i| start_ms + i as i64 * DAY_MS).collect();

    let mut prices = Vec::with_capacity(n);
    let mut volumes = Vec::with_capacity(n);
    let (mut price, mut volume) = (30_000.0, 18_500_000.0);
    for _ in 0..n {
        price += price_noise.sample(&mut rng);
        volume += 900.0 + volume_noise.sample(&mut rng);
        prices.push(price);
        volumes.push(volume);
    }

    let data = TimeSeriesData::from_values(&timestamps, &prices, &volumes)?;

    let forecaster = RollingForecaster::new(30)?;
    let mut sink = MemorySink::new();
    let result = forecaster.forecast_and_persist(&data, &mut sink)?;

    println!("Fitted {} windows", result.len());
    for record in result.parameters().iter().take(3) {
        println!(
            "{} .. {}: intercept {:.3}, slopePrice {:.5}, slopeVolume {:.5}",
            record.start_date.date_naive(),
            record.end_date.date_naive(),
            record.intercept,
            record.slope_price,
            record.slope_volume
        );
    }
    println!("{}", result.evaluate()?);

    let out = std::env::temp_dir().join("synthetic_forecast.csv");
    write_forecast_csv(&out, result.timestamps(), result.actuals(), result.forecasts())?;
    println!("Forecasts written to {}", out.display());

    Ok(())
}
