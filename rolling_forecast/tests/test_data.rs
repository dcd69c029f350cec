use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rolling_forecast::data::{DataLoader, Sample, TimeSeriesData};
use rolling_forecast::ForecastError;
use std::io::Write;
use tempfile::NamedTempFile;

const CHART: &str = r#"{
    "metric1": "total-bitcoins",
    "metric2": "market-price",
    "total-bitcoins": [
        {"x": 1293840000000, "y": 5000000.0},
        {"x": 1325376000000, "y": 8000000.0},
        {"x": 1356998400000, "y": 10600000.0}
    ],
    "market-price": [
        {"x": 1293840000000, "y": 0.3},
        {"x": 1325376000000, "y": 5.27},
        {"x": 1356998400000, "y": 13.3}
    ],
    "type": "linear",
    "average": "8hour",
    "timespan": "all"
}"#;

#[test]
fn test_blockchain_json_from_str() {
    let data = DataLoader::from_blockchain_json_str(CHART).unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(data.price_values(), vec![0.3, 5.27, 13.3]);
    assert_eq!(data.volume_values(), vec![5000000.0, 8000000.0, 10600000.0]);
    assert_eq!(data.price()[1], Sample::new(1_325_376_000_000, 5.27));
    assert!(data.is_timestamp_aligned());
}

#[test]
fn test_blockchain_json_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", CHART).unwrap();

    let data = DataLoader::from_blockchain_json(file.path()).unwrap();
    assert_eq!(data.len(), 3);

    // 2011-01-01, 2012-01-01, 2013-01-01
    let filtered = data.filter_years(2012, 2013);
    assert_eq!(filtered.price_values(), vec![5.27, 13.3]);
    assert_eq!(filtered.timestamps_ms(), vec![1_325_376_000_000, 1_356_998_400_000]);
}

#[test]
fn test_data_loader_error_handling() {
    let result = DataLoader::from_blockchain_json("nonexistent_file.json");
    assert!(matches!(result, Err(ForecastError::IoError(_))));

    let result = DataLoader::from_blockchain_json_str("{\"market-price\": [1, 2");
    assert!(matches!(result, Err(ForecastError::JsonError(_))));

    let result = DataLoader::from_blockchain_json_str("{\"metric1\": \"market-price\"}");
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn test_data_loader_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "timestamp,price,volume").unwrap();
    writeln!(file, "1672531200000,16547.5,19250000").unwrap();
    writeln!(file, "1672617600000,16625.1,19251000").unwrap();
    writeln!(file, "1672704000000,16688.4,19251900").unwrap();

    let data = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(data.price_values(), vec![16547.5, 16625.1, 16688.4]);
    assert_eq!(data.volume_values(), vec![19250000.0, 19251000.0, 19251900.0]);
}

#[test]
fn test_csv_with_bad_rows_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "timestamp,price,volume").unwrap();
    writeln!(file, "1672531200000,not-a-price,19250000").unwrap();

    let result = DataLoader::from_csv(file.path());
    assert!(matches!(result, Err(ForecastError::CsvError(_))));

    let empty = DataLoader::from_csv_reader("timestamp,price,volume\n".as_bytes());
    assert!(matches!(empty, Err(ForecastError::DataError(_))));
}

#[test]
fn test_from_values_requires_equal_lengths() {
    let result = TimeSeriesData::from_values(&[1, 2, 3], &[1.0, 2.0], &[1.0, 2.0, 3.0]);
    assert!(matches!(result, Err(ForecastError::ValidationError(_))));
}

#[test]
fn test_timestamp_alignment_check() {
    let price = vec![Sample::new(1, 10.0), Sample::new(2, 11.0)];
    let shifted = vec![Sample::new(1, 5.0), Sample::new(3, 6.0)];
    let data = TimeSeriesData::new(price.clone(), shifted);

    assert!(data.has_matching_lengths());
    assert!(!data.is_timestamp_aligned());

    let short = TimeSeriesData::new(price, vec![Sample::new(1, 5.0)]);
    assert!(!short.has_matching_lengths());
    assert!(!short.is_timestamp_aligned());
}

#[test]
fn test_filter_range_is_inclusive() {
    let day = 86_400_000;
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap().timestamp_millis();
    let ts: Vec<i64> = (0..5).map(|i| start + i * day).collect();
    let data = TimeSeriesData::from_values(&ts, &[1.0, 2.0, 3.0, 4.0, 5.0], &[0.0; 5]).unwrap();

    let from = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2023, 1, 4, 0, 0, 0).unwrap();
    let filtered = data.filter_range(from, to);

    assert_eq!(filtered.price_values(), vec![2.0, 3.0, 4.0]);
    assert_eq!(filtered.volume().len(), 3);
}
