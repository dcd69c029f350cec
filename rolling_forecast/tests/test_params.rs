use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rolling_forecast::params::load_parameters;
use rolling_forecast::{
    AllModelParameters, ForecastError, JsonFileSink, ModelCoefficients, ModelParameters,
    ParameterSink,
};
use tempfile::tempdir;

fn sample_parameters() -> AllModelParameters {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2023, 1, 5, 0, 0, 0).unwrap();
    let coefficients = ModelCoefficients {
        intercept: 12.5,
        slope_price: 0.75,
        slope_volume: -0.002,
    };

    AllModelParameters {
        parameters: vec![ModelParameters::new(coefficients, start, end)],
    }
}

#[test]
fn test_records_use_established_field_names() {
    let json = serde_json::to_value(sample_parameters()).unwrap();
    let record = &json["parameters"][0];

    assert_eq!(record["intercept"], 12.5);
    assert_eq!(record["slopePrice"], 0.75);
    assert_eq!(record["slopeVolume"], -0.002);

    let start = record["startDate"].as_str().unwrap();
    let end = record["endDate"].as_str().unwrap();
    assert_eq!(
        DateTime::parse_from_rfc3339(start).unwrap(),
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(
        DateTime::parse_from_rfc3339(end).unwrap(),
        Utc.with_ymd_and_hms(2023, 1, 5, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_json_file_sink_writes_readable_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model_parameters.json");
    let parameters = sample_parameters();

    let mut sink = JsonFileSink::new(&path);
    sink.save(&parameters).unwrap();

    assert_eq!(load_parameters(&path).unwrap(), parameters);
}

#[test]
fn test_json_file_sink_reports_unwritable_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("model_parameters.json");

    let mut sink = JsonFileSink::new(&path);
    let err = sink.save(&sample_parameters()).unwrap_err();

    match err {
        ForecastError::PersistenceError(msg) => assert!(msg.contains("model_parameters.json")),
        other => panic!("Expected PersistenceError, got {:?}", other),
    }
}

#[test]
fn test_reads_file_in_reference_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("existing.json");
    std::fs::write(
        &path,
        r#"{"parameters":[{"intercept":1.5,"slopePrice":0.25,"slopeVolume":-3.0,
            "startDate":"2012-01-01T01:00:00+01:00","endDate":"2012-01-31T01:00:00+01:00"}]}"#,
    )
    .unwrap();

    let loaded = load_parameters(&path).unwrap();
    assert_eq!(loaded.len(), 1);

    let record = &loaded.parameters[0];
    assert_eq!(
        record.coefficients(),
        ModelCoefficients {
            intercept: 1.5,
            slope_price: 0.25,
            slope_volume: -3.0,
        }
    );
    assert_eq!(record.start_date, Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap());
}
