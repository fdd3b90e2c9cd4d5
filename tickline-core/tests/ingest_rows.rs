use tickline_core::{
    DEFAULT_EXCHANGE_TZ, Interval, Period, RawPayload, RawRows, TicklineError, Trend,
    ingest_forecast, ingest_rows, normalize, stitch_forecast,
};
use tickline_mock::MockBackend;

#[test]
fn json_rows_become_a_canonical_series() {
    let json = r#"{
        "Open":  {"2024-01-03 00:00:00-05:00": 11.0, "2024-01-02 00:00:00-05:00": 9.5},
        "High":  {"2024-01-03 00:00:00-05:00": 12.5, "2024-01-02 00:00:00-05:00": 10.5},
        "Low":   {"2024-01-03 00:00:00-05:00": 10.5, "2024-01-02 00:00:00-05:00": 9.0},
        "Close": {"2024-01-03 00:00:00-05:00": 12.0, "2024-01-02 00:00:00-05:00": 10.0,
                  "2024-01-04 00:00:00-05:00": null}
    }"#;
    let rows = RawRows::from_json(json).unwrap();
    let series = ingest_rows(&rows, DEFAULT_EXCHANGE_TZ);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].time, normalize("2024-01-02 00:00:00-05:00"));
    assert_eq!(series[1].value, 12.0);
    let candles = series.to_candles();
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].open, 9.5);
    assert_eq!(series.trend(), Trend::Up);
}

#[test]
fn field_names_match_case_insensitively() {
    let mut rows = RawRows::new();
    rows.insert("close", "2024-01-02", Some(1.0));
    assert!(rows.field("Close").is_some());
    assert_eq!(ingest_rows(&rows, DEFAULT_EXCHANGE_TZ).len(), 1);
}

#[test]
fn rows_without_close_are_empty() {
    let mut rows = RawRows::new();
    rows.insert("Open", "2024-01-02", Some(1.0));
    assert!(ingest_rows(&rows, DEFAULT_EXCHANGE_TZ).is_empty());
}

#[test]
fn malformed_json_is_a_data_error() {
    assert!(matches!(
        RawRows::from_json("[1, 2, 3]"),
        Err(TicklineError::Data(_))
    ));
    assert!(matches!(
        RawPayload::from_json("{\"AAPL\": 3}"),
        Err(TicklineError::Data(_))
    ));
}

#[test]
fn payload_lookup_by_ticker() {
    let json = MockBackend::new()
        .payload_json(&["AAPL", "MSFT"], Period::M1, Interval::D1)
        .unwrap();
    let payload = RawPayload::from_json(&json).unwrap();
    assert!(payload.rows_for("MSFT").is_ok());
    assert!(matches!(
        payload.rows_for("GOOG"),
        Err(TicklineError::NotFound { .. })
    ));
}

#[test]
fn mock_forecast_stitches_onto_mock_history() {
    let mock = MockBackend::new();
    let history = ingest_rows(
        &mock.rows("TSLA", Period::M3, Interval::D1).unwrap(),
        DEFAULT_EXCHANGE_TZ,
    );
    let forecast = ingest_forecast(&mock.forecast("TSLA").unwrap(), DEFAULT_EXCHANGE_TZ);
    assert_eq!(forecast.len(), 5);

    let stitched = stitch_forecast(&history, &forecast, &Default::default()).unwrap();
    // one null is dropped; daily spacing bridges the first gap
    assert_eq!(stitched.points.len(), 1 + 1 + 4);
    assert_eq!(stitched.points[0], *history.last().unwrap());
    assert_eq!(stitched.trend, Trend::Up);
}
