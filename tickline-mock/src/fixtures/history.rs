use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use tickline_core::{Interval, RawRows};

/// Daily bars on weekdays starting 2024-01-02, keyed the way the backend prints
/// New York midnight (`2024-01-02 00:00:00-05:00`).
pub fn daily(base: f64, count: usize) -> RawRows {
    let mut rows = RawRows::new();
    let mut day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default();
    let mut i = 0usize;
    while i < count {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            let key = format!("{} 00:00:00-05:00", day.format("%Y-%m-%d"));
            push_bar(&mut rows, &key, bar(base, i));
            i += 1;
        }
        day += Duration::days(1);
    }
    rows
}

/// Intraday bars from the 09:30 New York open on 2024-03-15 (EDT, `-04:00`).
pub fn intraday(base: f64, step: Interval, count: usize) -> RawRows {
    let mut rows = RawRows::new();
    let open = NaiveDate::from_ymd_opt(2024, 3, 15)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap_or_default();
    for i in 0..count {
        let offset = i64::try_from(i).unwrap_or(i64::MAX) * step.nominal_seconds();
        let ts: NaiveDateTime = open + Duration::seconds(offset);
        let key = format!("{}-04:00", ts.format("%Y-%m-%d %H:%M:%S"));
        push_bar(&mut rows, &key, bar(base, i));
    }
    rows
}

/// Daily rows with the defects a real payload carries: a null close, an
/// unparseable date-key and a bar without an open.
pub fn ragged() -> RawRows {
    let mut rows = RawRows::new();
    rows.insert("Close", "2024-01-02 00:00:00-05:00", Some(100.0));
    rows.insert("Open", "2024-01-02 00:00:00-05:00", Some(99.0));
    rows.insert("High", "2024-01-02 00:00:00-05:00", Some(101.0));
    rows.insert("Low", "2024-01-02 00:00:00-05:00", Some(98.5));

    rows.insert("Close", "2024-01-03 00:00:00-05:00", None);
    rows.insert("Open", "2024-01-03 00:00:00-05:00", Some(100.0));

    rows.insert("Close", "not a date", Some(250.0));

    rows.insert("Close", "2024-01-04 00:00:00-05:00", Some(102.0));
    rows.insert("High", "2024-01-04 00:00:00-05:00", Some(103.0));
    rows.insert("Low", "2024-01-04 00:00:00-05:00", Some(101.0));
    rows
}

/// Deterministic OHLC for bar `i`: a gentle uptrend with a 5-bar wobble.
#[allow(clippy::cast_precision_loss)]
fn bar(base: f64, i: usize) -> (f64, f64, f64, f64) {
    let wobble = [0.0, 0.8, -0.4, 1.1, -0.6][i % 5];
    let close = base + i as f64 * 0.5 + wobble;
    let open = close - 0.3;
    (open, close.max(open) + 0.7, close.min(open) - 0.6, close)
}

fn push_bar(rows: &mut RawRows, key: &str, (open, high, low, close): (f64, f64, f64, f64)) {
    rows.insert("Open", key, Some(open));
    rows.insert("High", key, Some(high));
    rows.insert("Low", key, Some(low));
    rows.insert("Close", key, Some(close));
    rows.insert("Adj Close", key, Some(close));
}
