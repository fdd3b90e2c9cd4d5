use chrono::{DateTime, NaiveDate};
use proptest::prelude::*;
use tickline_core::{
    INVALID_TIMESTAMP, RawTimestamp, TicklineError, normalize, normalize_in, try_normalize,
};

fn wall(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
        .and_utc()
        .timestamp()
}

#[test]
fn winter_instants_shift_by_five_hours() {
    let expected = wall(2024, 1, 2, 9, 30);
    assert_eq!(normalize("2024-01-02 14:30:00+00:00"), expected);
    assert_eq!(normalize("2024-01-02T14:30:00Z"), expected);
    assert_eq!(normalize("2024-01-02 09:30:00-05:00"), expected);
    assert_eq!(normalize(1_704_205_800_i64), expected);
    assert_eq!(normalize(1_704_205_800.0_f64), expected);
}

#[test]
fn summer_instants_shift_by_four_hours() {
    assert_eq!(
        normalize("2024-07-01 14:30:00+00:00"),
        wall(2024, 7, 1, 10, 30)
    );
}

#[test]
fn backend_daily_keys_land_on_midnight() {
    assert_eq!(
        normalize("2024-01-02 00:00:00-05:00"),
        wall(2024, 1, 2, 0, 0)
    );
    assert_eq!(
        normalize("2024-07-01 00:00:00-04:00"),
        wall(2024, 7, 1, 0, 0)
    );
}

#[test]
fn text_without_offset_is_read_as_utc() {
    assert_eq!(normalize("2024-01-02 14:30:00"), wall(2024, 1, 2, 9, 30));
    // UTC midnight is the previous evening in New York
    assert_eq!(normalize("2024-01-02"), wall(2024, 1, 1, 19, 0));
}

#[test]
fn invalid_input_yields_sentinel() {
    for bad in ["", "   ", "garbage", "2024-13-45", "01/02/2024"] {
        assert_eq!(normalize(bad), INVALID_TIMESTAMP, "input {bad:?}");
    }
    assert_eq!(normalize(f64::NAN), INVALID_TIMESTAMP);
    assert_eq!(normalize(f64::INFINITY), INVALID_TIMESTAMP);
    assert!(matches!(
        try_normalize("garbage"),
        Err(TicklineError::InvalidTimestamp(_))
    ));
}

#[test]
fn other_exchange_timezones() {
    let tokyo = chrono_tz::Asia::Tokyo;
    assert_eq!(
        normalize_in("2024-01-02 00:30:00+00:00", tokyo),
        wall(2024, 1, 2, 9, 30)
    );
    assert_eq!(
        normalize_in("2024-01-02 09:30:00", chrono_tz::UTC),
        wall(2024, 1, 2, 9, 30)
    );
}

proptest! {
    #[test]
    fn offset_is_est_or_edt(secs in 0i64..4_000_000_000i64) {
        let t = normalize(secs);
        prop_assume!(t != INVALID_TIMESTAMP);
        let shift = secs - t;
        prop_assert!(shift == 5 * 3_600 || shift == 4 * 3_600, "shift {shift}");
    }

    #[test]
    fn canonical_values_pass_through(t in any::<i64>()) {
        prop_assert_eq!(normalize(RawTimestamp::Canonical(t)), t);
    }

    #[test]
    fn text_and_epoch_agree(secs in 0i64..4_000_000_000i64) {
        let dt = DateTime::from_timestamp(secs, 0).unwrap();
        let text = dt.to_rfc3339();
        prop_assert_eq!(normalize(text.as_str()), normalize(secs));
        prop_assert_eq!(normalize(dt), normalize(secs));
    }

    #[test]
    fn normalization_is_monotone_within_a_season(
        day in 0i64..120,
        a in 0i64..86_400,
        b in 0i64..86_400,
    ) {
        // Nov 2024 through Feb 2025 never crosses a DST change
        let base = wall(2024, 11, 4, 0, 0) + day * 86_400;
        let (lo, hi) = (a.min(b), a.max(b));
        prop_assert!(normalize(base + lo) <= normalize(base + hi));
    }
}
