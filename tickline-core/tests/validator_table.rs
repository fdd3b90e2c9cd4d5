use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use tickline_core::validator::ytd_intervals;
use tickline_core::{
    DEFAULT_EXCHANGE_TZ, Interval, Period, reconcile, reconcile_on, valid_intervals_in,
    valid_intervals_on,
};

use tickline_core::Interval::{D1, H1, I1m, I5m, I15m, I30m, Mo1, W1};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn fixed_table() {
    let today = day(2024, 6, 1);
    let table: &[(Period, &[Interval])] = &[
        (Period::D1, &[I1m, I5m, I15m, I30m, H1]),
        (Period::D5, &[I5m, I15m, I30m, H1]),
        (Period::M1, &[H1, D1]),
        (Period::M3, &[D1, W1]),
        (Period::M6, &[D1, W1]),
        (Period::Y1, &[D1, W1, Mo1]),
        (Period::Y2, &[W1, Mo1]),
        (Period::Y5, &[W1, Mo1]),
        (Period::Y10, &[Mo1]),
        (Period::Max, &[Mo1]),
    ];
    for (period, expected) in table {
        assert_eq!(valid_intervals_on(*period, today), *expected, "{period}");
    }
}

#[test]
fn ytd_depends_on_days_elapsed() {
    let first_week: &[Interval] = &[I1m, I5m, I15m, I30m, H1, D1];
    let first_60: &[Interval] = &[I5m, I15m, I30m, H1, D1];
    let later: &[Interval] = &[D1, W1];

    assert_eq!(valid_intervals_on(Period::Ytd, day(2024, 1, 1)), first_week);
    assert_eq!(valid_intervals_on(Period::Ytd, day(2024, 1, 8)), first_week);
    assert_eq!(valid_intervals_on(Period::Ytd, day(2024, 1, 9)), first_60);
    // 2024 is a leap year: March 1 is 60 days after January 1
    assert_eq!(valid_intervals_on(Period::Ytd, day(2024, 3, 1)), first_60);
    assert_eq!(valid_intervals_on(Period::Ytd, day(2024, 3, 2)), later);
    // 2023 is not: March 1 is day 59, March 3 day 61
    assert_eq!(valid_intervals_on(Period::Ytd, day(2023, 3, 1)), first_60);
    assert_eq!(valid_intervals_on(Period::Ytd, day(2023, 3, 2)), first_60);
    assert_eq!(valid_intervals_on(Period::Ytd, day(2023, 3, 3)), later);
    assert_eq!(valid_intervals_on(Period::Ytd, day(2024, 12, 31)), later);

    assert_eq!(ytd_intervals(7), first_week);
    assert_eq!(ytd_intervals(8), first_60);
    assert_eq!(ytd_intervals(60), first_60);
    assert_eq!(ytd_intervals(61), later);
}

#[test]
fn reconcile_keeps_valid_and_replaces_invalid() {
    let today = day(2024, 6, 1);
    let kept = reconcile_on(Period::Y1, W1, today);
    assert_eq!(kept.interval, W1);
    assert!(kept.is_unchanged());

    let replaced = reconcile_on(Period::D1, D1, today);
    assert_eq!(replaced.interval, I1m);
    assert_eq!(replaced.replaced, Some(D1));

    assert_eq!(reconcile_on(Period::Max, I5m, today).interval, Mo1);
    assert_eq!(reconcile_on(Period::M1, I1m, today).interval, H1);
}

#[test]
fn clock_based_variants_agree_with_table() {
    // fixed periods do not depend on the date
    assert_eq!(valid_intervals_in(Period::M3, DEFAULT_EXCHANGE_TZ), &[D1, W1]);
    assert_eq!(reconcile(Period::D5, Mo1, DEFAULT_EXCHANGE_TZ), I5m);
    assert!(!valid_intervals_in(Period::Ytd, DEFAULT_EXCHANGE_TZ).is_empty());
}

fn arb_period() -> impl Strategy<Value = Period> {
    prop::sample::select(Period::ALL.to_vec())
}

fn arb_interval() -> impl Strategy<Value = Interval> {
    prop::sample::select(Interval::ALL.to_vec())
}

fn arb_day() -> impl Strategy<Value = NaiveDate> {
    (0i64..3_000).prop_map(|d| day(2020, 1, 1) + Duration::days(d))
}

proptest! {
    #[test]
    fn every_period_offers_something(period in arb_period(), today in arb_day()) {
        prop_assert!(!valid_intervals_on(period, today).is_empty());
    }

    #[test]
    fn reconcile_changes_only_invalid_intervals(
        period in arb_period(),
        current in arb_interval(),
        today in arb_day(),
    ) {
        let valid = valid_intervals_on(period, today);
        let r = reconcile_on(period, current, today);
        prop_assert!(valid.contains(&r.interval));
        if valid.contains(&current) {
            prop_assert_eq!(r.interval, current);
            prop_assert!(r.is_unchanged());
        } else {
            prop_assert_eq!(r.interval, valid[0]);
            prop_assert_eq!(r.replaced, Some(current));
        }
    }

    #[test]
    fn reconcile_is_idempotent(period in arb_period(), current in arb_interval(), today in arb_day()) {
        let once = reconcile_on(period, current, today).interval;
        prop_assert!(reconcile_on(period, once, today).is_unchanged());
    }
}
