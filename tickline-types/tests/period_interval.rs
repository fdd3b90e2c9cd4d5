use std::collections::HashSet;

use tickline_types::{IndicatorKind, IndicatorSet, Interval, Period};

#[test]
fn period_strings_roundtrip() {
    for p in Period::ALL {
        let parsed: Period = p.as_str().parse().expect("parse period");
        assert_eq!(parsed, p);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, format!("\"{}\"", p.as_str()));
    }
    assert!("2d".parse::<Period>().is_err());
}

#[test]
fn interval_strings_roundtrip() {
    for i in Interval::ALL {
        let parsed: Interval = i.as_str().parse().expect("parse interval");
        assert_eq!(parsed, i);
        assert_eq!(i.to_string(), i.as_str());
    }
    assert!("2h".parse::<Interval>().is_err());
}

#[test]
fn intervals_are_ordered_finest_first() {
    let mut sorted = Interval::ALL;
    sorted.sort();
    assert_eq!(sorted, Interval::ALL);
    for w in Interval::ALL.windows(2) {
        assert!(w[0].nominal_seconds() < w[1].nominal_seconds());
    }
}

#[test]
fn intraday_intervals() {
    let intraday: Vec<_> = Interval::ALL
        .into_iter()
        .filter(|i| i.is_intraday())
        .collect();
    assert_eq!(
        intraday,
        vec![
            Interval::I1m,
            Interval::I5m,
            Interval::I15m,
            Interval::I30m,
            Interval::H1
        ]
    );
}

#[test]
fn indicator_set_toggle_and_reset() {
    let mut set = IndicatorSet::default();
    assert!(set.is_empty());

    set.toggle_indicator(IndicatorSet::SMA);
    set.toggle_indicator(IndicatorSet::RSI);
    assert!(set.contains(IndicatorSet::SMA | IndicatorSet::RSI));
    assert!(!set.contains(IndicatorSet::EMA));

    set.toggle_indicator(IndicatorSet::SMA);
    assert_eq!(set, IndicatorSet::RSI);

    set.reset();
    assert!(set.is_empty());
}

#[test]
fn indicator_kind_identity_includes_parameters() {
    let mut seen = HashSet::new();
    assert!(seen.insert(IndicatorKind::Sma { period: 20 }));
    assert!(seen.insert(IndicatorKind::Ema { period: 20 }));
    assert!(seen.insert(IndicatorKind::Sma { period: 10 }));
    assert!(seen.insert(IndicatorKind::Bollinger { period: 20, multiplier: 2.0 }));
    assert!(seen.insert(IndicatorKind::Bollinger { period: 20, multiplier: 2.5 }));
    assert!(!seen.insert(IndicatorKind::Sma { period: 20 }));

    assert_eq!(IndicatorKind::Rsi { period: 14 }.min_points(), 15);
    assert_eq!(IndicatorKind::Sma { period: 14 }.min_points(), 14);
    assert_eq!(IndicatorKind::Rsi { period: 14 }.flag(), IndicatorSet::RSI);
}
