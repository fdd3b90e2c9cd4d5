use tickline_types::{
    IndicatorDefaults, IndicatorKind, MemoConfig, StitchConfig, TicklineConfig, TicklineError,
};

#[test]
fn default_config_roundtrip() {
    let cfg = TicklineConfig::default();

    let json = serde_json::to_string(&cfg).expect("serialize config");
    let de: TicklineConfig = serde_json::from_str(&json).expect("deserialize config");

    assert_eq!(de, cfg);
    assert_eq!(de.exchange_timezone, chrono_tz::America::New_York);
    assert_eq!(de.stitch.gap_threshold_secs, 300);
    assert_eq!(de.stitch.bridge_offset_secs, 60);
}

#[test]
fn custom_config_roundtrip() {
    let cfg = TicklineConfig {
        exchange_timezone: chrono_tz::Europe::London,
        stitch: StitchConfig {
            gap_threshold_secs: 900,
            bridge_offset_secs: 120,
        },
        indicators: IndicatorDefaults {
            sma_period: 50,
            ema_period: 12,
            rsi_period: 7,
            bollinger_period: 10,
            bollinger_multiplier: 2.5,
        },
        memo: MemoConfig { max_entries: 0 },
    };

    let json = serde_json::to_string(&cfg).expect("serialize config");
    assert!(json.contains("Europe/London"));
    let de: TicklineConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(de, cfg);
}

#[test]
fn default_config_is_valid() {
    assert!(TicklineConfig::default().validate().is_ok());
}

#[test]
fn zero_period_is_rejected() {
    let mut cfg = TicklineConfig::default();
    cfg.indicators.rsi_period = 0;
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err, TicklineError::InvalidArg(ref m) if m.contains("rsi")));
}

#[test]
fn bad_multiplier_and_offsets_are_rejected() {
    let mut cfg = TicklineConfig::default();
    cfg.indicators.bollinger_multiplier = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = TicklineConfig::default();
    cfg.stitch.bridge_offset_secs = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = TicklineConfig::default();
    cfg.stitch.gap_threshold_secs = -1;
    assert!(cfg.validate().is_err());
}

#[test]
fn indicator_kind_serde_is_tagged() {
    let kind = IndicatorKind::Bollinger {
        period: 20,
        multiplier: 2.0,
    };
    let json = serde_json::to_value(kind).expect("serialize kind");
    assert_eq!(json["kind"], "bollinger");
    assert_eq!(json["period"], 20);
    let de: IndicatorKind = serde_json::from_value(json).expect("deserialize kind");
    assert_eq!(de, kind);
}
