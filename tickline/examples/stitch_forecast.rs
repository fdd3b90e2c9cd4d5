use tickline::{IndicatorSet, Interval, Period, Tickline};
use tickline_mock::MockBackend;
use tracing_subscriber::fmt::format::FmtSpan;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=tickline=debug for cache hits and reconciliation warnings
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    let tl = Tickline::builder().build()?;
    let mock = MockBackend::new();

    // 1. Pick a period; an incompatible interval is reconciled, not rejected.
    let today = tl.today();
    let period = Period::M3;
    let r = tl.reconcile_on(period, Interval::I5m, today);
    println!("{period}: requested 5m, using {}", r.interval);

    // 2. Ingest the backend rows into a canonical series.
    let json = mock.payload_json(&["AAPL"], period, r.interval)?;
    let payload = tickline::RawPayload::from_json(&json)?;
    let history = tl.ingest_payload(&payload, "AAPL")?;
    println!(
        "AAPL: {} bars, trend {:?} ({})",
        history.len(),
        history.trend(),
        history.trend().color_hint()
    );

    // 3. Overlays for the selected indicators.
    let overlays = tl.overlays(&history, IndicatorSet::SMA | IndicatorSet::BOLLINGER);
    if let Some(bands) = overlays.bollinger.as_ref().and_then(|b| b.as_bands())
        && let Some(last) = bands.last()
    {
        println!(
            "BB(20,2) last: {:.2} / {:.2} / {:.2}",
            last.lower, last.middle, last.upper
        );
    }

    // 4. Stitch the forecast onto the history.
    let forecast = tl.ingest_forecast(&mock.forecast("AAPL")?);
    let stitched = tl.stitch(&history, &forecast)?;
    if let Some(bridge) = stitched.bridge {
        println!("bridge at {} = {:.2}", bridge.time, bridge.value);
    }
    for p in stitched.to_line_points() {
        println!(" - {} {:.2}", p.time, p.value);
    }
    println!("forecast trend {:?} ({})", stitched.trend, stitched.trend.color_hint());
    Ok(())
}
