//! Tickline turns raw, irregularly timestamped price rows into chart-ready series.
//!
//! Overview
//! - Normalizes backend timestamps onto exchange wall-clock time so a UTC-only
//!   chart axis shows exchange-local hours.
//! - Builds canonical series (ascending, unique times) from row payloads.
//! - Computes SMA, EMA, RSI and Bollinger bands, memoized per series.
//! - Stitches forecast continuations onto history without duplicate or
//!   out-of-order timestamps, bridging wide gaps.
//! - Keeps period/interval selections consistent with a fixed compatibility table.
//!
//! Key behaviors and trade-offs
//! - Canonical timestamps are display values: the exchange wall clock re-read as
//!   UTC. Durations computed across a DST change are off by the offset change.
//! - Invalid timestamps never fail ingestion; they normalize to `0` and the point
//!   is dropped.
//! - Indicators on too-short series are empty, and overlays for them are omitted.
//! - Stitching is the only fatal path: an assembled continuation that is not
//!   strictly ascending is a `MergeIntegrity` error, never silently repaired.
//! - Memoization keys on series identity. Clone a `CanonicalSeries` to share
//!   cached indicators; rebuilding equal points starts a fresh entry.
//!
//! Examples
//! ```rust
//! use tickline::{IndicatorSet, Tickline};
//!
//! let tl = Tickline::builder().build()?;
//! let series = tl.ingest_json(r#"{
//!     "Close": {
//!         "2024-01-02 00:00:00-05:00": 10.0,
//!         "2024-01-03 00:00:00-05:00": 11.0,
//!         "2024-01-04 00:00:00-05:00": null
//!     }
//! }"#)?;
//! assert_eq!(series.len(), 2);
//!
//! // too short for the default 20-period overlays
//! assert!(tl.overlays(&series, IndicatorSet::all()).is_empty());
//!
//! let forecast = tl.forecast_from_values(&series, &[Some(11.5), Some(12.0)]);
//! let stitched = tl.stitch(&series, &forecast)?;
//! assert!(stitched.bridge.is_some());
//! # Ok::<(), tickline::TicklineError>(())
//! ```
#![warn(missing_docs)]

mod core;
/// Indicator memoization keyed by series identity.
pub mod memo;
/// Chart selection state.
pub mod selection;

pub use crate::core::{Overlays, Tickline, TicklineBuilder};
pub use crate::selection::ChartSelection;
pub use tickline_core::{
    BandPoint, CandlePoint, CanonicalSeries, FieldRows, ForecastPoint, IndicatorDefaults,
    IndicatorKind, IndicatorOutput, IndicatorPoint, IndicatorSet, Interval, LinePoint,
    MemoConfig, Period, PricePoint, RawPayload, RawRows, RawTimestamp, Reconciliation,
    StitchConfig, StitchedSeries, TicklineConfig, TicklineError, Trend, Tz,
};

/// Pure transforms, for callers that manage configuration themselves.
pub use tickline_core::{indicators, timeseries, validator};
