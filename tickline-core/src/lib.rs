//! tickline-core
//!
//! Core types and pure transforms of the tickline pipeline.
//!
//! - `series`: canonical series and the point shapes handed to renderers.
//! - `timeseries`: timestamp normalization, raw row ingestion and forecast
//!   stitching.
//! - `indicators`: SMA, EMA, RSI and Bollinger bands.
//! - `validator`: period/interval compatibility and reconciliation.
//! - `types`: re-exports of shared enums, configuration and the error type.
//!
//! Nothing here performs I/O or keeps state between calls; inputs are never
//! mutated and every transform returns a new sequence.
#![warn(missing_docs)]

/// Technical indicators over canonical series.
pub mod indicators;
/// Canonical series and output point shapes.
pub mod series;
/// Time-series utilities for normalizing, ingesting and stitching.
pub mod timeseries;
pub mod types;
/// Period/interval compatibility table and reconciliation.
pub mod validator;

pub use indicators::{bollinger_bands, ema, rsi, sma};
pub use series::{
    BandPoint, CandlePoint, CanonicalSeries, ForecastPoint, IndicatorOutput, IndicatorPoint,
    LinePoint, PricePoint, Trend,
};
pub use timeseries::ingest::{FieldRows, RawPayload, RawRows, ingest_forecast, ingest_rows};
pub use timeseries::merge::{
    FORECAST_STEP_SECONDS, StitchedSeries, append_forecast, bridge_point, clean_forecast,
    forecast_from_values,
    stitch_forecast,
};
pub use timeseries::normalize::{
    DEFAULT_EXCHANGE_TZ, INVALID_TIMESTAMP, RawTimestamp, normalize, normalize_in, try_normalize,
    try_normalize_in,
};
pub use timeseries::util::ensure_strictly_ascending;
pub use types::*;
pub use validator::{Reconciliation, reconcile, reconcile_on, valid_intervals_in, valid_intervals_on};
