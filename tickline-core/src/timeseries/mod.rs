//! Time-series utilities: from raw backend rows to chart-ready canonical series.
//!
//! Modules include:
//! - `normalize`: re-base timestamps onto exchange wall-clock time
//! - `ingest`: turn raw row payloads into canonical series
//! - `merge`: stitch forecast continuations onto history
//! - `util`: series invariants
/// Raw row payloads and their conversion to canonical series.
pub mod ingest;
/// Forecast stitching.
pub mod merge;
/// Exchange-local canonical timestamps.
pub mod normalize;
/// Series invariant checks.
pub mod util;
