//! Exchange-local canonical timestamps.
//!
//! Charting libraries render epoch seconds as UTC. To show exchange wall-clock
//! time without a timezone-aware axis, an instant is re-based: its wall-clock
//! reading in the exchange timezone is re-read as if it were UTC. The result is a
//! display value, not a true UTC timestamp; elapsed-time arithmetic across DST
//! changes is off by the offset change.

use core::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::TicklineError;

/// Returned by [`normalize`] for empty or unparseable input. Callers drop points
/// carrying it before plotting.
pub const INVALID_TIMESTAMP: i64 = 0;

/// Exchange timezone used when none is configured.
pub const DEFAULT_EXCHANGE_TZ: Tz = chrono_tz::America::New_York;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// A timestamp as received from the backend, or one already made canonical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawTimestamp<'a> {
    /// Date or date-time text. Text without an offset is a UTC instant.
    Text(&'a str),
    /// Seconds since the Unix epoch (UTC), possibly fractional.
    Epoch(f64),
    /// Output of a previous normalization; passed through unchanged.
    Canonical(i64),
}

impl<'a> From<&'a str> for RawTimestamp<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a String> for RawTimestamp<'a> {
    fn from(s: &'a String) -> Self {
        Self::Text(s.as_str())
    }
}

impl From<f64> for RawTimestamp<'_> {
    fn from(secs: f64) -> Self {
        Self::Epoch(secs)
    }
}

impl From<i64> for RawTimestamp<'_> {
    #[allow(clippy::cast_precision_loss)]
    fn from(secs: i64) -> Self {
        Self::Epoch(secs as f64)
    }
}

impl From<DateTime<Utc>> for RawTimestamp<'_> {
    #[allow(clippy::cast_precision_loss)]
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Epoch(dt.timestamp() as f64)
    }
}

impl fmt::Display for RawTimestamp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Epoch(secs) => write!(f, "{secs}"),
            Self::Canonical(t) => write!(f, "canonical({t})"),
        }
    }
}

/// Canonical timestamp for `raw` in the default exchange timezone.
///
/// Never fails: invalid input yields [`INVALID_TIMESTAMP`].
#[must_use]
pub fn normalize<'a>(raw: impl Into<RawTimestamp<'a>>) -> i64 {
    normalize_in(raw, DEFAULT_EXCHANGE_TZ)
}

/// Canonical timestamp for `raw` in `tz`.
///
/// Never fails: invalid input yields [`INVALID_TIMESTAMP`] and is logged.
#[must_use]
pub fn normalize_in<'a>(raw: impl Into<RawTimestamp<'a>>, tz: Tz) -> i64 {
    let raw = raw.into();
    match try_normalize_in(raw, tz) {
        Ok(t) => t,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "tickline::normalize", input = %raw, error = %_e, "invalid timestamp; using sentinel");
            INVALID_TIMESTAMP
        }
    }
}

/// Fallible variant of [`normalize`].
///
/// # Errors
/// Returns `TicklineError::InvalidTimestamp` if the input cannot be parsed or
/// lies outside the representable range.
pub fn try_normalize<'a>(raw: impl Into<RawTimestamp<'a>>) -> Result<i64, TicklineError> {
    try_normalize_in(raw, DEFAULT_EXCHANGE_TZ)
}

/// Fallible variant of [`normalize_in`].
///
/// # Errors
/// Returns `TicklineError::InvalidTimestamp` if the input cannot be parsed or
/// lies outside the representable range.
pub fn try_normalize_in<'a>(
    raw: impl Into<RawTimestamp<'a>>,
    tz: Tz,
) -> Result<i64, TicklineError> {
    let raw = raw.into();
    let instant = match raw {
        RawTimestamp::Canonical(t) => return Ok(t),
        RawTimestamp::Text(s) => parse_instant(s),
        RawTimestamp::Epoch(secs) => instant_from_epoch(secs),
    };
    instant
        .map(|dt| rebase(dt, tz))
        .ok_or_else(|| TicklineError::invalid_timestamp(raw.to_string()))
}

/// Whether `t` is the invalid-input sentinel.
#[must_use]
pub const fn is_sentinel(t: i64) -> bool {
    t == INVALID_TIMESTAMP
}

/// Re-base a UTC instant onto the wall clock of `tz`.
#[must_use]
pub fn rebase(instant: DateTime<Utc>, tz: Tz) -> i64 {
    instant
        .with_timezone(&tz)
        .naive_local()
        .and_utc()
        .timestamp()
}

/// Parse the date forms the backend emits into a UTC instant.
#[must_use]
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
    }
    s.parse::<f64>().ok().and_then(instant_from_epoch)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn instant_from_epoch(secs: f64) -> Option<DateTime<Utc>> {
    // beyond ±2^53 seconds the integer part is no longer exact
    const LIMIT: f64 = 9_007_199_254_740_992.0;
    if !secs.is_finite() || secs.abs() >= LIMIT {
        return None;
    }
    let whole = secs.floor();
    let nanos = (((secs - whole) * 1e9) as u32).min(999_999_999);
    DateTime::from_timestamp(whole as i64, nanos)
}
