//! Canonical price series and the point shapes produced from it.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::TicklineError;

/// One bar of a canonical series.
///
/// `time` is a canonical timestamp (see [`crate::timeseries::normalize`]); `value`
/// is the close. Open/high/low are present only when the source provided them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Canonical epoch seconds.
    pub time: i64,
    /// Opening price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    /// Highest price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    /// Lowest price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    /// Closing price.
    pub value: f64,
}

impl PricePoint {
    /// A close-only point.
    #[must_use]
    pub const fn close(time: i64, value: f64) -> Self {
        Self {
            time,
            open: None,
            high: None,
            low: None,
            value,
        }
    }

    /// A full OHLC point.
    #[must_use]
    pub const fn ohlc(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            value: close,
        }
    }
}

/// Ordered, de-duplicated, immutable sequence of [`PricePoint`]s.
///
/// Cloning is cheap and shares storage. Clones keep the identity of the original
/// (see [`CanonicalSeries::same_series`]), which is what memoization keys on.
#[derive(Debug, Clone)]
pub struct CanonicalSeries {
    points: Arc<[PricePoint]>,
}

impl Default for CanonicalSeries {
    fn default() -> Self {
        Self::empty()
    }
}

impl CanonicalSeries {
    /// A series with no points.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            points: Arc::from(Vec::new()),
        }
    }

    /// Build a series from points in any order.
    ///
    /// Points with a non-finite `value` are dropped. Points are sorted by time and
    /// duplicate timestamps collapse to the last one supplied.
    #[must_use]
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| p.value.is_finite());
        // stable: among equal times the input order survives, so `last` below is the latest write
        points.sort_by_key(|p| p.time);
        let mut out: Vec<PricePoint> = Vec::with_capacity(points.len());
        for p in points {
            match out.last_mut() {
                Some(prev) if prev.time == p.time => *prev = p,
                _ => out.push(p),
            }
        }
        Self {
            points: Arc::from(out),
        }
    }

    /// Build a series from points that must already be canonical.
    ///
    /// # Errors
    /// Returns `TicklineError::Data` if a value is not finite or the times are not
    /// strictly increasing.
    pub fn try_from_sorted(points: Vec<PricePoint>) -> Result<Self, TicklineError> {
        if let Some(p) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(TicklineError::data(format!(
                "non-finite value at time {}",
                p.time
            )));
        }
        if let Some(w) = points.windows(2).find(|w| w[1].time <= w[0].time) {
            return Err(TicklineError::data(format!(
                "timestamps not strictly increasing: {} then {}",
                w[0].time, w[1].time
            )));
        }
        Ok(Self {
            points: Arc::from(points),
        })
    }

    /// Borrow the points.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Whether `other` shares storage with `self` (same series, not merely equal points).
    #[must_use]
    pub fn same_series(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.points, &other.points)
    }

    /// Handle to the shared storage, used to pin series identity.
    #[must_use]
    pub fn storage(&self) -> &Arc<[PricePoint]> {
        &self.points
    }

    /// Render as `{time, value}` points.
    #[must_use]
    pub fn to_line_points(&self) -> Vec<LinePoint> {
        self.points
            .iter()
            .map(|p| LinePoint {
                time: p.time,
                value: p.value,
            })
            .collect()
    }

    /// Render as candles. Points lacking any of open/high/low are skipped.
    #[must_use]
    pub fn to_candles(&self) -> Vec<CandlePoint> {
        self.points
            .iter()
            .filter_map(|p| {
                Some(CandlePoint {
                    time: p.time,
                    open: p.open?,
                    high: p.high?,
                    low: p.low?,
                    close: p.value,
                })
            })
            .collect()
    }

    /// Price direction over the whole series: down iff the last close is below the first.
    #[must_use]
    pub fn trend(&self) -> Trend {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Trend::between(first.value, last.value),
            _ => Trend::Up,
        }
    }
}

impl Deref for CanonicalSeries {
    type Target = [PricePoint];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl AsRef<[PricePoint]> for CanonicalSeries {
    fn as_ref(&self) -> &[PricePoint] {
        &self.points
    }
}

impl PartialEq for CanonicalSeries {
    fn eq(&self, other: &Self) -> bool {
        self.points[..] == other.points[..]
    }
}

impl Serialize for CanonicalSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.points.iter())
    }
}

impl<'de> Deserialize<'de> for CanonicalSeries {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let points = Vec::<PricePoint>::deserialize(deserializer)?;
        Self::try_from_sorted(points).map_err(serde::de::Error::custom)
    }
}

/// `{time, value}` shape accepted by line and area charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    /// Canonical epoch seconds.
    pub time: i64,
    /// Plotted value.
    pub value: f64,
}

/// `{time, open, high, low, close}` shape accepted by candlestick charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    /// Canonical epoch seconds.
    pub time: i64,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
}

/// Single-valued indicator sample (SMA, EMA, RSI).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    /// Timestamp of the input point the value is aligned to.
    pub time: i64,
    /// Indicator value.
    pub value: f64,
}

/// Bollinger band sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    /// Timestamp of the input point the bands are aligned to.
    pub time: i64,
    /// Mean plus `multiplier` standard deviations.
    pub upper: f64,
    /// Trailing mean.
    pub middle: f64,
    /// Mean minus `multiplier` standard deviations.
    pub lower: f64,
}

/// Output of any indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "points", rename_all = "snake_case")]
pub enum IndicatorOutput {
    /// One value per timestamp.
    Line(Vec<IndicatorPoint>),
    /// Upper/middle/lower per timestamp.
    Bands(Vec<BandPoint>),
}

impl IndicatorOutput {
    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Line(v) => v.len(),
            Self::Bands(v) => v.len(),
        }
    }

    /// True if the indicator produced nothing (not enough history).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Timestamps of the samples, ascending.
    #[must_use]
    pub fn times(&self) -> Vec<i64> {
        match self {
            Self::Line(v) => v.iter().map(|p| p.time).collect(),
            Self::Bands(v) => v.iter().map(|p| p.time).collect(),
        }
    }

    /// Borrow the line samples, if this is a line output.
    #[must_use]
    pub fn as_line(&self) -> Option<&[IndicatorPoint]> {
        match self {
            Self::Line(v) => Some(v),
            Self::Bands(_) => None,
        }
    }

    /// Borrow the band samples, if this is a band output.
    #[must_use]
    pub fn as_bands(&self) -> Option<&[BandPoint]> {
        match self {
            Self::Bands(v) => Some(v),
            Self::Line(_) => None,
        }
    }
}

/// A predicted future value. Missing or non-finite values are discarded when stitching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Canonical epoch seconds.
    pub time: i64,
    /// Predicted close.
    pub value: Option<f64>,
}

impl ForecastPoint {
    /// A forecast point with a value.
    #[must_use]
    pub const fn new(time: i64, value: f64) -> Self {
        Self {
            time,
            value: Some(value),
        }
    }

    /// Value if present and finite.
    #[must_use]
    pub fn usable_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

/// Direction hint used to colour a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Flat or rising.
    Up,
    /// Falling.
    Down,
}

impl Trend {
    /// Down iff `to` is strictly below `from`.
    #[must_use]
    pub fn between(from: f64, to: f64) -> Self {
        if to < from { Self::Down } else { Self::Up }
    }

    /// Hex colour the dashboard uses for this direction.
    #[must_use]
    pub const fn color_hint(self) -> &'static str {
        match self {
            Self::Up => "#2d9c41",
            Self::Down => "#e22e29",
        }
    }
}
