use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::TicklineError;
use crate::series::{CanonicalSeries, ForecastPoint, LinePoint, PricePoint, Trend};
use crate::timeseries::util::ensure_strictly_ascending;
use tickline_types::StitchConfig;

/// Spacing of undated forecast values: predictions are daily whatever the chart
/// interval.
pub const FORECAST_STEP_SECONDS: i64 = 86_400;

/// A forecast continuation anchored on the last historical point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StitchedSeries {
    /// `[last_historical, bridge?, forecast...]`, strictly ascending.
    pub points: Vec<PricePoint>,
    /// The synthesized bridge point, if one was inserted.
    pub bridge: Option<PricePoint>,
    /// Last forecast value against last historical value.
    pub trend: Trend,
}

impl StitchedSeries {
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

    /// True when nothing of the forecast survived filtering.
    #[must_use]
    pub fn forecast_is_empty(&self) -> bool {
        self.points.len() <= 1 && self.bridge.is_none()
    }
}

/// Drop unusable forecast points and collapse duplicates.
///
/// - Null, NaN and infinite values are dropped.
/// - With `after = Some(t)`, points at or before `t` are dropped.
/// - One point per timestamp survives; the last one supplied wins.
/// - Output is sorted by timestamp.
#[must_use]
pub fn clean_forecast(forecast: &[ForecastPoint], after: Option<i64>) -> Vec<PricePoint> {
    let mut by_time: BTreeMap<i64, f64> = BTreeMap::new();
    for f in forecast {
        let Some(value) = f.usable_value() else {
            continue;
        };
        if after.is_some_and(|t| f.time <= t) {
            continue;
        }
        by_time.insert(f.time, value);
    }
    by_time
        .into_iter()
        .map(|(time, value)| PricePoint::close(time, value))
        .collect()
}

/// Bridge point between the last historical point and the first forecast point.
///
/// Returns `Some` only if the gap is strictly larger than `cfg.gap_threshold_secs`.
/// The bridge sits `cfg.bridge_offset_secs` after `last` at the midpoint value.
#[must_use]
pub fn bridge_point(last: &PricePoint, first: &PricePoint, cfg: &StitchConfig) -> Option<PricePoint> {
    let gap = first.time.saturating_sub(last.time);
    (gap > cfg.gap_threshold_secs).then(|| {
        PricePoint::close(
            last.time.saturating_add(cfg.bridge_offset_secs),
            (last.value + first.value) / 2.0,
        )
    })
}

/// Stitch a forecast onto the end of a historical series.
///
/// The forecast is cleaned with [`clean_forecast`] relative to the last historical
/// point, a bridge is inserted when the gap exceeds the configured threshold, and
/// the assembled `[last_historical, bridge?, forecast...]` is checked for strictly
/// increasing timestamps.
///
/// With an empty history there is no anchor: the result is the cleaned forecast
/// without a bridge.
///
/// # Errors
/// Returns `Err(TicklineError::MergeIntegrity)` if the assembled series contains a
/// duplicate or out-of-order timestamp.
pub fn stitch_forecast(
    historical: &[PricePoint],
    forecast: &[ForecastPoint],
    cfg: &StitchConfig,
) -> Result<StitchedSeries, TicklineError> {
    let last = historical.last().copied();
    let cleaned = clean_forecast(forecast, last.map(|p| p.time));

    let bridge = match (last.as_ref(), cleaned.first()) {
        (Some(l), Some(f)) => bridge_point(l, f, cfg),
        _ => None,
    };

    let trend = match (last, cleaned.last()) {
        (Some(l), Some(f)) => Trend::between(l.value, f.value),
        _ => Trend::Up,
    };

    let mut points: Vec<PricePoint> = Vec::with_capacity(cleaned.len() + 2);
    points.extend(last);
    points.extend(bridge);
    points.extend(cleaned);

    if let Err(e) = ensure_strictly_ascending(&points) {
        #[cfg(feature = "tracing")]
        tracing::error!(target: "tickline::stitch", error = %e, "stitched series failed integrity check");
        return Err(e);
    }

    Ok(StitchedSeries {
        points,
        bridge,
        trend,
    })
}

/// The whole historical series followed by its stitched forecast continuation.
///
/// The anchor point is not repeated.
///
/// # Errors
/// Returns `Err(TicklineError::MergeIntegrity)` under the same conditions as
/// [`stitch_forecast`].
pub fn append_forecast(
    historical: &CanonicalSeries,
    forecast: &[ForecastPoint],
    cfg: &StitchConfig,
) -> Result<CanonicalSeries, TicklineError> {
    let stitched = stitch_forecast(historical, forecast, cfg)?;
    let skip = usize::from(!historical.is_empty());
    let mut points = historical.to_vec();
    points.extend(stitched.points.into_iter().skip(skip));
    ensure_strictly_ascending(&points)?;
    CanonicalSeries::try_from_sorted(points)
}

/// Timestamp forecast values that arrive without dates.
///
/// The `i`-th value is placed at `anchor + (i + 1) * step`. Null values keep their
/// slot so later values stay aligned.
#[must_use]
pub fn forecast_from_values(anchor: i64, step: i64, values: &[Option<f64>]) -> Vec<ForecastPoint> {
    (1_i64..)
        .zip(values)
        .map(|(i, value)| ForecastPoint {
            time: anchor.saturating_add(step.saturating_mul(i)),
            value: *value,
        })
        .collect()
}
