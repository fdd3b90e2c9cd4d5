//! Conversion of backend row payloads into canonical series.
//!
//! The backend sends, per asset, a mapping from price field (`Open`, `High`, `Low`,
//! `Close`, ...) to a mapping from date-key to value or `null`, optionally wrapped
//! by ticker.

use std::collections::BTreeMap;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::TicklineError;
use crate::series::{CanonicalSeries, ForecastPoint, PricePoint};
use crate::timeseries::normalize::{is_sentinel, normalize_in};

/// Values of one price field keyed by date-key.
pub type FieldRows = BTreeMap<String, Option<f64>>;

/// Raw rows for a single asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRows {
    fields: BTreeMap<String, FieldRows>,
}

impl RawRows {
    /// Empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a single-asset payload.
    ///
    /// # Errors
    /// Returns `TicklineError::Data` if the JSON does not have the row shape.
    pub fn from_json(json: &str) -> Result<Self, TicklineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set one value. `None` records an explicit `null`.
    pub fn insert(&mut self, field: &str, date_key: &str, value: Option<f64>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .insert(date_key.to_string(), value);
    }

    /// Rows of `field`, matched case-insensitively.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&FieldRows> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(field))
            .map(|(_, v)| v)
    }

    /// Names of the fields present, as sent.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// True if no field carries any row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(BTreeMap::is_empty)
    }
}

/// Payload wrapped by ticker: `{ "AAPL": { "Close": { ... } } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload {
    assets: BTreeMap<String, RawRows>,
}

impl RawPayload {
    /// Parse a ticker-wrapped payload.
    ///
    /// # Errors
    /// Returns `TicklineError::Data` if the JSON does not have the payload shape.
    pub fn from_json(json: &str) -> Result<Self, TicklineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add or replace the rows of one asset.
    pub fn insert(&mut self, ticker: &str, rows: RawRows) {
        self.assets.insert(ticker.to_string(), rows);
    }

    /// Rows of one asset.
    ///
    /// # Errors
    /// Returns `TicklineError::NotFound` if the payload has no entry for `ticker`.
    pub fn rows_for(&self, ticker: &str) -> Result<&RawRows, TicklineError> {
        self.assets
            .get(ticker)
            .ok_or_else(|| TicklineError::not_found(format!("rows for {ticker}")))
    }

    /// Tickers present in the payload.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }
}

fn usable(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

/// Build a canonical series from one asset's rows.
///
/// Close date-keys drive the series: null/NaN closes are dropped, keys are
/// normalized into `tz`, points whose key does not normalize are dropped, and
/// open/high/low are attached from the same date-key when present.
#[must_use]
pub fn ingest_rows(rows: &RawRows, tz: Tz) -> CanonicalSeries {
    let Some(close) = rows.field("close") else {
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "tickline::ingest", fields = ?rows.field_names().collect::<Vec<_>>(), "payload has no close field");
        return CanonicalSeries::empty();
    };
    let open = rows.field("open");
    let high = rows.field("high");
    let low = rows.field("low");
    let lookup = |f: Option<&FieldRows>, key: &str| f.and_then(|m| usable(m.get(key).copied().flatten()));

    let mut points: Vec<PricePoint> = Vec::with_capacity(close.len());
    for (key, value) in close {
        let Some(value) = usable(*value) else {
            continue;
        };
        let time = normalize_in(key, tz);
        if is_sentinel(time) {
            continue;
        }
        points.push(PricePoint {
            time,
            open: lookup(open, key),
            high: lookup(high, key),
            low: lookup(low, key),
            value,
        });
    }
    CanonicalSeries::from_points(points)
}

/// Build forecast points from a date-keyed mapping of predicted values.
///
/// Keys that do not normalize are dropped; null values are kept so the stitcher
/// can apply its own filtering.
#[must_use]
pub fn ingest_forecast(rows: &FieldRows, tz: Tz) -> Vec<ForecastPoint> {
    rows.iter()
        .filter_map(|(key, value)| {
            let time = normalize_in(key, tz);
            (!is_sentinel(time)).then_some(ForecastPoint {
                time,
                value: *value,
            })
        })
        .collect()
}
