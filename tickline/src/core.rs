use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tickline_core::{
    CanonicalSeries, ForecastPoint, IndicatorDefaults, IndicatorKind, IndicatorOutput,
    IndicatorSet, Interval, Period, RawPayload, RawRows, RawTimestamp, Reconciliation,
    StitchConfig, StitchedSeries, TicklineConfig, TicklineError, Tz,
};

use crate::memo::IndicatorCache;

/// Pipeline from raw backend rows to chart-ready series, indicators and
/// forecast continuations.
///
/// Every transform is pure; the only state is the indicator memo cache, which is
/// internally synchronized, so a `Tickline` can be shared across threads.
#[derive(Debug)]
pub struct Tickline {
    pub(crate) cfg: TicklineConfig,
    pub(crate) memo: IndicatorCache,
}

/// Builder for constructing a `Tickline` with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct TicklineBuilder {
    cfg: TicklineConfig,
}

impl TicklineBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Behavior and trade-offs:
    /// - Canonical timestamps encode New York wall-clock time.
    /// - Forecasts are bridged when they start more than 300 s after history,
    ///   with the bridge 60 s after the last historical point.
    /// - Overlays default to SMA 20, EMA 20, RSI 14 and Bollinger 20 x 2.
    /// - Up to 64 indicator outputs are memoized.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration, e.g. one loaded from JSON.
    #[must_use]
    pub fn config(mut self, cfg: TicklineConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Timezone whose wall clock canonical timestamps encode.
    ///
    /// Behavior and trade-offs:
    /// - Canonical values are display values. Two series normalized in different
    ///   timezones must not be mixed.
    #[must_use]
    pub const fn exchange_timezone(mut self, tz: Tz) -> Self {
        self.cfg.exchange_timezone = tz;
        self
    }

    /// Forecast stitching parameters.
    ///
    /// Behavior and trade-offs:
    /// - An offset larger than the threshold can place the bridge after the first
    ///   forecast point; such stitches fail the integrity check instead of
    ///   producing an out-of-order series.
    #[must_use]
    pub const fn stitch(mut self, cfg: StitchConfig) -> Self {
        self.cfg.stitch = cfg;
        self
    }

    /// Overlay parameters used by [`Tickline::overlays`].
    #[must_use]
    pub const fn indicator_defaults(mut self, defaults: IndicatorDefaults) -> Self {
        self.cfg.indicators = defaults;
        self
    }

    /// Maximum number of memoized indicator outputs.
    ///
    /// Behavior and trade-offs:
    /// - Zero disables memoization; every request recomputes.
    /// - Entries pin the allocation of the series they were computed from (not
    ///   its points' lifetime), so a large capacity with many short-lived series
    ///   holds memory until evicted or [`Tickline::prune_cache`] runs.
    #[must_use]
    pub const fn memo_capacity(mut self, max_entries: usize) -> Self {
        self.cfg.memo.max_entries = max_entries;
        self
    }

    /// Build the `Tickline`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the configuration fails validation.
    pub fn build(self) -> Result<Tickline, TicklineError> {
        self.cfg.validate()?;
        Ok(Tickline {
            memo: IndicatorCache::new(self.cfg.memo.max_entries),
            cfg: self.cfg,
        })
    }
}

/// Indicator outputs computed for a chart's selected overlays.
///
/// An overlay is `None` when it is not selected or the series is too short for
/// its period.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overlays {
    /// Simple moving average line.
    pub sma: Option<Arc<IndicatorOutput>>,
    /// Exponential moving average line.
    pub ema: Option<Arc<IndicatorOutput>>,
    /// Bollinger bands.
    pub bollinger: Option<Arc<IndicatorOutput>>,
    /// RSI line, drawn in its own pane.
    pub rsi: Option<Arc<IndicatorOutput>>,
}

impl Overlays {
    /// True if no overlay was produced.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sma.is_none() && self.ema.is_none() && self.bollinger.is_none() && self.rsi.is_none()
    }

    fn slot(&mut self, kind: IndicatorKind) -> &mut Option<Arc<IndicatorOutput>> {
        match kind {
            IndicatorKind::Sma { .. } => &mut self.sma,
            IndicatorKind::Ema { .. } => &mut self.ema,
            IndicatorKind::Bollinger { .. } => &mut self.bollinger,
            IndicatorKind::Rsi { .. } => &mut self.rsi,
        }
    }
}

impl Tickline {
    /// Start building a new `Tickline`.
    ///
    /// ```rust
    /// use tickline::{Tickline, StitchConfig};
    ///
    /// let tl = Tickline::builder()
    ///     .exchange_timezone(chrono_tz::Asia::Tokyo)
    ///     .stitch(StitchConfig { gap_threshold_secs: 600, bridge_offset_secs: 60 })
    ///     .memo_capacity(16)
    ///     .build()?;
    /// assert_eq!(tl.config().stitch.gap_threshold_secs, 600);
    /// # Ok::<(), tickline::TicklineError>(())
    /// ```
    #[must_use]
    pub fn builder() -> TicklineBuilder {
        TicklineBuilder::new()
    }

    /// The configuration this instance was built with.
    #[must_use]
    pub const fn config(&self) -> &TicklineConfig {
        &self.cfg
    }

    /// Canonical timestamp in the configured exchange timezone; `0` on invalid input.
    #[must_use]
    pub fn normalize<'a>(&self, raw: impl Into<RawTimestamp<'a>>) -> i64 {
        tickline_core::normalize_in(raw, self.cfg.exchange_timezone)
    }

    /// Fallible variant of [`Tickline::normalize`].
    ///
    /// # Errors
    /// Returns `InvalidTimestamp` if the input cannot be parsed.
    pub fn try_normalize<'a>(&self, raw: impl Into<RawTimestamp<'a>>) -> Result<i64, TicklineError> {
        tickline_core::try_normalize_in(raw, self.cfg.exchange_timezone)
    }

    /// Canonical series from one asset's rows.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tickline::ingest", skip(self, rows), fields(tz = %self.cfg.exchange_timezone))
    )]
    #[must_use]
    pub fn ingest(&self, rows: &RawRows) -> CanonicalSeries {
        tickline_core::ingest_rows(rows, self.cfg.exchange_timezone)
    }

    /// Canonical series from a single-asset JSON payload.
    ///
    /// # Errors
    /// Returns `Data` if the JSON does not have the row shape.
    pub fn ingest_json(&self, json: &str) -> Result<CanonicalSeries, TicklineError> {
        Ok(self.ingest(&RawRows::from_json(json)?))
    }

    /// Canonical series for `ticker` from a ticker-wrapped payload.
    ///
    /// # Errors
    /// Returns `NotFound` if the payload has no rows for `ticker`.
    pub fn ingest_payload(
        &self,
        payload: &RawPayload,
        ticker: &str,
    ) -> Result<CanonicalSeries, TicklineError> {
        Ok(self.ingest(payload.rows_for(ticker)?))
    }

    /// Forecast points from a date-keyed mapping of predicted values.
    #[must_use]
    pub fn ingest_forecast(&self, rows: &tickline_core::FieldRows) -> Vec<ForecastPoint> {
        tickline_core::ingest_forecast(rows, self.cfg.exchange_timezone)
    }

    /// Output of `kind` over `series`, memoized on the series' identity.
    ///
    /// Behavior and trade-offs:
    /// - Clones of a series share its identity and hit the same entries; an equal
    ///   series built separately does not.
    /// - Too little data yields an empty output, which is memoized like any other.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tickline::indicator", skip(self, series), fields(points = series.len(), indicator = %kind))
    )]
    pub fn indicator(&self, series: &CanonicalSeries, kind: IndicatorKind) -> Arc<IndicatorOutput> {
        self.memo.get_or_compute(series, kind)
    }

    /// Compute the selected overlays with the configured default parameters.
    ///
    /// Behavior and trade-offs:
    /// - Indicators whose series is too short for their period are omitted rather
    ///   than returned empty, so a renderer can skip them without checking lengths.
    pub fn overlays(&self, series: &CanonicalSeries, selected: IndicatorSet) -> Overlays {
        let mut out = Overlays::default();
        for kind in self.cfg.indicators.kinds() {
            if !selected.contains(kind.flag()) {
                continue;
            }
            if series.len() < kind.min_points() {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "tickline::overlays", indicator = %kind, points = series.len(), "series too short; overlay omitted");
                continue;
            }
            *out.slot(kind) = Some(self.indicator(series, kind));
        }
        out
    }

    /// Drop memoized outputs of `series`, e.g. when a chart swaps in a new one.
    pub fn invalidate(&self, series: &CanonicalSeries) -> usize {
        self.memo.invalidate(series)
    }

    /// Drop memoized outputs whose series no longer exists.
    pub fn prune_cache(&self) -> usize {
        self.memo.prune()
    }

    /// Drop all memoized outputs.
    pub fn clear_cache(&self) {
        self.memo.clear();
    }

    /// Number of memoized outputs.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.memo.len()
    }

    /// Stitch a forecast continuation onto `historical`.
    ///
    /// # Errors
    /// Returns `MergeIntegrity` if the assembled continuation is not strictly
    /// ascending.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tickline::stitch", skip(self, historical, forecast), fields(history = historical.len(), forecast = forecast.len()))
    )]
    pub fn stitch(
        &self,
        historical: &CanonicalSeries,
        forecast: &[ForecastPoint],
    ) -> Result<StitchedSeries, TicklineError> {
        tickline_core::stitch_forecast(historical, forecast, &self.cfg.stitch)
    }

    /// The whole history followed by the stitched continuation.
    ///
    /// # Errors
    /// Same as [`Tickline::stitch`].
    pub fn full_series(
        &self,
        historical: &CanonicalSeries,
        forecast: &[ForecastPoint],
    ) -> Result<CanonicalSeries, TicklineError> {
        tickline_core::append_forecast(historical, forecast, &self.cfg.stitch)
    }

    /// Date undated forecast values one day apart after the last point of
    /// `historical`, regardless of the series' own cadence.
    #[must_use]
    pub fn forecast_from_values(
        &self,
        historical: &CanonicalSeries,
        values: &[Option<f64>],
    ) -> Vec<ForecastPoint> {
        Self::date_forecast(historical, tickline_core::FORECAST_STEP_SECONDS, values)
    }

    /// Like [`Tickline::forecast_from_values`], one `step` bar apart.
    #[must_use]
    pub fn forecast_from_values_every(
        &self,
        historical: &CanonicalSeries,
        step: Interval,
        values: &[Option<f64>],
    ) -> Vec<ForecastPoint> {
        Self::date_forecast(historical, step.nominal_seconds(), values)
    }

    fn date_forecast(
        historical: &CanonicalSeries,
        step: i64,
        values: &[Option<f64>],
    ) -> Vec<ForecastPoint> {
        let Some(last) = historical.last() else {
            return Vec::new();
        };
        tickline_core::forecast_from_values(last.time, step, values)
    }

    /// Valid intervals for `period`, with `ytd` resolved against today in the
    /// exchange timezone.
    #[must_use]
    pub fn valid_intervals(&self, period: Period) -> &'static [Interval] {
        tickline_core::valid_intervals_in(period, self.cfg.exchange_timezone)
    }

    /// Valid intervals for `period` with `ytd` resolved against `today`.
    #[must_use]
    pub fn valid_intervals_on(&self, period: Period, today: NaiveDate) -> &'static [Interval] {
        tickline_core::valid_intervals_on(period, today)
    }

    /// Keep `current` if valid for `period`, else the finest valid interval.
    #[must_use]
    pub fn reconcile(&self, period: Period, current: Interval) -> Interval {
        tickline_core::reconcile(period, current, self.cfg.exchange_timezone)
    }

    /// [`Tickline::reconcile`] against an explicit date, reporting replacements.
    #[must_use]
    pub fn reconcile_on(&self, period: Period, current: Interval, today: NaiveDate) -> Reconciliation {
        tickline_core::reconcile_on(period, current, today)
    }

    /// Today's date in the exchange timezone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        tickline_core::validator::today_in(self.cfg.exchange_timezone)
    }
}
