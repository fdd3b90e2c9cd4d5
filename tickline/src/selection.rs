//! Chart selection state: the active period, interval and indicator overlays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tickline_core::{IndicatorSet, Interval, Period, Reconciliation, reconcile_on};

/// What the chart currently shows.
///
/// The interval is always valid for the period on the date it was last
/// reconciled; changing either one reconciles instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSelection {
    period: Period,
    interval: Interval,
    indicators: IndicatorSet,
}

impl Default for ChartSelection {
    /// One month of hourly bars with no overlays.
    fn default() -> Self {
        Self {
            period: Period::M1,
            interval: Interval::H1,
            indicators: IndicatorSet::empty(),
        }
    }
}

impl ChartSelection {
    /// Selection for `period`, starting from its finest valid interval.
    #[must_use]
    pub fn new(period: Period, today: NaiveDate) -> Self {
        let interval = tickline_core::valid_intervals_on(period, today)
            .first()
            .copied()
            .unwrap_or(Interval::D1);
        Self {
            period,
            interval,
            indicators: IndicatorSet::empty(),
        }
    }

    /// Active period.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Active interval, valid for the active period.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Selected overlays.
    #[must_use]
    pub const fn indicators(&self) -> IndicatorSet {
        self.indicators
    }

    /// Switch period and reconcile the current interval against it.
    pub fn set_period(&mut self, period: Period, today: NaiveDate) -> Reconciliation {
        self.period = period;
        let r = reconcile_on(period, self.interval, today);
        self.interval = r.interval;
        r
    }

    /// Request an interval; an invalid one is replaced by the finest valid interval.
    pub fn set_interval(&mut self, interval: Interval, today: NaiveDate) -> Reconciliation {
        let r = reconcile_on(self.period, interval, today);
        self.interval = r.interval;
        r
    }

    /// Switch an overlay on or off.
    pub fn toggle_indicator(&mut self, which: IndicatorSet) {
        self.indicators.toggle_indicator(which);
    }

    /// Switch every overlay off.
    pub fn reset_indicators(&mut self) {
        self.indicators.reset();
    }
}
