//! Period/interval compatibility.
//!
//! For each historical window only some bar widths are offered. When the window
//! changes, the active interval is reconciled against the new window and the
//! result is authoritative for the next fetch.

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use tickline_types::{Interval, Period};

use tickline_types::Interval::{D1, H1, I1m, I5m, I15m, I30m, Mo1, W1};

const INTRADAY_ALL: &[Interval] = &[I1m, I5m, I15m, I30m, H1];
const INTRADAY_5D: &[Interval] = &[I5m, I15m, I30m, H1];
const MONTH: &[Interval] = &[H1, D1];
const DAILY_WEEKLY: &[Interval] = &[D1, W1];
const YEAR: &[Interval] = &[D1, W1, Mo1];
const WEEKLY_MONTHLY: &[Interval] = &[W1, Mo1];
const MONTHLY: &[Interval] = &[Mo1];

const YTD_FIRST_WEEK: &[Interval] = &[I1m, I5m, I15m, I30m, H1, D1];
const YTD_FIRST_60_DAYS: &[Interval] = &[I5m, I15m, I30m, H1, D1];
const YTD_LATER: &[Interval] = &[D1, W1];

/// Valid intervals for `period`, finest first. `ytd` is resolved against `today`.
#[must_use]
pub fn valid_intervals_on(period: Period, today: NaiveDate) -> &'static [Interval] {
    match period {
        Period::D1 => INTRADAY_ALL,
        Period::D5 => INTRADAY_5D,
        Period::M1 => MONTH,
        Period::M3 | Period::M6 => DAILY_WEEKLY,
        Period::Y1 => YEAR,
        Period::Y2 | Period::Y5 => WEEKLY_MONTHLY,
        Period::Y10 | Period::Max => MONTHLY,
        Period::Ytd => ytd_intervals(today.ordinal0()),
    }
}

/// Valid intervals for `period`, resolving `ytd` against today's date in `tz`.
#[must_use]
pub fn valid_intervals_in(period: Period, tz: Tz) -> &'static [Interval] {
    valid_intervals_on(period, today_in(tz))
}

/// Intervals offered for year-to-date given the days elapsed since January 1.
#[must_use]
pub const fn ytd_intervals(days_elapsed: u32) -> &'static [Interval] {
    if days_elapsed <= 7 {
        YTD_FIRST_WEEK
    } else if days_elapsed <= 60 {
        YTD_FIRST_60_DAYS
    } else {
        YTD_LATER
    }
}

/// Current calendar date in `tz`.
#[must_use]
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Outcome of reconciling an interval against a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Interval to use from now on.
    pub interval: Interval,
    /// The requested interval, if it was not valid and had to be replaced.
    pub replaced: Option<Interval>,
}

impl Reconciliation {
    /// True if the requested interval was kept.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        self.replaced.is_none()
    }
}

/// Keep `current` if valid for `period` on `today`, otherwise fall back to the
/// finest valid interval. Replacements are logged at warn level.
#[must_use]
pub fn reconcile_on(period: Period, current: Interval, today: NaiveDate) -> Reconciliation {
    let valid = valid_intervals_on(period, today);
    if valid.contains(&current) {
        return Reconciliation {
            interval: current,
            replaced: None,
        };
    }
    // every table row is non-empty
    let interval = valid.first().copied().unwrap_or(D1);
    #[cfg(feature = "tracing")]
    tracing::warn!(
        target: "tickline::validator",
        period = %period,
        requested = %current,
        using = %interval,
        "interval not valid for period; reconciled"
    );
    Reconciliation {
        interval,
        replaced: Some(current),
    }
}

/// [`reconcile_on`] with today's date in `tz`, returning only the interval.
#[must_use]
pub fn reconcile(period: Period, current: Interval, tz: Tz) -> Interval {
    reconcile_on(period, current, today_in(tz)).interval
}
