//! Historical windows and sampling granularities shared with the fetch layer.
//!
//! Both enums are a closed contract: the string forms are exactly what the backend
//! accepts, and adding a variant must go together with an update of the
//! period/interval compatibility table in `tickline-core`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TicklineError;

/// Historical window requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    /// One trading day.
    #[serde(rename = "1d")]
    D1,
    /// Five trading days.
    #[serde(rename = "5d")]
    D5,
    /// One month.
    #[serde(rename = "1mo")]
    M1,
    /// Three months.
    #[serde(rename = "3mo")]
    M3,
    /// Six months.
    #[serde(rename = "6mo")]
    M6,
    /// One year.
    #[serde(rename = "1y")]
    Y1,
    /// Two years.
    #[serde(rename = "2y")]
    Y2,
    /// Five years.
    #[serde(rename = "5y")]
    Y5,
    /// Ten years.
    #[serde(rename = "10y")]
    Y10,
    /// Year to date.
    #[serde(rename = "ytd")]
    Ytd,
    /// Full available history.
    #[serde(rename = "max")]
    Max,
}

impl Period {
    /// Every period, in display order.
    pub const ALL: [Self; 11] = [
        Self::D1,
        Self::D5,
        Self::M1,
        Self::M3,
        Self::M6,
        Self::Y1,
        Self::Y2,
        Self::Y5,
        Self::Y10,
        Self::Ytd,
        Self::Max,
    ];

    /// Wire form of the period (`"1d"`, `"ytd"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::D1 => "1d",
            Self::D5 => "5d",
            Self::M1 => "1mo",
            Self::M3 => "3mo",
            Self::M6 => "6mo",
            Self::Y1 => "1y",
            Self::Y2 => "2y",
            Self::Y5 => "5y",
            Self::Y10 => "10y",
            Self::Ytd => "ytd",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = TicklineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| TicklineError::invalid_arg(format!("unknown period '{s}'")))
    }
}

/// Sampling granularity of the bars requested from the backend.
///
/// Variants are declared finest first, so the derived ordering sorts by bar width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Interval {
    /// One minute.
    #[serde(rename = "1m")]
    I1m,
    /// Five minutes.
    #[serde(rename = "5m")]
    I5m,
    /// Fifteen minutes.
    #[serde(rename = "15m")]
    I15m,
    /// Thirty minutes.
    #[serde(rename = "30m")]
    I30m,
    /// One hour.
    #[serde(rename = "1h")]
    H1,
    /// One day.
    #[serde(rename = "1d")]
    D1,
    /// One week.
    #[serde(rename = "1wk")]
    W1,
    /// One month.
    #[serde(rename = "1mo")]
    Mo1,
}

impl Interval {
    /// Every interval, finest first.
    pub const ALL: [Self; 8] = [
        Self::I1m,
        Self::I5m,
        Self::I15m,
        Self::I30m,
        Self::H1,
        Self::D1,
        Self::W1,
        Self::Mo1,
    ];

    /// Wire form of the interval (`"1m"`, `"1wk"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::I1m => "1m",
            Self::I5m => "5m",
            Self::I15m => "15m",
            Self::I30m => "30m",
            Self::H1 => "1h",
            Self::D1 => "1d",
            Self::W1 => "1wk",
            Self::Mo1 => "1mo",
        }
    }

    /// Whether bars at this interval fall within a single trading day.
    ///
    /// Charts show the time of day on the axis only for intraday intervals.
    #[must_use]
    pub const fn is_intraday(self) -> bool {
        matches!(
            self,
            Self::I1m | Self::I5m | Self::I15m | Self::I30m | Self::H1
        )
    }

    /// Nominal bar width in seconds. Months count as 30 days.
    #[must_use]
    pub const fn nominal_seconds(self) -> i64 {
        match self {
            Self::I1m => 60,
            Self::I5m => 300,
            Self::I15m => 900,
            Self::I30m => 1_800,
            Self::H1 => 3_600,
            Self::D1 => 86_400,
            Self::W1 => 604_800,
            Self::Mo1 => 2_592_000,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = TicklineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| TicklineError::invalid_arg(format!("unknown interval '{s}'")))
    }
}
