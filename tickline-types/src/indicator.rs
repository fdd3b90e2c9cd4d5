//! Indicator identities and the user-facing indicator selection.

use core::fmt;
use core::hash::{Hash, Hasher};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of indicators the user has switched on for a chart.
    ///
    /// The empty set is the reset state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct IndicatorSet: u8 {
        /// Simple moving average overlay.
        const SMA = 1 << 0;
        /// Exponential moving average overlay.
        const EMA = 1 << 1;
        /// Relative strength index pane.
        const RSI = 1 << 2;
        /// Bollinger bands overlay.
        const BOLLINGER = 1 << 3;
    }
}

impl IndicatorSet {
    /// Flip one or more indicators on or off.
    pub fn toggle_indicator(&mut self, which: Self) {
        self.toggle(which);
    }

    /// Switch every indicator off.
    pub fn reset(&mut self) {
        *self = Self::empty();
    }
}

/// A parameterized indicator.
///
/// Used both to dispatch computation and as part of the memoization key, so two
/// kinds are equal only if every parameter is equal (multipliers are compared
/// bit-for-bit).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorKind {
    /// Simple moving average over `period` points.
    Sma {
        /// Window length.
        period: usize,
    },
    /// Exponential moving average seeded with the SMA of the first `period` points.
    Ema {
        /// Window length.
        period: usize,
    },
    /// Relative strength index with Wilder smoothing.
    Rsi {
        /// Number of differences per average.
        period: usize,
    },
    /// Bollinger bands: trailing mean plus/minus `multiplier` population std-devs.
    Bollinger {
        /// Window length.
        period: usize,
        /// Band width in standard deviations.
        multiplier: f64,
    },
}

impl IndicatorKind {
    /// The flag that selects this kind of indicator.
    #[must_use]
    pub const fn flag(&self) -> IndicatorSet {
        match self {
            Self::Sma { .. } => IndicatorSet::SMA,
            Self::Ema { .. } => IndicatorSet::EMA,
            Self::Rsi { .. } => IndicatorSet::RSI,
            Self::Bollinger { .. } => IndicatorSet::BOLLINGER,
        }
    }

    /// Window length of the indicator.
    #[must_use]
    pub const fn period(&self) -> usize {
        match *self {
            Self::Sma { period }
            | Self::Ema { period }
            | Self::Rsi { period }
            | Self::Bollinger { period, .. } => period,
        }
    }

    /// Minimum number of input points before the indicator yields any output.
    #[must_use]
    pub const fn min_points(&self) -> usize {
        match self {
            Self::Rsi { period } => period.saturating_add(1),
            _ => self.period(),
        }
    }

    /// Short stable label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sma { .. } => "sma",
            Self::Ema { .. } => "ema",
            Self::Rsi { .. } => "rsi",
            Self::Bollinger { .. } => "bollinger",
        }
    }
}

impl PartialEq for IndicatorKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Sma { period: a }, Self::Sma { period: b })
            | (Self::Ema { period: a }, Self::Ema { period: b })
            | (Self::Rsi { period: a }, Self::Rsi { period: b }) => a == b,
            (
                Self::Bollinger {
                    period: a,
                    multiplier: am,
                },
                Self::Bollinger {
                    period: b,
                    multiplier: bm,
                },
            ) => a == b && am.to_bits() == bm.to_bits(),
            _ => false,
        }
    }
}

impl Eq for IndicatorKind {}

impl Hash for IndicatorKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        self.period().hash(state);
        if let Self::Bollinger { multiplier, .. } = self {
            multiplier.to_bits().hash(state);
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bollinger { period, multiplier } => {
                write!(f, "{}({period}, {multiplier})", self.label())
            }
            _ => write!(f, "{}({})", self.label(), self.period()),
        }
    }
}
