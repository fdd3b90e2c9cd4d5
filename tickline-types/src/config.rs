//! Configuration types passed explicitly into the pipeline.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{IndicatorKind, TicklineError};

/// Parameters of the forecast stitching heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StitchConfig {
    /// A bridge point is inserted when the first forecast point lies strictly more
    /// than this many seconds after the last historical point.
    pub gap_threshold_secs: i64,
    /// Offset of the bridge point from the last historical point, in seconds.
    pub bridge_offset_secs: i64,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            gap_threshold_secs: 300,
            bridge_offset_secs: 60,
        }
    }
}

/// Default indicator parameters used by chart overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDefaults {
    /// SMA window.
    pub sma_period: usize,
    /// EMA window.
    pub ema_period: usize,
    /// RSI window.
    pub rsi_period: usize,
    /// Bollinger window.
    pub bollinger_period: usize,
    /// Bollinger band width in standard deviations.
    pub bollinger_multiplier: f64,
}

impl Default for IndicatorDefaults {
    fn default() -> Self {
        Self {
            sma_period: 20,
            ema_period: 20,
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_multiplier: 2.0,
        }
    }
}

impl IndicatorDefaults {
    /// Parameterized kinds in overlay order: SMA, EMA, Bollinger, RSI.
    #[must_use]
    pub const fn kinds(&self) -> [IndicatorKind; 4] {
        [
            IndicatorKind::Sma {
                period: self.sma_period,
            },
            IndicatorKind::Ema {
                period: self.ema_period,
            },
            IndicatorKind::Bollinger {
                period: self.bollinger_period,
                multiplier: self.bollinger_multiplier,
            },
            IndicatorKind::Rsi {
                period: self.rsi_period,
            },
        ]
    }
}

/// Sizing of the indicator memoization cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoConfig {
    /// Maximum number of indicator outputs kept. Zero disables memoization.
    pub max_entries: usize,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self { max_entries: 64 }
    }
}

/// Global configuration for a `Tickline` pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicklineConfig {
    /// Timezone whose wall-clock time canonical timestamps encode.
    pub exchange_timezone: Tz,
    /// Forecast stitching parameters.
    pub stitch: StitchConfig,
    /// Default overlay parameters.
    pub indicators: IndicatorDefaults,
    /// Memoization cache sizing.
    pub memo: MemoConfig,
}

impl Default for TicklineConfig {
    fn default() -> Self {
        Self {
            exchange_timezone: chrono_tz::America::New_York,
            stitch: StitchConfig::default(),
            indicators: IndicatorDefaults::default(),
            memo: MemoConfig::default(),
        }
    }
}

impl TicklineConfig {
    /// Check that every parameter is usable.
    ///
    /// # Errors
    /// Returns `TicklineError::InvalidArg` for zero indicator periods, a
    /// non-finite or negative Bollinger multiplier, or negative stitch offsets.
    pub fn validate(&self) -> Result<(), TicklineError> {
        for kind in self.indicators.kinds() {
            if kind.period() == 0 {
                return Err(TicklineError::invalid_arg(format!(
                    "{} period must be positive",
                    kind.label()
                )));
            }
        }
        let m = self.indicators.bollinger_multiplier;
        if !m.is_finite() || m < 0.0 {
            return Err(TicklineError::invalid_arg(format!(
                "bollinger multiplier must be finite and non-negative, got {m}"
            )));
        }
        if self.stitch.gap_threshold_secs < 0 {
            return Err(TicklineError::invalid_arg(
                "stitch gap threshold must be non-negative",
            ));
        }
        if self.stitch.bridge_offset_secs <= 0 {
            return Err(TicklineError::invalid_arg(
                "bridge offset must be positive",
            ));
        }
        Ok(())
    }
}
