//! Re-export of foundational types from `tickline-types`.
// Consolidated re-exports so downstream crates can depend on `tickline-core` only

pub use tickline_types::TicklineError;
pub use tickline_types::{IndicatorDefaults, MemoConfig, StitchConfig, TicklineConfig};
pub use tickline_types::{IndicatorKind, IndicatorSet, Interval, Period};

pub use chrono_tz::Tz;
