//! Shared tickline data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod indicator;
mod period;

pub use config::{IndicatorDefaults, MemoConfig, StitchConfig, TicklineConfig};
pub use error::TicklineError;
pub use indicator::{IndicatorKind, IndicatorSet};
pub use period::{Interval, Period};
