//! Shared helpers for series invariants.

use crate::TicklineError;
use crate::series::PricePoint;

/// Ensure timestamps are strictly increasing (hence unique).
///
/// # Errors
/// Returns `Err(TicklineError::MergeIntegrity)` naming the first timestamp that
/// does not exceed its predecessor.
pub fn ensure_strictly_ascending(points: &[PricePoint]) -> Result<(), TicklineError> {
    match points.windows(2).find(|w| w[1].time <= w[0].time) {
        Some(w) => Err(TicklineError::MergeIntegrity {
            time: w[1].time,
            previous: w[0].time,
        }),
        None => Ok(()),
    }
}
