use chrono::{Duration, NaiveDate};
use tickline_core::FieldRows;

/// Daily predicted closes after `last_day`, keyed by plain dates.
///
/// Slot `null_at` (if any) is left null the way a failed prediction arrives.
pub fn daily_after(last_day: NaiveDate, values: &[f64], null_at: Option<usize>) -> FieldRows {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let day = last_day + Duration::days(i64::try_from(i).unwrap_or(0) + 1);
            let key = format!("{} 00:00:00-05:00", day.format("%Y-%m-%d"));
            (key, (Some(i) != null_at).then_some(*v))
        })
        .collect()
}
