//! Technical indicators over a canonical price series.
//!
//! Every function is pure and expects points sorted ascending by time. Outputs are
//! aligned to the input timestamps starting at the first point with enough
//! history. Too little input (or a zero period) yields an empty vector rather than
//! an error.

use crate::series::{BandPoint, IndicatorOutput, IndicatorPoint, PricePoint};
use tickline_types::IndicatorKind;

#[allow(clippy::cast_precision_loss)]
fn mean(window: &[PricePoint]) -> f64 {
    window.iter().map(|p| p.value).sum::<f64>() / window.len() as f64
}

/// Simple moving average.
///
/// Output `i` is the mean close over the trailing `period` points ending at input
/// `i + period - 1`, stamped with that point's time. Each window is summed on its
/// own, so no rounding error carries from one output to the next.
#[must_use]
pub fn sma(points: &[PricePoint], period: usize) -> Vec<IndicatorPoint> {
    if period == 0 || points.len() < period {
        return Vec::new();
    }
    points
        .windows(period)
        .map(|w| IndicatorPoint {
            time: w[period - 1].time,
            value: mean(w),
        })
        .collect()
}

/// Exponential moving average.
///
/// Seeded with the SMA of the first `period` closes at `time[period - 1]`, then
/// `ema[i] = close[i] * k + ema[i - 1] * (1 - k)` with `k = 2 / (period + 1)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ema(points: &[PricePoint], period: usize) -> Vec<IndicatorPoint> {
    if period == 0 || points.len() < period {
        return Vec::new();
    }
    let k = 2.0 / (period as f64 + 1.0);
    let seed = IndicatorPoint {
        time: points[period - 1].time,
        value: mean(&points[..period]),
    };

    let mut out = Vec::with_capacity(points.len() - period + 1);
    out.push(seed);
    let mut prev = seed.value;
    for p in &points[period..] {
        prev = p.value * k + prev * (1.0 - k);
        out.push(IndicatorPoint {
            time: p.time,
            value: prev,
        });
    }
    out
}

/// Relative strength index with Wilder smoothing.
///
/// The first value averages gains and losses over the first `period` differences
/// and is stamped at `time[period]`. A zero average loss is replaced by 1 when
/// forming `RS = avg_gain / avg_loss`; with only gains RSI is therefore
/// `100 - 100 / (1 + avg_gain)` rather than exactly 100.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rsi(points: &[PricePoint], period: usize) -> Vec<IndicatorPoint> {
    if period == 0 || points.len() < period + 1 {
        return Vec::new();
    }
    let n = period as f64;
    let diff = |i: usize| points[i].value - points[i - 1].value;
    let rsi_of = |avg_gain: f64, avg_loss: f64| {
        let denom = if avg_loss == 0.0 { 1.0 } else { avg_loss };
        100.0 - 100.0 / (1.0 + avg_gain / denom)
    };

    let (mut gain, mut loss) = (0.0_f64, 0.0_f64);
    for i in 1..=period {
        let d = diff(i);
        if d > 0.0 {
            gain += d;
        } else {
            loss += d.abs();
        }
    }
    let mut avg_gain = gain / n;
    let mut avg_loss = loss / n;

    let mut out = Vec::with_capacity(points.len() - period);
    out.push(IndicatorPoint {
        time: points[period].time,
        value: rsi_of(avg_gain, avg_loss),
    });
    for i in period + 1..points.len() {
        let d = diff(i);
        avg_gain = (avg_gain * (n - 1.0) + d.max(0.0)) / n;
        avg_loss = (avg_loss * (n - 1.0) + (-d).max(0.0)) / n;
        out.push(IndicatorPoint {
            time: points[i].time,
            value: rsi_of(avg_gain, avg_loss),
        });
    }
    out
}

/// Bollinger bands: trailing mean and population standard deviation.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bollinger_bands(points: &[PricePoint], period: usize, multiplier: f64) -> Vec<BandPoint> {
    if period == 0 || points.len() < period {
        return Vec::new();
    }
    points
        .windows(period)
        .map(|w| {
            let middle = mean(w);
            let variance = w.iter().map(|p| (p.value - middle).powi(2)).sum::<f64>() / period as f64;
            let width = multiplier * variance.sqrt();
            BandPoint {
                time: w[period - 1].time,
                upper: middle + width,
                middle,
                lower: middle - width,
            }
        })
        .collect()
}

/// Compute any indicator by kind.
#[must_use]
pub fn compute(points: &[PricePoint], kind: IndicatorKind) -> IndicatorOutput {
    match kind {
        IndicatorKind::Sma { period } => IndicatorOutput::Line(sma(points, period)),
        IndicatorKind::Ema { period } => IndicatorOutput::Line(ema(points, period)),
        IndicatorKind::Rsi { period } => IndicatorOutput::Line(rsi(points, period)),
        IndicatorKind::Bollinger { period, multiplier } => {
            IndicatorOutput::Bands(bollinger_bands(points, period, multiplier))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<PricePoint> {
        (0_i64..)
            .zip(values)
            .map(|(i, v)| PricePoint::close(1_000 + i * 60, *v))
            .collect()
    }

    #[test]
    fn zero_period_is_empty() {
        let pts = series(&[1.0, 2.0, 3.0]);
        assert!(sma(&pts, 0).is_empty());
        assert!(ema(&pts, 0).is_empty());
        assert!(rsi(&pts, 0).is_empty());
        assert!(bollinger_bands(&pts, 0, 2.0).is_empty());
    }

    #[test]
    fn rsi_mixed_moves() {
        // diffs: +2, -1, +2, -1 ; period 2
        let pts = series(&[10.0, 12.0, 11.0, 13.0, 12.0]);
        let out = rsi(&pts, 2);
        assert_eq!(out.len(), 3);
        // first: gain 2/2=1, loss 1/2=0.5 -> rs 2 -> 66.67
        assert!((out[0].value - (100.0 - 100.0 / 3.0)).abs() < 1e-9);
        assert_eq!(out[0].time, pts[2].time);
        // second: gain (1*1+2)/2=1.5, loss (0.5*1+0)/2=0.25 -> rs 6
        assert!((out[1].value - (100.0 - 100.0 / 7.0)).abs() < 1e-9);
    }

    #[test]
    fn compute_dispatches_by_kind() {
        let pts = series(&[1.0, 2.0, 3.0, 4.0]);
        let out = compute(&pts, IndicatorKind::Bollinger { period: 2, multiplier: 1.0 });
        assert_eq!(out.as_bands().map(<[BandPoint]>::len), Some(3));
        let out = compute(&pts, IndicatorKind::Sma { period: 2 });
        assert_eq!(out.as_line().map(|l| l[0].value), Some(1.5));
    }
}
