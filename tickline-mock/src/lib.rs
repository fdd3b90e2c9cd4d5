//! Deterministic stand-in for the market-data backend.
//!
//! Serves row payloads in the same shape the backend produces (field to
//! date-key to value) so ingestion, indicators and stitching can be exercised
//! without a network. Special symbols:
//!
//! - `FAIL` always returns a data error.
//! - `EMPTY` returns a payload with no rows.
//! - `RAGGED` returns rows with null closes and an unparseable date-key.
//! - Anything not listed is `NotFound`.
use chrono::NaiveDate;
use tickline_core::{FieldRows, Interval, Period, RawPayload, RawRows, TicklineError};

mod fixtures;

/// Mock backend for CI-safe tests and demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackend;

/// Number of daily bars served for the default daily symbols.
pub const DAILY_BARS: usize = 30;
/// Number of intraday bars served for one session.
pub const INTRADAY_BARS: usize = 24;

impl MockBackend {
    /// New mock backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Symbols with history fixtures.
    #[must_use]
    pub const fn symbols() -> &'static [&'static str] {
        &["AAPL", "MSFT", "TSLA", "EMPTY", "RAGGED"]
    }

    /// History rows for `symbol`. Intraday intervals yield a single session on
    /// 2024-03-15 in `interval` steps; every other interval yields daily bars.
    ///
    /// # Errors
    /// `Data` for the `FAIL` symbol and `NotFound` for unknown symbols.
    pub fn rows(
        &self,
        symbol: &str,
        _period: Period,
        interval: Interval,
    ) -> Result<RawRows, TicklineError> {
        let base = match symbol {
            "FAIL" => return Err(TicklineError::data("forced failure: history")),
            "EMPTY" => return Ok(RawRows::new()),
            "RAGGED" => return Ok(fixtures::history::ragged()),
            "AAPL" => 185.0,
            "MSFT" => 370.0,
            "TSLA" => 248.0,
            _ => return Err(TicklineError::not_found(format!("history for {symbol}"))),
        };
        if interval.is_intraday() {
            Ok(fixtures::history::intraday(base, interval, INTRADAY_BARS))
        } else {
            Ok(fixtures::history::daily(base, DAILY_BARS))
        }
    }

    /// Ticker-wrapped payload for several symbols. Unknown symbols are skipped.
    ///
    /// # Errors
    /// Propagates the `FAIL` error.
    pub fn payload(
        &self,
        symbols: &[&str],
        period: Period,
        interval: Interval,
    ) -> Result<RawPayload, TicklineError> {
        let mut payload = RawPayload::default();
        for symbol in symbols {
            match self.rows(symbol, period, interval) {
                Ok(rows) => payload.insert(symbol, rows),
                Err(TicklineError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(payload)
    }

    /// Serialized form of [`MockBackend::payload`], as the backend would send it.
    ///
    /// # Errors
    /// Propagates the `FAIL` error.
    pub fn payload_json(
        &self,
        symbols: &[&str],
        period: Period,
        interval: Interval,
    ) -> Result<String, TicklineError> {
        let payload = self.payload(symbols, period, interval)?;
        serde_json::to_string(&payload).map_err(TicklineError::from)
    }

    /// Five daily predicted closes following the daily fixture for `symbol`.
    /// The third slot is null.
    ///
    /// # Errors
    /// `NotFound` for symbols without a daily fixture.
    pub fn forecast(&self, symbol: &str) -> Result<FieldRows, TicklineError> {
        let rows = self.rows(symbol, Period::M3, Interval::D1)?;
        let last = rows
            .field("close")
            .and_then(|c| c.keys().next_back())
            .and_then(|k| NaiveDate::parse_from_str(k.get(..10)?, "%Y-%m-%d").ok())
            .ok_or_else(|| TicklineError::not_found(format!("forecast for {symbol}")))?;
        let anchor = rows
            .field("close")
            .and_then(|c| c.values().next_back().copied().flatten())
            .unwrap_or_default();
        let values: Vec<f64> = (1..=5).map(|i| anchor + f64::from(i) * 0.75).collect();
        Ok(fixtures::forecast::daily_after(last, &values, Some(2)))
    }
}
