use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tickline workspace.
///
/// Most of the pipeline degrades instead of failing: indicators return empty
/// output on short input and the time normalizer returns a sentinel. The variants
/// below cover the paths that do surface to the caller.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TicklineError {
    /// A timestamp could not be parsed or is outside the representable range.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A stitched series contains a duplicate or out-of-order timestamp.
    ///
    /// This indicates a logic defect on the merge path, never a data-quality issue.
    #[error("merge integrity violation: timestamp {time} follows {previous}")]
    MergeIntegrity {
        /// Timestamp that is not strictly greater than its predecessor.
        time: i64,
        /// Timestamp of the preceding point.
        previous: i64,
    },

    /// Issues with the supplied payload or series (malformed JSON, unsorted points).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument or configuration value.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "rows for AAPL".
        what: String,
    },
}

impl TicklineError {
    /// Helper: build a `Data` error.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build an `InvalidTimestamp` error from the offending input.
    pub fn invalid_timestamp(raw: impl Into<String>) -> Self {
        Self::InvalidTimestamp(raw.into())
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Returns true if the error points at a defect in the pipeline itself rather
    /// than at the data or arguments handed to it.
    #[must_use]
    pub const fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::MergeIntegrity { .. })
    }
}

impl From<serde_json::Error> for TicklineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Data(err.to_string())
    }
}
