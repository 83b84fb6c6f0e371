//! Error and exclusion types for screening runs.

use crate::criteria::Filter;
use serde::{Deserialize, Serialize};
use sift_data::{DataError, Symbol};
use thiserror::Error;

/// Result type for screening operations.
pub type Result<T> = std::result::Result<T, ScreenError>;

/// Errors that abort a screening run.
///
/// Per-symbol problems never surface here; they become [`Exclusion`]s.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The screener is missing a source the criteria need, or options are
    /// invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The universe could not be fetched
    #[error("Failed to fetch universe: {0}")]
    Universe(#[source] DataError),

    /// Nothing to screen
    #[error("Universe is empty")]
    EmptyUniverse,

    /// A single-symbol lookup found no data
    #[error("No data for {0}")]
    NotFound(Symbol),

    /// A single-symbol lookup failed
    #[error("Failed to fetch {symbol}: {source}")]
    Fetch {
        /// Symbol being looked up
        symbol: Symbol,
        /// Underlying data error
        source: DataError,
    },
}

/// Why a symbol was dropped from a run.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// The quote source had no quote
    #[error("no quote available")]
    NoQuote,

    /// A fetch failed or returned a malformed response
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// A derived metric divides by zero (open price of 0)
    #[error("derived metric undefined (zero denominator)")]
    DivisionUndefined,

    /// One or more active filters rejected the record
    #[error("failed {}", describe(.0))]
    FailedCriteria(Vec<Filter>),
}

fn describe(filters: &[Filter]) -> String {
    filters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ExclusionReason {
    /// Short label used when tallying exclusions.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoQuote => "no_quote",
            Self::FetchFailed(_) => "fetch_failed",
            Self::DivisionUndefined => "division_undefined",
            Self::FailedCriteria(_) => "failed_criteria",
        }
    }
}

/// Diagnostic record for a symbol dropped from a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    /// Dropped symbol
    pub symbol: Symbol,
    /// Why it was dropped
    pub reason: ExclusionReason,
}

impl Exclusion {
    /// Create a new exclusion.
    pub const fn new(symbol: Symbol, reason: ExclusionReason) -> Self {
        Self { symbol, reason }
    }
}
