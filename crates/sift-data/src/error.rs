//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while talking to a market data source.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status} while fetching {context}")]
    Http {
        /// HTTP status code returned by the vendor
        status: u16,
        /// What was being fetched
        context: String,
    },

    /// Vendor reported an error in an otherwise successful response
    #[error("API error: {0}")]
    Api(String),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Expected field absent from a successful response
    #[error("Missing field `{field}` for {symbol}")]
    MissingField {
        /// Symbol that was queried
        symbol: String,
        /// Name of the absent field
        field: String,
    },

    /// Required credential is not configured
    #[error("Missing credential: set the {0} environment variable")]
    MissingCredential(String),

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Invalid date range
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start of the range
        start: String,
        /// End of the range
        end: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Whether the error is a per-request fetch failure that a caller may
    /// recover from by skipping the affected symbol.
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Http { .. } | Self::Api(_) | Self::Parse(_) | Self::Serialization(_)
        )
    }

    /// Whether the error means the source cannot be used at all.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential(_))
    }
}
