//! Credential loading.
//!
//! Credentials are read from the environment (optionally populated from a
//! `.env` file by the binary). A missing credential is a configuration
//! error raised before any request is made; there are no built-in fallback
//! keys.

use crate::error::{DataError, Result};
use std::env;

/// Environment variable holding the Polygon.io API key.
pub const POLYGON_API_KEY: &str = "POLYGON_API_KEY";

/// Environment variable holding the EODHD API token.
pub const EODHD_API_KEY: &str = "EODHD_API_KEY";

/// Environment variable holding an optional CoinGecko demo API key.
pub const COINGECKO_API_KEY: &str = "COINGECKO_API_KEY";

/// Read a required credential.
///
/// # Errors
/// Returns `DataError::MissingCredential` when the variable is unset or
/// blank.
pub fn require(var: &str) -> Result<String> {
    optional(var).ok_or_else(|| DataError::MissingCredential(var.to_string()))
}

/// Read an optional credential, treating blank values as unset.
pub fn optional(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
