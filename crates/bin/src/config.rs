//! Client construction from credentials and pacing settings.

use clap::Args;
use sift_data::{CoinGeckoClient, EodhdClient, PolygonClient};
use std::time::Duration;

/// Minimum delay between requests to each vendor.
#[derive(Debug, Clone, Args)]
pub(crate) struct ClientArgs {
    /// Minimum milliseconds between Polygon requests
    #[arg(long, env = "SIFT_POLYGON_INTERVAL_MS", default_value_t = 120, global = true)]
    polygon_interval_ms: u64,

    /// Minimum milliseconds between EODHD requests
    #[arg(long, env = "SIFT_EODHD_INTERVAL_MS", default_value_t = 100, global = true)]
    eodhd_interval_ms: u64,

    /// Minimum milliseconds between CoinGecko requests
    #[arg(long, env = "SIFT_COINGECKO_INTERVAL_MS", default_value_t = 2000, global = true)]
    coingecko_interval_ms: u64,
}

impl ClientArgs {
    /// Polygon client keyed by `POLYGON_API_KEY`.
    pub(crate) fn polygon(&self) -> sift_data::Result<PolygonClient> {
        PolygonClient::from_env(Duration::from_millis(self.polygon_interval_ms))
    }

    /// EODHD client keyed by `EODHD_API_KEY`.
    pub(crate) fn eodhd(&self) -> sift_data::Result<EodhdClient> {
        EodhdClient::from_env(Duration::from_millis(self.eodhd_interval_ms))
    }

    /// CoinGecko client, with `COINGECKO_API_KEY` when set.
    pub(crate) fn coingecko(&self) -> sift_data::Result<CoinGeckoClient> {
        CoinGeckoClient::from_env(Duration::from_millis(self.coingecko_interval_ms))
    }
}

/// Load `.env` from the working directory, if present.
///
/// Runs before argument parsing so `env` fallbacks see the file's values.
pub(crate) fn load_dotenv() -> Option<dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(e),
    }
}
