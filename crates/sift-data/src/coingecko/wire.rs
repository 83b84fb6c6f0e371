//! CoinGecko response shapes.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One entry of `/coins/markets`.
#[derive(Debug, Deserialize)]
pub(crate) struct MarketRow {
    pub(crate) id: String,
    pub(crate) symbol: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) current_price: Option<f64>,
    pub(crate) market_cap: Option<f64>,
    pub(crate) total_volume: Option<f64>,
    pub(crate) high_24h: Option<f64>,
    pub(crate) low_24h: Option<f64>,
    pub(crate) price_change_24h: Option<f64>,
    pub(crate) last_updated: Option<DateTime<Utc>>,
}

/// `/coins/{id}/ohlc` candle: `[time_ms, open, high, low, close]`.
pub(crate) type OhlcRow = (f64, f64, f64, f64, f64);
