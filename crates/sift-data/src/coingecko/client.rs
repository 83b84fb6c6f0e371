//! CoinGecko REST client with rate limiting.

use super::wire::{MarketRow, OhlcRow};
use crate::config;
use crate::error::{DataError, Result};
use crate::http::HttpClient;
use crate::model::{OhlcBar, Quote, Symbol, TickerDetails, TickerInfo, TickerQuery};
use crate::source::{QuoteSource, ReferenceSource, TickerSource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// CoinGecko public API base URL
const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying a demo-plan API key.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Largest page `/coins/markets` serves.
const MAX_PAGE_SIZE: usize = 250;

/// Default rate limit: the public tier tolerates about one call every two
/// seconds
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_secs(2);

/// CoinGecko client serving the coin universe, quotes and OHLC history.
pub struct CoinGeckoClient {
    http: HttpClient,
    api_key: Option<String>,
    base_url: String,
    vs_currency: String,
}

impl CoinGeckoClient {
    /// Create a keyless client with the default rate limit.
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(None, DEFAULT_RATE_LIMIT)
    }

    /// Create a client, attaching `COINGECKO_API_KEY` when it is set.
    pub fn from_env(min_interval: Duration) -> Result<Self> {
        Self::with_rate_limit(config::optional(config::COINGECKO_API_KEY), min_interval)
    }

    /// Create a client with an optional key and a custom interval.
    pub fn with_rate_limit(api_key: Option<String>, min_interval: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(min_interval)?,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: COINGECKO_BASE_URL.to_string(),
            vs_currency: "usd".to_string(),
        })
    }

    /// Point the client at a different host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Quote prices in a different currency (default `usd`).
    pub fn with_vs_currency(mut self, currency: impl Into<String>) -> Self {
        self.vs_currency = currency.into().to_lowercase();
        self
    }

    /// Minimum interval between requests.
    pub fn rate_limit(&self) -> Duration {
        self.http.min_interval()
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        self.api_key
            .iter()
            .map(|key| (API_KEY_HEADER, key.clone()))
            .collect()
    }

    async fn markets(&self, params: &[(&str, String)], context: &str) -> Result<Vec<MarketRow>> {
        let url = format!("{}/coins/markets", self.base_url);
        let rows: Option<Vec<MarketRow>> = self
            .http
            .get_json(&url, params, &self.headers(), context)
            .await?;
        Ok(rows.unwrap_or_default())
    }

    async fn market(&self, coin: &Symbol) -> Result<Option<MarketRow>> {
        if coin.is_empty() {
            return Err(DataError::InvalidSymbol("Empty coin id".to_string()));
        }
        let params = [
            ("vs_currency", self.vs_currency.clone()),
            ("ids", coin.as_str().to_string()),
        ];
        let rows = self.markets(&params, &format!("market for {}", coin)).await?;
        Ok(rows.into_iter().find(|row| row.id == coin.as_str()))
    }

    /// Top coins by market capitalization.
    ///
    /// Pages through `/coins/markets` until `query.max_results` accepted coins
    /// are collected or a short page signals the end of the listing.
    pub async fn top_coins(&self, query: &TickerQuery) -> Result<Vec<TickerInfo>> {
        let cap = query.max_results.min(TickerQuery::MAX_UNIVERSE);
        let per_page = cap.clamp(1, MAX_PAGE_SIZE);
        let mut coins = Vec::new();
        let mut page = 1usize;

        while coins.len() < cap {
            let params = [
                ("vs_currency", self.vs_currency.clone()),
                ("order", "market_cap_desc".to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ];
            let rows = self.markets(&params, &format!("coin page {}", page)).await?;
            let fetched = rows.len();

            for row in rows {
                let info = TickerInfo {
                    symbol: Symbol::new(row.id),
                    name: row.name,
                    market: Some("crypto".to_string()),
                    ticker_type: row.symbol,
                    active: true,
                    market_cap: row.market_cap,
                };
                if query.accepts(&info) {
                    coins.push(info);
                }
            }

            if fetched < per_page {
                break;
            }
            page += 1;
        }

        coins.truncate(cap);
        tracing::debug!(count = coins.len(), pages = page, "listed coins");
        Ok(coins)
    }

    /// Current market snapshot as a quote.
    ///
    /// The feed has no session open, so `open` is reconstructed as
    /// `price - price_change_24h`, making the derived change the 24h change.
    pub async fn quote(&self, coin: &Symbol) -> Result<Option<Quote>> {
        let Some(row) = self.market(coin).await? else {
            return Ok(None);
        };

        let missing = |field: &str| DataError::MissingField {
            symbol: coin.to_string(),
            field: field.to_string(),
        };
        let Some(price) = row.current_price else {
            return Ok(None);
        };
        let change = row.price_change_24h.ok_or_else(|| missing("price_change_24h"))?;
        let open = price - change;

        Ok(Some(Quote {
            symbol: coin.clone(),
            price,
            open,
            high: row.high_24h,
            low: row.low_24h,
            volume: row.total_volume,
            timestamp: row.last_updated.unwrap_or_else(Utc::now),
        }))
    }

    /// Name and market capitalization of a coin.
    pub async fn coin_details(&self, coin: &Symbol) -> Result<Option<TickerDetails>> {
        Ok(self.market(coin).await?.map(|row| TickerDetails {
            symbol: coin.clone(),
            name: row.name,
            market_cap: row.market_cap,
            ..TickerDetails::default()
        }))
    }

    /// OHLC candles for the trailing `days` days, oldest first.
    pub async fn ohlc(&self, coin: &Symbol, days: u32) -> Result<Vec<OhlcBar>> {
        if coin.is_empty() {
            return Err(DataError::InvalidSymbol("Empty coin id".to_string()));
        }

        let url = format!("{}/coins/{}/ohlc", self.base_url, coin);
        let params = [
            ("vs_currency", self.vs_currency.clone()),
            ("days", days.to_string()),
        ];
        let rows: Option<Vec<OhlcRow>> = self
            .http
            .get_json(&url, &params, &self.headers(), &format!("ohlc for {}", coin))
            .await?;

        rows.unwrap_or_default()
            .into_iter()
            .map(|(millis, open, high, low, close)| {
                let timestamp = DateTime::from_timestamp_millis(millis as i64).ok_or_else(|| {
                    DataError::Parse(format!("invalid candle time {} for {}", millis, coin))
                })?;
                Ok(OhlcBar {
                    timestamp,
                    open,
                    high,
                    low,
                    close,
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for CoinGeckoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinGeckoClient")
            .field("base_url", &self.base_url)
            .field("vs_currency", &self.vs_currency)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TickerSource for CoinGeckoClient {
    async fn list_tickers(&self, query: &TickerQuery) -> Result<Vec<TickerInfo>> {
        self.top_coins(query).await
    }
}

#[async_trait]
impl QuoteSource for CoinGeckoClient {
    async fn get_quote(&self, symbol: &Symbol) -> Result<Option<Quote>> {
        self.quote(symbol).await
    }
}

#[async_trait]
impl ReferenceSource for CoinGeckoClient {
    async fn get_details(&self, symbol: &Symbol) -> Result<Option<TickerDetails>> {
        self.coin_details(symbol).await
    }
}
