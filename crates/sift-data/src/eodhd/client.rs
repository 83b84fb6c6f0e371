//! EODHD REST client with rate limiting.

use super::wire::{EodRow, FundamentalsResponse, IntradayResponse, ScreenerResponse};
use crate::config;
use crate::error::{DataError, Result};
use crate::http::HttpClient;
use crate::model::{BarInterval, GainerCandidate, GainerQuery, Quote, Symbol, VolumeBar};
use crate::source::{FundamentalsSource, GainersSource, QuoteSource, VolumeSource};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde_json::{Value, json};
use std::time::Duration;

/// EODHD API base URL
const EODHD_BASE_URL: &str = "https://eodhd.com/api";

/// Exchange suffix appended to US tickers.
const US_SUFFIX: &str = "US";

/// Default rate limit: 10 requests per second
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// How far back the end-of-day quote request reaches to cover weekends and
/// holidays.
const EOD_LOOKBACK_DAYS: i64 = 10;

/// EODHD client serving gainers, float shares, intraday volume and
/// end-of-day quotes.
pub struct EodhdClient {
    http: HttpClient,
    api_token: String,
    base_url: String,
    exchange_suffix: String,
}

impl EodhdClient {
    /// Create a client with the default rate limit.
    ///
    /// # Errors
    /// Returns `DataError::MissingCredential` if `api_token` is blank.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_rate_limit(api_token, DEFAULT_RATE_LIMIT)
    }

    /// Create a client using the `EODHD_API_KEY` environment variable.
    pub fn from_env(min_interval: Duration) -> Result<Self> {
        Self::with_rate_limit(config::require(config::EODHD_API_KEY)?, min_interval)
    }

    /// Create a client with a custom minimum interval between requests.
    pub fn with_rate_limit(api_token: impl Into<String>, min_interval: Duration) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(DataError::MissingCredential(
                config::EODHD_API_KEY.to_string(),
            ));
        }

        Ok(Self {
            http: HttpClient::new(min_interval)?,
            api_token,
            base_url: EODHD_BASE_URL.to_string(),
            exchange_suffix: US_SUFFIX.to_string(),
        })
    }

    /// Point the client at a different host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a different exchange suffix (default `US`).
    pub fn with_exchange_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.exchange_suffix = suffix.into();
        self
    }

    /// Minimum interval between requests.
    pub fn rate_limit(&self) -> Duration {
        self.http.min_interval()
    }

    fn auth(&self) -> (&'static str, String) {
        ("api_token", self.api_token.clone())
    }

    /// Vendor code for a ticker, e.g. `AAPL.US`.
    fn code(&self, symbol: &Symbol) -> Result<String> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }
        let suffix = format!(".{}", self.exchange_suffix);
        let raw = symbol.as_str();
        if raw.ends_with(&suffix) {
            Ok(raw.to_string())
        } else {
            Ok(format!("{}{}", raw, suffix))
        }
    }

    /// Top percentage gainers from the screener endpoint, best first.
    ///
    /// Rows without a price or change are skipped.
    ///
    /// # Errors
    /// Returns `DataError::Api` when the envelope reports a non-`ok` status.
    pub async fn top_gainers(&self, query: &GainerQuery) -> Result<Vec<GainerCandidate>> {
        let url = format!("{}/screener", self.base_url);
        let params = [
            self.auth(),
            ("market", query.market.clone()),
            ("filters", screener_filters(query).to_string()),
            ("sort", "change_p.desc".to_string()),
            ("limit", query.limit.to_string()),
        ];
        let response: Option<ScreenerResponse> = self
            .http
            .get_json(&url, &params, &[], "gainers screener")
            .await?;
        let Some(response) = response else {
            return Ok(Vec::new());
        };

        if let Some(status) = response.status.as_deref()
            && status != "ok"
        {
            return Err(DataError::Api(
                response.message.unwrap_or_else(|| status.to_string()),
            ));
        }

        let mut candidates = Vec::with_capacity(response.data.len());
        for row in response.data {
            let (Some(price), Some(change_percent)) = (row.resolved_price(), row.resolved_change())
            else {
                tracing::warn!(symbol = %row.code, "screener row without price or change, skipping");
                continue;
            };
            candidates.push(GainerCandidate {
                symbol: Symbol::new(row.code),
                name: row.name,
                price,
                change_percent,
                volume: row.volume,
                exchange: row.exchange,
                market_cap: row.market_capitalization,
            });
        }

        tracing::debug!(count = candidates.len(), "fetched gainer candidates");
        Ok(candidates)
    }

    /// Floating share count from the fundamentals endpoint.
    pub async fn float_shares(&self, symbol: &Symbol) -> Result<Option<f64>> {
        let url = format!("{}/fundamentals/{}", self.base_url, self.code(symbol)?);
        let params = [self.auth()];
        let response: Option<FundamentalsResponse> = self
            .http
            .get_json(&url, &params, &[], &format!("fundamentals for {}", symbol))
            .await?;

        Ok(response
            .and_then(|r| r.shares_stats)
            .and_then(|s| s.shares_float))
    }

    /// Intraday volume bars between `from` and `to`, oldest first.
    ///
    /// Rows without a volume or a readable time are dropped.
    pub async fn intraday_volume(
        &self,
        symbol: &Symbol,
        interval: BarInterval,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<VolumeBar>> {
        if from > to {
            return Err(DataError::InvalidDateRange {
                start: from.to_rfc3339(),
                end: to.to_rfc3339(),
            });
        }

        let url = format!("{}/intraday/{}", self.base_url, self.code(symbol)?);
        let params = [
            self.auth(),
            ("interval", interval.as_str().to_string()),
            ("from", from.timestamp().to_string()),
            ("to", to.timestamp().to_string()),
            ("fmt", "json".to_string()),
        ];
        let response: Option<IntradayResponse> = self
            .http
            .get_json(&url, &params, &[], &format!("intraday volume for {}", symbol))
            .await?;

        let mut bars: Vec<VolumeBar> = response
            .map(IntradayResponse::into_rows)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|row| {
                Some(VolumeBar {
                    timestamp: row.time()?,
                    volume: row.volume?,
                })
            })
            .collect();
        bars.sort_by_key(|bar| bar.timestamp);
        Ok(bars)
    }

    /// Latest end-of-day bar as a quote.
    pub async fn end_of_day(&self, symbol: &Symbol) -> Result<Option<Quote>> {
        let url = format!("{}/eod/{}", self.base_url, self.code(symbol)?);
        let from = (Utc::now() - ChronoDuration::days(EOD_LOOKBACK_DAYS)).date_naive();
        let params = [
            self.auth(),
            ("fmt", "json".to_string()),
            ("order", "d".to_string()),
            ("from", from.format("%Y-%m-%d").to_string()),
        ];
        let rows: Option<Vec<EodRow>> = self
            .http
            .get_json(&url, &params, &[], &format!("end of day for {}", symbol))
            .await?;

        let Some(row) = rows.and_then(|rows| rows.into_iter().next()) else {
            return Ok(None);
        };

        let missing = |field: &str| DataError::MissingField {
            symbol: symbol.to_string(),
            field: field.to_string(),
        };
        let price = row.close.ok_or_else(|| missing("close"))?;
        let open = row.open.ok_or_else(|| missing("open"))?;
        let timestamp = row
            .date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| missing("date"))?;

        Ok(Some(Quote {
            symbol: symbol.clone(),
            price,
            open,
            high: row.high,
            low: row.low,
            volume: row.volume,
            timestamp,
        }))
    }
}

/// Screener filter expression, e.g.
/// `[["exchange","in",["NASDAQ","NYSE"]],["price",">=",1]]`.
fn screener_filters(query: &GainerQuery) -> Value {
    let mut filters = Vec::new();
    if !query.exchanges.is_empty() {
        filters.push(json!(["exchange", "in", query.exchanges]));
    }
    if let Some(min) = query.min_price {
        filters.push(json!(["price", ">=", min]));
    }
    if let Some(max) = query.max_price {
        filters.push(json!(["price", "<=", max]));
    }
    if let Some(min) = query.min_change_percent {
        filters.push(json!(["change_p", ">=", min]));
    }
    Value::Array(filters)
}

impl std::fmt::Debug for EodhdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EodhdClient")
            .field("base_url", &self.base_url)
            .field("exchange_suffix", &self.exchange_suffix)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl GainersSource for EodhdClient {
    async fn get_top_gainers(&self, query: &GainerQuery) -> Result<Vec<GainerCandidate>> {
        self.top_gainers(query).await
    }
}

#[async_trait]
impl FundamentalsSource for EodhdClient {
    async fn get_float_shares(&self, symbol: &Symbol) -> Result<Option<f64>> {
        self.float_shares(symbol).await
    }
}

#[async_trait]
impl VolumeSource for EodhdClient {
    async fn get_volume_bars(
        &self,
        symbol: &Symbol,
        interval: BarInterval,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<VolumeBar>> {
        self.intraday_volume(symbol, interval, from, to).await
    }
}

#[async_trait]
impl QuoteSource for EodhdClient {
    async fn get_quote(&self, symbol: &Symbol) -> Result<Option<Quote>> {
        self.end_of_day(symbol).await
    }
}
