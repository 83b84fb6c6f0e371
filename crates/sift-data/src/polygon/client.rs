//! Polygon.io REST client with rate limiting.

use super::wire::{AggsResponse, DetailsResponse, IndicatorResponse, TickersPage};
use crate::config;
use crate::error::{DataError, Result};
use crate::http::HttpClient;
use crate::model::{IndicatorSpec, Quote, Symbol, TickerDetails, TickerInfo, TickerQuery};
use crate::source::{IndicatorSource, QuoteSource, ReferenceSource, TickerSource};
use async_trait::async_trait;
use chrono::DateTime;
use std::time::Duration;

/// Polygon.io API base URL
const POLYGON_BASE_URL: &str = "https://api.polygon.io";

/// Default rate limit: roughly 8 requests per second
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(120);

/// Polygon.io client serving tickers, quotes, indicators and reference data.
pub struct PolygonClient {
    http: HttpClient,
    api_key: String,
    base_url: String,
}

impl PolygonClient {
    /// Create a client with the default rate limit.
    ///
    /// # Errors
    /// Returns `DataError::MissingCredential` if `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_rate_limit(api_key, DEFAULT_RATE_LIMIT)
    }

    /// Create a client using the `POLYGON_API_KEY` environment variable.
    pub fn from_env(min_interval: Duration) -> Result<Self> {
        Self::with_rate_limit(config::require(config::POLYGON_API_KEY)?, min_interval)
    }

    /// Create a client with a custom minimum interval between requests.
    pub fn with_rate_limit(api_key: impl Into<String>, min_interval: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DataError::MissingCredential(
                config::POLYGON_API_KEY.to_string(),
            ));
        }

        Ok(Self {
            http: HttpClient::new(min_interval)?,
            api_key,
            base_url: POLYGON_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Minimum interval between requests.
    pub fn rate_limit(&self) -> Duration {
        self.http.min_interval()
    }

    fn auth(&self) -> (&'static str, String) {
        ("apiKey", self.api_key.clone())
    }

    /// Previous trading day's aggregate, used as the latest quote.
    ///
    /// # Errors
    /// Returns `DataError::MissingField` when the bar lacks open or close.
    pub async fn previous_close(&self, symbol: &Symbol) -> Result<Option<Quote>> {
        validate(symbol)?;

        let url = format!("{}/v2/aggs/ticker/{}/prev", self.base_url, symbol);
        let query = [("adjusted", "true".to_string()), self.auth()];
        let response: Option<AggsResponse> = self
            .http
            .get_json(&url, &query, &[], &format!("previous close for {}", symbol))
            .await?;

        let Some(bar) = response.and_then(|r| r.results.into_iter().next()) else {
            return Ok(None);
        };

        let missing = |field: &str| DataError::MissingField {
            symbol: symbol.to_string(),
            field: field.to_string(),
        };
        let price = bar.c.ok_or_else(|| missing("c"))?;
        let open = bar.o.ok_or_else(|| missing("o"))?;
        let millis = bar.t.ok_or_else(|| missing("t"))?;
        let timestamp = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| DataError::Parse(format!("invalid timestamp {} for {}", millis, symbol)))?;

        Ok(Some(Quote {
            symbol: symbol.clone(),
            price,
            open,
            high: bar.h,
            low: bar.l,
            volume: bar.v,
            timestamp,
        }))
    }

    /// Most recent value of a technical indicator.
    pub async fn indicator(&self, symbol: &Symbol, spec: &IndicatorSpec) -> Result<Option<f64>> {
        validate(symbol)?;

        let url = format!(
            "{}/v1/indicators/{}/{}",
            self.base_url,
            spec.kind.as_str(),
            symbol
        );
        let query = [
            ("timespan", spec.timespan.as_str().to_string()),
            ("adjusted", "true".to_string()),
            ("window", spec.window.to_string()),
            ("series_type", "close".to_string()),
            ("order", "desc".to_string()),
            ("limit", "1".to_string()),
            self.auth(),
        ];
        let response: Option<IndicatorResponse> = self
            .http
            .get_json(&url, &query, &[], &format!("{} for {}", spec.label(), symbol))
            .await?;

        Ok(response
            .and_then(|r| r.results)
            .and_then(|r| r.values.into_iter().next())
            .and_then(|v| v.value))
    }

    /// Reference details for a ticker.
    pub async fn ticker_details(&self, symbol: &Symbol) -> Result<Option<TickerDetails>> {
        validate(symbol)?;

        let url = format!("{}/v3/reference/tickers/{}", self.base_url, symbol);
        let query = [self.auth()];
        let response: Option<DetailsResponse> = self
            .http
            .get_json(&url, &query, &[], &format!("details for {}", symbol))
            .await?;

        Ok(response.and_then(|r| r.results).map(|row| TickerDetails {
            symbol: symbol.clone(),
            name: row.name,
            market_cap: row.market_cap,
            sector: row.sic_description,
            description: row.description,
            homepage_url: row.homepage_url,
            total_employees: row.total_employees,
            primary_exchange: row.primary_exchange,
        }))
    }

    /// List tickers, following `next_url` pagination.
    ///
    /// Stops when the vendor returns no further page or `query.max_results`
    /// accepted tickers have been collected.
    pub async fn tickers(&self, query: &TickerQuery) -> Result<Vec<TickerInfo>> {
        let cap = query.max_results.min(TickerQuery::MAX_UNIVERSE);
        let mut tickers = Vec::new();

        let first_url = format!("{}/v3/reference/tickers", self.base_url);
        let first_query = vec![
            ("market", query.market.clone()),
            ("active", query.active.to_string()),
            ("limit", query.page_size.to_string()),
            self.auth(),
        ];

        let mut next: Option<(String, Vec<(&str, String)>)> = Some((first_url, first_query));
        let mut page_number = 0usize;

        while let Some((url, params)) = next.take() {
            page_number += 1;
            let page: Option<TickersPage> = self
                .http
                .get_json(&url, &params, &[], &format!("ticker page {}", page_number))
                .await?;
            let Some(page) = page else { break };

            for row in page.results {
                let info = TickerInfo {
                    symbol: Symbol::new(row.ticker),
                    name: row.name,
                    market: row.market,
                    ticker_type: row.ticker_type,
                    active: row.active,
                    market_cap: row.market_cap,
                };
                if query.accepts(&info) {
                    tickers.push(info);
                }
            }

            if tickers.len() >= cap {
                tickers.truncate(cap);
                break;
            }

            // next_url carries the cursor but not the key
            next = page.next_url.map(|url| (url, vec![self.auth()]));
        }

        tracing::debug!(count = tickers.len(), pages = page_number, "listed tickers");
        Ok(tickers)
    }
}

fn validate(symbol: &Symbol) -> Result<()> {
    if symbol.is_empty() {
        return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
    }
    Ok(())
}

impl std::fmt::Debug for PolygonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolygonClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TickerSource for PolygonClient {
    async fn list_tickers(&self, query: &TickerQuery) -> Result<Vec<TickerInfo>> {
        self.tickers(query).await
    }
}

#[async_trait]
impl QuoteSource for PolygonClient {
    async fn get_quote(&self, symbol: &Symbol) -> Result<Option<Quote>> {
        self.previous_close(symbol).await
    }
}

#[async_trait]
impl IndicatorSource for PolygonClient {
    async fn get_indicator(&self, symbol: &Symbol, spec: &IndicatorSpec) -> Result<Option<f64>> {
        self.indicator(symbol, spec).await
    }
}

#[async_trait]
impl ReferenceSource for PolygonClient {
    async fn get_details(&self, symbol: &Symbol) -> Result<Option<TickerDetails>> {
        self.ticker_details(symbol).await
    }
}
