//! Collaborator contracts consumed by the screener.
//!
//! Each trait covers one kind of data. A vendor client implements the
//! subset it can serve; the screener only depends on these traits.
//!
//! Absence of data is `Ok(None)` (or an empty list), never an error.
//! Errors are reserved for failed or malformed fetches.

use crate::error::Result;
use crate::model::{
    BarInterval, GainerCandidate, GainerQuery, IndicatorSpec, Quote, Symbol, TickerDetails,
    TickerInfo, TickerQuery, VolumeBar,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Enumerates the instruments of a market.
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// List tickers matching `query`, following pagination until the vendor
    /// has no further page or `query.max_results` is reached.
    async fn list_tickers(&self, query: &TickerQuery) -> Result<Vec<TickerInfo>>;
}

/// Serves the latest quote for a symbol.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the latest quote, `None` when the vendor has none.
    async fn get_quote(&self, symbol: &Symbol) -> Result<Option<Quote>>;
}

/// Serves externally computed indicator values.
#[async_trait]
pub trait IndicatorSource: Send + Sync {
    /// Fetch the most recent value of `spec` for `symbol`.
    async fn get_indicator(&self, symbol: &Symbol, spec: &IndicatorSpec) -> Result<Option<f64>>;
}

/// Serves reference data (name, market capitalization, sector).
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Fetch reference details for `symbol`.
    async fn get_details(&self, symbol: &Symbol) -> Result<Option<TickerDetails>>;
}

/// Serves share-structure fundamentals.
#[async_trait]
pub trait FundamentalsSource: Send + Sync {
    /// Fetch the floating share count for `symbol`.
    async fn get_float_shares(&self, symbol: &Symbol) -> Result<Option<f64>>;
}

/// Serves the upstream "top percentage gainers" feed.
#[async_trait]
pub trait GainersSource: Send + Sync {
    /// Fetch pre-filtered gainer candidates, best first.
    async fn get_top_gainers(&self, query: &GainerQuery) -> Result<Vec<GainerCandidate>>;
}

/// Serves intraday volume history.
#[async_trait]
pub trait VolumeSource: Send + Sync {
    /// Fetch volume buckets of size `interval` between `from` and `to`.
    async fn get_volume_bars(
        &self,
        symbol: &Symbol,
        interval: BarInterval,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<VolumeBar>>;
}
