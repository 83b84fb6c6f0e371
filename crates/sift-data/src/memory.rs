//! In-memory data source for tests.
//!
//! Implements every source trait from canned data. Symbols registered with
//! [`InMemorySource::failing_for`] fail every request with a server error,
//! which lets callers exercise their per-symbol failure handling.

use crate::error::{DataError, Result};
use crate::model::{
    BarInterval, GainerCandidate, GainerQuery, IndicatorSpec, Quote, Symbol, TickerDetails,
    TickerInfo, TickerQuery, VolumeBar,
};
use crate::source::{
    FundamentalsSource, GainersSource, IndicatorSource, QuoteSource, ReferenceSource,
    TickerSource, VolumeSource,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Build a quote with matching high/low and a fixed timestamp.
pub fn quote(symbol: &str, open: f64, price: f64, volume: f64) -> Quote {
    Quote {
        symbol: Symbol::new(symbol),
        price,
        open,
        high: Some(price.max(open)),
        low: Some(price.min(open)),
        volume: Some(volume),
        timestamp: DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// Canned data source.
#[derive(Debug, Default)]
pub struct InMemorySource {
    tickers: Vec<TickerInfo>,
    quotes: HashMap<Symbol, Quote>,
    indicators: HashMap<(Symbol, IndicatorSpec), f64>,
    details: HashMap<Symbol, TickerDetails>,
    float_shares: HashMap<Symbol, f64>,
    gainers: Vec<GainerCandidate>,
    volume_bars: HashMap<Symbol, Vec<VolumeBar>>,
    failing: HashSet<Symbol>,
    ticker_requests: AtomicUsize,
    quote_requests: AtomicUsize,
    volume_requests: AtomicUsize,
}

impl InMemorySource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ticker listing entry.
    pub fn with_ticker(mut self, info: TickerInfo) -> Self {
        self.tickers.push(info);
        self
    }

    /// Add an active common-stock listing for `symbol`.
    pub fn with_listed(self, symbol: &str) -> Self {
        self.with_ticker(TickerInfo {
            symbol: Symbol::new(symbol),
            name: None,
            market: Some("stocks".to_string()),
            ticker_type: Some("CS".to_string()),
            active: true,
            market_cap: None,
        })
    }

    /// Register a quote.
    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quotes.insert(quote.symbol.clone(), quote);
        self
    }

    /// Register an indicator value.
    pub fn with_indicator(mut self, symbol: &str, spec: IndicatorSpec, value: f64) -> Self {
        self.indicators.insert((Symbol::new(symbol), spec), value);
        self
    }

    /// Register reference details.
    pub fn with_details(mut self, details: TickerDetails) -> Self {
        self.details.insert(details.symbol.clone(), details);
        self
    }

    /// Register a market capitalization (as reference details).
    pub fn with_market_cap(self, symbol: &str, market_cap: f64) -> Self {
        self.with_details(TickerDetails {
            symbol: Symbol::new(symbol),
            market_cap: Some(market_cap),
            ..TickerDetails::default()
        })
    }

    /// Register a floating share count.
    pub fn with_float_shares(mut self, symbol: &str, shares: f64) -> Self {
        self.float_shares.insert(Symbol::new(symbol), shares);
        self
    }

    /// Append a gainers-feed candidate.
    pub fn with_gainer(mut self, candidate: GainerCandidate) -> Self {
        self.gainers.push(candidate);
        self
    }

    /// Register intraday volume history.
    pub fn with_volume_bars(mut self, symbol: &str, bars: Vec<VolumeBar>) -> Self {
        self.volume_bars.insert(Symbol::new(symbol), bars);
        self
    }

    /// Make every request for `symbol` fail.
    pub fn failing_for(mut self, symbol: &str) -> Self {
        self.failing.insert(Symbol::new(symbol));
        self
    }

    /// Number of ticker listings served so far.
    pub fn ticker_requests(&self) -> usize {
        self.ticker_requests.load(Ordering::SeqCst)
    }

    /// Number of quote requests served so far.
    pub fn quote_requests(&self) -> usize {
        self.quote_requests.load(Ordering::SeqCst)
    }

    /// Number of volume-history requests served so far.
    pub fn volume_requests(&self) -> usize {
        self.volume_requests.load(Ordering::SeqCst)
    }

    fn check(&self, symbol: &Symbol) -> Result<()> {
        if self.failing.contains(symbol) {
            return Err(DataError::Http {
                status: 500,
                context: format!("canned failure for {}", symbol),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TickerSource for InMemorySource {
    async fn list_tickers(&self, query: &TickerQuery) -> Result<Vec<TickerInfo>> {
        self.ticker_requests.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tickers
            .iter()
            .filter(|info| query.accepts(info))
            .take(query.max_results.min(TickerQuery::MAX_UNIVERSE))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QuoteSource for InMemorySource {
    async fn get_quote(&self, symbol: &Symbol) -> Result<Option<Quote>> {
        self.quote_requests.fetch_add(1, Ordering::SeqCst);
        self.check(symbol)?;
        Ok(self.quotes.get(symbol).cloned())
    }
}

#[async_trait]
impl IndicatorSource for InMemorySource {
    async fn get_indicator(&self, symbol: &Symbol, spec: &IndicatorSpec) -> Result<Option<f64>> {
        self.check(symbol)?;
        Ok(self.indicators.get(&(symbol.clone(), *spec)).copied())
    }
}

#[async_trait]
impl ReferenceSource for InMemorySource {
    async fn get_details(&self, symbol: &Symbol) -> Result<Option<TickerDetails>> {
        self.check(symbol)?;
        Ok(self.details.get(symbol).cloned())
    }
}

#[async_trait]
impl FundamentalsSource for InMemorySource {
    async fn get_float_shares(&self, symbol: &Symbol) -> Result<Option<f64>> {
        self.check(symbol)?;
        Ok(self.float_shares.get(symbol).copied())
    }
}

#[async_trait]
impl GainersSource for InMemorySource {
    async fn get_top_gainers(&self, query: &GainerQuery) -> Result<Vec<GainerCandidate>> {
        Ok(self
            .gainers
            .iter()
            .take(query.limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl VolumeSource for InMemorySource {
    async fn get_volume_bars(
        &self,
        symbol: &Symbol,
        _interval: BarInterval,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<VolumeBar>> {
        self.volume_requests.fetch_add(1, Ordering::SeqCst);
        self.check(symbol)?;
        Ok(self
            .volume_bars
            .get(symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|bar| bar.timestamp >= from && bar.timestamp <= to)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_quote_and_missing_quote() {
        let source = InMemorySource::new().with_quote(quote("AAPL", 100.0, 101.0, 1e6));

        let found = source.get_quote(&Symbol::new("AAPL")).await.unwrap();
        assert_eq!(found.map(|q| q.price), Some(101.0));
        assert!(source.get_quote(&Symbol::new("MSFT")).await.unwrap().is_none());
        assert_eq!(source.quote_requests(), 2);
    }

    #[tokio::test]
    async fn test_failing_symbol_errors() {
        let source = InMemorySource::new()
            .with_quote(quote("BAD", 1.0, 1.0, 1.0))
            .failing_for("BAD");
        let result = source.get_quote(&Symbol::new("BAD")).await;
        assert!(matches!(result, Err(DataError::Http { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_listing_applies_query() {
        let source = InMemorySource::new()
            .with_listed("AAPL")
            .with_listed("TOOLONG")
            .with_listed("MSFT");
        let listed = source.list_tickers(&TickerQuery::default()).await.unwrap();
        let symbols: Vec<_> = listed.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }
}
