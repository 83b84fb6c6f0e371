//! The screening pipeline.

use crate::criteria::ScreenCriteria;
use crate::enrich::{Enricher, fetch_failed};
use crate::error::{Exclusion, ExclusionReason, Result, ScreenError};
use crate::model::{Metric, ScreenRecord};
use crate::options::ScreenOptions;
use crate::outcome::ScreenOutcome;
use crate::ranking::rank;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use sift_data::{
    DataError, FundamentalsSource, IndicatorSource, IndicatorSpec, Quote, QuoteSource,
    ReferenceSource, Symbol, TickerDetails, TickerQuery, TickerSource, VolumeSource,
};
use std::sync::Arc;

/// Callback invoked once per evaluated symbol.
pub type ProgressFn = Arc<dyn Fn(&Symbol) + Send + Sync>;

/// Everything known about one symbol, for single-symbol lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolDetail {
    /// Reference data
    pub details: TickerDetails,
    /// Latest quote
    pub quote: Quote,
    /// `price - open`
    pub change: f64,
    /// `change / open * 100`, absent when the open is zero
    pub change_percent: Option<f64>,
    /// Daily SMA 50
    pub sma_50: Option<f64>,
    /// Daily SMA 200
    pub sma_200: Option<f64>,
    /// Daily RSI 14
    pub rsi_14: Option<f64>,
}

/// Screens a symbol universe against criteria.
///
/// Quotes are required; every other source is optional. Criteria that need
/// a missing source are rejected before the first fetch.
pub struct Screener {
    quotes: Arc<dyn QuoteSource>,
    enricher: Enricher,
    progress: Option<ProgressFn>,
}

impl Screener {
    /// Create a screener over a quote source.
    pub fn new(quotes: Arc<dyn QuoteSource>) -> Self {
        Self {
            quotes,
            enricher: Enricher::default(),
            progress: None,
        }
    }

    /// Attach an indicator source.
    pub fn with_indicators(mut self, source: Arc<dyn IndicatorSource>) -> Self {
        self.enricher.indicators = Some(source);
        self
    }

    /// Attach a reference-data source.
    pub fn with_reference(mut self, source: Arc<dyn ReferenceSource>) -> Self {
        self.enricher.reference = Some(source);
        self
    }

    /// Attach a fundamentals source (float shares).
    pub fn with_fundamentals(mut self, source: Arc<dyn FundamentalsSource>) -> Self {
        self.enricher.fundamentals = Some(source);
        self
    }

    /// Attach an intraday volume source (relative volume).
    pub fn with_volume(mut self, source: Arc<dyn VolumeSource>) -> Self {
        self.enricher.volume = Some(source);
        self
    }

    /// Report each evaluated symbol to `callback`.
    pub fn with_progress(mut self, callback: impl Fn(&Symbol) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Screen `universe`.
    ///
    /// Symbols are evaluated in input order with at most
    /// `options.concurrency` in flight. Per-symbol failures become
    /// exclusions; the run itself only fails on configuration errors or an
    /// empty universe.
    pub async fn screen(
        &self,
        universe: &[Symbol],
        criteria: &ScreenCriteria,
        options: &ScreenOptions,
    ) -> Result<ScreenOutcome> {
        if universe.is_empty() {
            return Err(ScreenError::EmptyUniverse);
        }
        self.check(criteria, options)?;
        let options = pin_clock(options);

        tracing::info!(
            symbols = universe.len(),
            filters = criteria.active_filters().len(),
            concurrency = options.concurrency,
            "screening universe"
        );

        let evaluations: Vec<_> = stream::iter(universe.iter().cloned())
            .map(|symbol| self.evaluate(symbol, criteria, &options))
            .buffered(options.concurrency.max(1))
            .collect()
            .await;

        Ok(finish(evaluations, universe.len(), &options))
    }

    /// Enumerate the universe from `tickers`, then screen it.
    ///
    /// # Errors
    /// Returns [`ScreenError::Universe`] when the listing fails and
    /// [`ScreenError::EmptyUniverse`] when it is empty.
    pub async fn screen_listed(
        &self,
        tickers: &dyn TickerSource,
        query: &TickerQuery,
        criteria: &ScreenCriteria,
        options: &ScreenOptions,
    ) -> Result<ScreenOutcome> {
        self.check(criteria, options)?;
        let listed = tickers
            .list_tickers(query)
            .await
            .map_err(ScreenError::Universe)?;
        let universe: Vec<Symbol> = listed.into_iter().map(|info| info.symbol).collect();
        self.screen(&universe, criteria, options).await
    }

    /// Detail view of one symbol: reference data, quote, SMA 50/200 and
    /// RSI 14.
    ///
    /// # Errors
    /// Returns [`ScreenError::NotFound`] when the symbol has no details or no
    /// quote.
    pub async fn inspect(&self, symbol: &Symbol) -> Result<SymbolDetail> {
        let reference = self.enricher.reference.as_ref().ok_or_else(|| {
            ScreenError::Configuration("inspect requires a reference source".to_string())
        })?;
        let fetch_err = |source: DataError| ScreenError::Fetch {
            symbol: symbol.clone(),
            source,
        };

        let details = reference
            .get_details(symbol)
            .await
            .map_err(fetch_err)?
            .ok_or_else(|| ScreenError::NotFound(symbol.clone()))?;
        let quote = self
            .quotes
            .get_quote(symbol)
            .await
            .map_err(fetch_err)?
            .ok_or_else(|| ScreenError::NotFound(symbol.clone()))?;

        let mut values = [None; 3];
        if let Some(source) = &self.enricher.indicators {
            let specs = [
                IndicatorSpec::sma(50),
                IndicatorSpec::sma(200),
                IndicatorSpec::rsi(14),
            ];
            for (slot, spec) in values.iter_mut().zip(specs) {
                *slot = source.get_indicator(symbol, &spec).await.map_err(fetch_err)?;
            }
        }
        let [sma_50, sma_200, rsi_14] = values;

        let change = quote.price - quote.open;
        let change_percent = (quote.open != 0.0).then(|| change / quote.open * 100.0);

        Ok(SymbolDetail {
            details,
            quote,
            change,
            change_percent,
            sma_50,
            sma_200,
            rsi_14,
        })
    }

    fn check(&self, criteria: &ScreenCriteria, options: &ScreenOptions) -> Result<()> {
        if criteria.uses(Metric::MarketCap)
            && !(self.enricher.reference.is_some() && options.fetch_details)
        {
            return Err(ScreenError::Configuration(
                "market cap filters require a reference source with details enabled".to_string(),
            ));
        }
        self.enricher.check(criteria, options)
    }

    async fn evaluate(
        &self,
        symbol: Symbol,
        criteria: &ScreenCriteria,
        options: &ScreenOptions,
    ) -> std::result::Result<ScreenRecord, Exclusion> {
        let result = self.build(&symbol, criteria, options).await;
        if let Some(progress) = &self.progress {
            progress(&symbol);
        }
        result.map_err(|reason| {
            tracing::debug!(%symbol, %reason, "excluded");
            Exclusion::new(symbol, reason)
        })
    }

    async fn build(
        &self,
        symbol: &Symbol,
        criteria: &ScreenCriteria,
        options: &ScreenOptions,
    ) -> std::result::Result<ScreenRecord, ExclusionReason> {
        let quote = match self.quotes.get_quote(symbol).await {
            Ok(Some(quote)) => quote,
            Ok(None) | Err(DataError::MissingField { .. }) => {
                return Err(ExclusionReason::NoQuote);
            }
            Err(e) => return Err(fetch_failed(symbol, "quote", &e)),
        };

        let mut record = ScreenRecord::from_quote(&quote)?;
        self.enricher.enrich(&mut record, criteria, options).await?;
        accept(record, criteria)
    }
}

impl std::fmt::Debug for Screener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screener")
            .field("enricher", &self.enricher)
            .field("progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}

/// Fix "now" once per run so every symbol shares the same volume window.
pub(crate) fn pin_clock(options: &ScreenOptions) -> ScreenOptions {
    let mut options = options.clone();
    options.volume.as_of = Some(options.volume.as_of.unwrap_or_else(Utc::now));
    options
}

/// Final AND over every active filter.
pub(crate) fn accept(
    record: ScreenRecord,
    criteria: &ScreenCriteria,
) -> std::result::Result<ScreenRecord, ExclusionReason> {
    let failures = criteria.failures(&record);
    if failures.is_empty() {
        Ok(record)
    } else {
        Err(ExclusionReason::FailedCriteria(failures))
    }
}

/// Split evaluations, rank the survivors and build the outcome.
pub(crate) fn finish(
    evaluations: Vec<std::result::Result<ScreenRecord, Exclusion>>,
    scanned: usize,
    options: &ScreenOptions,
) -> ScreenOutcome {
    let mut results = Vec::new();
    let mut exclusions = Vec::new();
    for evaluation in evaluations {
        match evaluation {
            Ok(record) => results.push(record),
            Err(exclusion) => exclusions.push(exclusion),
        }
    }

    let matched = results.len();
    rank(&mut results, options.sort_by, options.order, options.limit);

    tracing::info!(
        scanned,
        matched,
        returned = results.len(),
        excluded = exclusions.len(),
        "screen complete"
    );

    ScreenOutcome {
        results,
        exclusions,
        scanned,
    }
}
