//! Gainer scan: screening seeded from a "top percentage gainers" feed.
//!
//! The feed supplies price, percent change and name; each candidate is then
//! checked for float and relative volume. Float comes first, so a candidate
//! rejected on float costs a single request.

use crate::criteria::ScreenCriteria;
use crate::enrich::Enricher;
use crate::error::{Exclusion, Result, ScreenError};
use crate::model::ScreenRecord;
use crate::options::ScreenOptions;
use crate::outcome::ScreenOutcome;
use crate::screener::{ProgressFn, accept, finish, pin_clock};
use futures::stream::{self, StreamExt};
use sift_data::{
    FundamentalsSource, GainerCandidate, GainerQuery, GainersSource, IndicatorSource,
    ReferenceSource, Symbol, VolumeSource,
};
use std::sync::Arc;

/// Default float ceiling for gainer scans.
pub const DEFAULT_MAX_FLOAT_SHARES: f64 = 10_000_000.0;

/// Default relative-volume floor for gainer scans.
pub const DEFAULT_MIN_RELATIVE_VOLUME: f64 = 5.0;

/// Criteria for a classic low-float momentum scan: float under 10M and
/// relative volume of at least 5x.
pub fn default_gainer_criteria() -> ScreenCriteria {
    ScreenCriteria {
        max_float_shares: Some(DEFAULT_MAX_FLOAT_SHARES),
        min_relative_volume: Some(DEFAULT_MIN_RELATIVE_VOLUME),
        ..ScreenCriteria::default()
    }
}

/// Scans the gainers feed.
pub struct GainerScan {
    gainers: Arc<dyn GainersSource>,
    enricher: Enricher,
    progress: Option<ProgressFn>,
}

impl GainerScan {
    /// Create a scan over a gainers feed with float and volume sources.
    pub fn new(
        gainers: Arc<dyn GainersSource>,
        fundamentals: Arc<dyn FundamentalsSource>,
        volume: Arc<dyn VolumeSource>,
    ) -> Self {
        Self {
            gainers,
            enricher: Enricher {
                fundamentals: Some(fundamentals),
                volume: Some(volume),
                ..Enricher::default()
            },
            progress: None,
        }
    }

    /// Attach an indicator source for RSI/SMA criteria.
    pub fn with_indicators(mut self, source: Arc<dyn IndicatorSource>) -> Self {
        self.enricher.indicators = Some(source);
        self
    }

    /// Attach a reference source, used when details are enabled.
    pub fn with_reference(mut self, source: Arc<dyn ReferenceSource>) -> Self {
        self.enricher.reference = Some(source);
        self
    }

    /// Report each evaluated candidate to `callback`.
    pub fn with_progress(mut self, callback: impl Fn(&Symbol) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Fetch candidates for `query` and screen them.
    ///
    /// # Errors
    /// Returns [`ScreenError::Universe`] when the feed fails and
    /// [`ScreenError::EmptyUniverse`] when it returns nothing.
    pub async fn scan(
        &self,
        query: &GainerQuery,
        criteria: &ScreenCriteria,
        options: &ScreenOptions,
    ) -> Result<ScreenOutcome> {
        self.enricher.check(criteria, options)?;

        let candidates = self
            .gainers
            .get_top_gainers(query)
            .await
            .map_err(ScreenError::Universe)?;
        if candidates.is_empty() {
            return Err(ScreenError::EmptyUniverse);
        }
        let options = pin_clock(options);

        tracing::info!(candidates = candidates.len(), "scanning gainers");

        let scanned = candidates.len();
        let evaluations: Vec<_> = stream::iter(candidates)
            .map(|candidate| self.evaluate(candidate, criteria, &options))
            .buffered(options.concurrency.max(1))
            .collect()
            .await;

        Ok(finish(evaluations, scanned, &options))
    }

    async fn evaluate(
        &self,
        candidate: GainerCandidate,
        criteria: &ScreenCriteria,
        options: &ScreenOptions,
    ) -> std::result::Result<ScreenRecord, Exclusion> {
        let mut record = ScreenRecord::from_candidate(&candidate);
        let result = self
            .enricher
            .enrich(&mut record, criteria, options)
            .await
            .and_then(|()| accept(record, criteria));
        if let Some(progress) = &self.progress {
            progress(&candidate.symbol);
        }
        result.map_err(|reason| {
            tracing::debug!(symbol = %candidate.symbol, %reason, "excluded");
            Exclusion::new(candidate.symbol, reason)
        })
    }
}

impl std::fmt::Debug for GainerScan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GainerScan")
            .field("enricher", &self.enricher)
            .finish_non_exhaustive()
    }
}
