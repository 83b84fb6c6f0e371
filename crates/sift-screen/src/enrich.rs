//! Per-symbol metric fetches shared by the screener and the gainer scan.

use crate::criteria::{Filter, ScreenCriteria};
use crate::error::{ExclusionReason, Result, ScreenError};
use crate::model::{Metric, ScreenRecord};
use crate::options::ScreenOptions;
use crate::volume::{current_session, relative_volume};
use sift_data::{
    DataError, FundamentalsSource, IndicatorSource, IndicatorSpec, ReferenceSource, Symbol,
    VolumeSource,
};
use std::sync::Arc;

/// Optional sources beyond the one seeding the records.
#[derive(Clone, Default)]
pub(crate) struct Enricher {
    pub(crate) indicators: Option<Arc<dyn IndicatorSource>>,
    pub(crate) reference: Option<Arc<dyn ReferenceSource>>,
    pub(crate) fundamentals: Option<Arc<dyn FundamentalsSource>>,
    pub(crate) volume: Option<Arc<dyn VolumeSource>>,
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enricher")
            .field("indicators", &self.indicators.is_some())
            .field("reference", &self.reference.is_some())
            .field("fundamentals", &self.fundamentals.is_some())
            .field("volume", &self.volume.is_some())
            .finish()
    }
}

/// Log a failed fetch and turn it into an exclusion.
pub(crate) fn fetch_failed(symbol: &Symbol, what: &str, err: &DataError) -> ExclusionReason {
    tracing::warn!(%symbol, what, error = %err, "fetch failed, excluding symbol");
    ExclusionReason::FetchFailed(format!("{}: {}", what, err))
}

/// Treat a missing field as absent data rather than a failure.
fn absent_on_missing<T>(result: sift_data::Result<Option<T>>) -> sift_data::Result<Option<T>> {
    match result {
        Err(DataError::MissingField { .. }) => Ok(None),
        other => other,
    }
}

impl Enricher {
    /// Reject criteria that reference metrics no configured source can
    /// supply. Runs before any fetch.
    pub(crate) fn check(&self, criteria: &ScreenCriteria, options: &ScreenOptions) -> Result<()> {
        if criteria.uses(Metric::FloatShares) && self.fundamentals.is_none() {
            return Err(ScreenError::Configuration(
                "max_float_shares requires a fundamentals source".to_string(),
            ));
        }
        if criteria.uses(Metric::RelativeVolume) && self.volume.is_none() {
            return Err(ScreenError::Configuration(
                "min_relative_volume requires a volume source".to_string(),
            ));
        }
        let has_indicators = self.indicators.is_some();
        if criteria.uses(Metric::Rsi) && !(has_indicators && options.indicators.rsi.is_some()) {
            return Err(ScreenError::Configuration(
                "rsi filters require an indicator source and an rsi in the indicator plan"
                    .to_string(),
            ));
        }
        if criteria.uses(Metric::PriceToSma) && !(has_indicators && options.indicators.sma.is_some())
        {
            return Err(ScreenError::Configuration(
                "price_above_sma requires an indicator source and an sma in the indicator plan"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Fill the record's remaining metrics.
    ///
    /// Float is fetched first and checked immediately, so a candidate
    /// rejected on float never costs a volume-history request. Relative
    /// volume is likewise checked before details and indicators are fetched.
    pub(crate) async fn enrich(
        &self,
        record: &mut ScreenRecord,
        criteria: &ScreenCriteria,
        options: &ScreenOptions,
    ) -> std::result::Result<(), ExclusionReason> {
        let symbol = record.symbol.clone();

        if let Some(source) = self.fundamentals.as_ref().filter(|_| criteria.uses(Metric::FloatShares))
        {
            record.float_shares = absent_on_missing(source.get_float_shares(&symbol).await)
                .map_err(|e| fetch_failed(&symbol, "float shares", &e))?;
            reject_early(criteria, record, Metric::FloatShares)?;
        }

        if let Some(source) = self.volume.as_ref().filter(|_| criteria.uses(Metric::RelativeVolume)) {
            let window = options.volume;
            let (from, to) = window.range();
            let bars = source
                .get_volume_bars(&symbol, window.interval, from, to)
                .await
                .map_err(|e| fetch_failed(&symbol, "volume history", &e))?;
            let session = current_session(&bars, to);
            let rv = relative_volume(&bars, session, window.baseline);
            tracing::debug!(%symbol, current = rv.current, baseline = rv.baseline, ratio = rv.ratio, "relative volume");
            record.relative_volume = Some(rv.ratio);
            if record.volume.is_none() {
                record.volume = Some(rv.current);
            }
            reject_early(criteria, record, Metric::RelativeVolume)?;
        }

        if let Some(source) = self.reference.as_ref().filter(|_| options.fetch_details) {
            let details = absent_on_missing(source.get_details(&symbol).await)
                .map_err(|e| fetch_failed(&symbol, "details", &e))?;
            if let Some(details) = details {
                record.name = record.name.take().or(details.name);
                record.market_cap = record.market_cap.or(details.market_cap);
                record.sector = details.sector;
                record.exchange = record.exchange.take().or(details.primary_exchange);
            }
        }

        if let Some(source) = &self.indicators {
            if let Some(spec) = options.indicators.sma {
                let sma = fetch_indicator(source.as_ref(), &symbol, &spec).await?;
                record.set_sma(sma);
            }
            if let Some(spec) = options.indicators.rsi {
                record.rsi = fetch_indicator(source.as_ref(), &symbol, &spec).await?;
            }
        }

        Ok(())
    }
}

async fn fetch_indicator(
    source: &dyn IndicatorSource,
    symbol: &Symbol,
    spec: &IndicatorSpec,
) -> std::result::Result<Option<f64>, ExclusionReason> {
    absent_on_missing(source.get_indicator(symbol, spec).await)
        .map_err(|e| fetch_failed(symbol, &spec.label(), &e))
}

/// Exclude the record now if it fails any filter on `metric`.
fn reject_early(
    criteria: &ScreenCriteria,
    record: &ScreenRecord,
    metric: Metric,
) -> std::result::Result<(), ExclusionReason> {
    let failed: Vec<Filter> = criteria
        .active_filters()
        .into_iter()
        .filter(|f| f.metric() == metric && !f.passes(record))
        .collect();
    if failed.is_empty() {
        Ok(())
    } else {
        Err(ExclusionReason::FailedCriteria(failed))
    }
}
