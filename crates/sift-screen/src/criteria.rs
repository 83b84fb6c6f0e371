//! Screening criteria and filter evaluation.
//!
//! Every criterion is optional and an absent criterion constrains nothing.
//! Active criteria combine with AND. Bounds are inclusive, and a filter on a
//! metric the record lacks fails.

use crate::model::{Metric, ScreenRecord};
use crate::options::SortOrder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Threshold set for a screening run.
///
/// Deserializes from the JSON body shape
/// `{"min_price": 5, "max_rsi": 70, "price_above_sma": true}`; unknown keys
/// are ignored and missing keys are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenCriteria {
    /// Lowest accepted price
    pub min_price: Option<f64>,
    /// Highest accepted price
    pub max_price: Option<f64>,
    /// Lowest accepted volume
    pub min_volume: Option<f64>,
    /// Highest accepted volume
    pub max_volume: Option<f64>,
    /// Lowest accepted market capitalization
    pub min_market_cap: Option<f64>,
    /// Highest accepted market capitalization
    pub max_market_cap: Option<f64>,
    /// Lowest accepted percent change
    pub min_change_percent: Option<f64>,
    /// Highest accepted percent change
    pub max_change_percent: Option<f64>,
    /// Lowest accepted RSI
    pub min_rsi: Option<f64>,
    /// Highest accepted RSI
    pub max_rsi: Option<f64>,
    /// Require the price strictly above its SMA
    pub price_above_sma: Option<bool>,
    /// Highest accepted float
    pub max_float_shares: Option<f64>,
    /// Lowest accepted relative volume
    pub min_relative_volume: Option<f64>,
}

/// Criteria together with the ranking a request body may carry,
/// `{"min_price": 5, "sort_by": "volume", "sort_order": "asc"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenRequest {
    /// Filter thresholds
    #[serde(flatten)]
    pub criteria: ScreenCriteria,
    /// Metric to rank by, when given
    #[serde(default)]
    pub sort_by: Option<Metric>,
    /// Ranking direction, when given
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

impl From<ScreenCriteria> for ScreenRequest {
    fn from(criteria: ScreenCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }
}

/// A single active filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// `metric >= threshold`
    Min(Metric, f64),
    /// `metric <= threshold`
    Max(Metric, f64),
    /// `price_to_sma > 1`
    PriceAboveSma,
}

impl Filter {
    /// Whether `record` satisfies the filter.
    pub fn passes(&self, record: &ScreenRecord) -> bool {
        match *self {
            Self::Min(metric, threshold) => record.metric(metric).is_some_and(|v| v >= threshold),
            Self::Max(metric, threshold) => record.metric(metric).is_some_and(|v| v <= threshold),
            Self::PriceAboveSma => record.price_to_sma.is_some_and(|ratio| ratio > 1.0),
        }
    }

    /// Metric the filter reads.
    pub const fn metric(&self) -> Metric {
        match self {
            Self::Min(metric, _) | Self::Max(metric, _) => *metric,
            Self::PriceAboveSma => Metric::PriceToSma,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min(metric, threshold) => write!(f, "{} >= {}", metric, threshold),
            Self::Max(metric, threshold) => write!(f, "{} <= {}", metric, threshold),
            Self::PriceAboveSma => f.write_str("price > sma"),
        }
    }
}

impl ScreenCriteria {
    /// Criteria with nothing active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active filters, in a fixed order.
    pub fn active_filters(&self) -> Vec<Filter> {
        let bounds = [
            (Metric::Price, self.min_price, self.max_price),
            (Metric::Volume, self.min_volume, self.max_volume),
            (Metric::MarketCap, self.min_market_cap, self.max_market_cap),
            (
                Metric::ChangePercent,
                self.min_change_percent,
                self.max_change_percent,
            ),
            (Metric::Rsi, self.min_rsi, self.max_rsi),
            (Metric::FloatShares, None, self.max_float_shares),
            (Metric::RelativeVolume, self.min_relative_volume, None),
        ];

        let mut filters = Vec::new();
        for (metric, min, max) in bounds {
            if let Some(min) = min {
                filters.push(Filter::Min(metric, min));
            }
            if let Some(max) = max {
                filters.push(Filter::Max(metric, max));
            }
        }
        if self.price_above_sma == Some(true) {
            filters.push(Filter::PriceAboveSma);
        }
        filters
    }

    /// Whether no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.active_filters().is_empty()
    }

    /// Whether any active filter reads `metric`.
    pub fn uses(&self, metric: Metric) -> bool {
        self.active_filters().iter().any(|f| f.metric() == metric)
    }

    /// Active filters `record` fails. Empty means the record passes.
    pub fn failures(&self, record: &ScreenRecord) -> Vec<Filter> {
        self.active_filters()
            .into_iter()
            .filter(|filter| !filter.passes(record))
            .collect()
    }

    /// Whether `record` satisfies every active filter.
    pub fn matches(&self, record: &ScreenRecord) -> bool {
        self.failures(record).is_empty()
    }
}
