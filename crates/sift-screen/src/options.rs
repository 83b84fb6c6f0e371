//! Run options: ranking, indicator plan and concurrency.

use crate::model::Metric;
use crate::volume::VolumeWindow;
use serde::{Deserialize, Serialize};
use sift_data::IndicatorSpec;
use std::fmt;
use std::str::FromStr;

/// Default number of results returned.
pub const DEFAULT_LIMIT: usize = 50;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first
    #[serde(alias = "asc")]
    Ascending,
    /// Largest first
    #[default]
    #[serde(alias = "desc")]
    Descending,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Which indicators are fetched per symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorPlan {
    /// Moving average backing `sma` and `price_to_sma`
    pub sma: Option<IndicatorSpec>,
    /// Oscillator backing `rsi`
    pub rsi: Option<IndicatorSpec>,
}

impl IndicatorPlan {
    /// Fetch no indicators.
    pub const fn none() -> Self {
        Self {
            sma: None,
            rsi: None,
        }
    }

    /// Whether nothing is fetched.
    pub const fn is_empty(&self) -> bool {
        self.sma.is_none() && self.rsi.is_none()
    }
}

impl Default for IndicatorPlan {
    /// Daily SMA 50 and RSI 14.
    fn default() -> Self {
        Self {
            sma: Some(IndicatorSpec::sma(50)),
            rsi: Some(IndicatorSpec::rsi(14)),
        }
    }
}

/// Options for a screening run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenOptions {
    /// Metric the results are ranked by
    pub sort_by: Metric,
    /// Ranking direction
    pub order: SortOrder,
    /// Maximum number of results
    pub limit: usize,
    /// Indicators fetched per symbol
    pub indicators: IndicatorPlan,
    /// Fetch name, market capitalization and sector
    pub fetch_details: bool,
    /// Symbols evaluated at once
    pub concurrency: usize,
    /// Volume history used for relative volume
    pub volume: VolumeWindow,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            sort_by: Metric::ChangePercent,
            order: SortOrder::Descending,
            limit: DEFAULT_LIMIT,
            indicators: IndicatorPlan::default(),
            fetch_details: true,
            concurrency: 1,
            volume: VolumeWindow::default(),
        }
    }
}

impl ScreenOptions {
    /// Preset for gainer scans: the feed already carries name, price and
    /// change, so no details or indicators are fetched.
    pub fn for_gainers() -> Self {
        Self {
            indicators: IndicatorPlan::none(),
            fetch_details: false,
            ..Self::default()
        }
    }

    /// Set the ranking metric and direction.
    pub const fn sorted_by(mut self, metric: Metric, order: SortOrder) -> Self {
        self.sort_by = metric;
        self.order = order;
        self
    }

    /// Set the result limit.
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the indicator plan.
    pub const fn with_indicators(mut self, plan: IndicatorPlan) -> Self {
        self.indicators = plan;
        self
    }

    /// Enable or disable reference-detail fetches.
    pub const fn with_details(mut self, fetch: bool) -> Self {
        self.fetch_details = fetch;
        self
    }

    /// Set the volume history window.
    pub const fn with_volume_window(mut self, window: VolumeWindow) -> Self {
        self.volume = window;
        self
    }

    /// Set worker concurrency (at least one).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
