//! Screen records and the metrics they expose.

use crate::error::ExclusionReason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sift_data::{GainerCandidate, Quote, Symbol};
use std::fmt;
use std::str::FromStr;

/// A numeric field of a [`ScreenRecord`] that filters and sorting refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Last price
    Price,
    /// Session open
    Open,
    /// Session high
    High,
    /// Session low
    Low,
    /// Traded volume
    Volume,
    /// `price - open`
    Change,
    /// `change / open * 100`
    #[default]
    ChangePercent,
    /// Market capitalization
    MarketCap,
    /// Simple moving average
    Sma,
    /// Relative strength index
    Rsi,
    /// `price / sma`
    PriceToSma,
    /// Floating shares
    FloatShares,
    /// Current-period volume over the baseline mean
    RelativeVolume,
}

impl Metric {
    /// Every metric, in record field order.
    pub const ALL: [Self; 13] = [
        Self::Price,
        Self::Open,
        Self::High,
        Self::Low,
        Self::Volume,
        Self::Change,
        Self::ChangePercent,
        Self::MarketCap,
        Self::Sma,
        Self::Rsi,
        Self::PriceToSma,
        Self::FloatShares,
        Self::RelativeVolume,
    ];

    /// Field name as used in criteria, CLI flags and exports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Volume => "volume",
            Self::Change => "change",
            Self::ChangePercent => "change_percent",
            Self::MarketCap => "market_cap",
            Self::Sma => "sma",
            Self::Rsi => "rsi",
            Self::PriceToSma => "price_to_sma",
            Self::FloatShares => "float_shares",
            Self::RelativeVolume => "relative_volume",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == wanted)
            .ok_or_else(|| format!("Unknown metric: {}", s))
    }
}

/// One screened symbol with every metric computed for it.
///
/// Built once per symbol per run. Fields the sources could not supply stay
/// `None`; they are never defaulted to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenRecord {
    /// Instrument
    pub symbol: Symbol,
    /// Instrument name
    pub name: Option<String>,
    /// Last price
    pub price: f64,
    /// Session open
    pub open: Option<f64>,
    /// Session high
    pub high: Option<f64>,
    /// Session low
    pub low: Option<f64>,
    /// Traded volume
    pub volume: Option<f64>,
    /// Quote time
    pub timestamp: Option<DateTime<Utc>>,
    /// `price - open`
    pub change: Option<f64>,
    /// Percent change over the session
    pub change_percent: f64,
    /// Market capitalization
    pub market_cap: Option<f64>,
    /// Simple moving average
    pub sma: Option<f64>,
    /// Relative strength index
    pub rsi: Option<f64>,
    /// `price / sma`
    pub price_to_sma: Option<f64>,
    /// Floating shares
    pub float_shares: Option<f64>,
    /// Current-period volume over the baseline mean
    pub relative_volume: Option<f64>,
    /// Sector or industry description
    pub sector: Option<String>,
    /// Listing exchange
    pub exchange: Option<String>,
}

impl ScreenRecord {
    /// Build a record from a quote, deriving the session change.
    ///
    /// # Errors
    /// Returns [`ExclusionReason::DivisionUndefined`] when the open is zero.
    pub fn from_quote(quote: &Quote) -> Result<Self, ExclusionReason> {
        if quote.open == 0.0 {
            return Err(ExclusionReason::DivisionUndefined);
        }
        let change = quote.price - quote.open;

        Ok(Self {
            symbol: quote.symbol.clone(),
            name: None,
            price: quote.price,
            open: Some(quote.open),
            high: quote.high,
            low: quote.low,
            volume: quote.volume,
            timestamp: Some(quote.timestamp),
            change: Some(change),
            change_percent: change / quote.open * 100.0,
            market_cap: None,
            sma: None,
            rsi: None,
            price_to_sma: None,
            float_shares: None,
            relative_volume: None,
            sector: None,
            exchange: None,
        })
    }

    /// Build a record from a gainers-feed candidate. The feed reports the
    /// percent change directly and no session open.
    pub fn from_candidate(candidate: &GainerCandidate) -> Self {
        Self {
            symbol: candidate.symbol.clone(),
            name: candidate.name.clone(),
            price: candidate.price,
            open: None,
            high: None,
            low: None,
            volume: candidate.volume,
            timestamp: None,
            change: None,
            change_percent: candidate.change_percent,
            market_cap: candidate.market_cap,
            sma: None,
            rsi: None,
            price_to_sma: None,
            float_shares: None,
            relative_volume: None,
            sector: None,
            exchange: candidate.exchange.clone(),
        }
    }

    /// Record the SMA and derive `price_to_sma` (absent when the SMA is
    /// absent or zero).
    pub fn set_sma(&mut self, sma: Option<f64>) {
        self.sma = sma;
        self.price_to_sma = sma.filter(|s| *s != 0.0).map(|s| self.price / s);
    }

    /// Value of `metric`, `None` when it was not supplied.
    pub const fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Price => Some(self.price),
            Metric::Open => self.open,
            Metric::High => self.high,
            Metric::Low => self.low,
            Metric::Volume => self.volume,
            Metric::Change => self.change,
            Metric::ChangePercent => Some(self.change_percent),
            Metric::MarketCap => self.market_cap,
            Metric::Sma => self.sma,
            Metric::Rsi => self.rsi,
            Metric::PriceToSma => self.price_to_sma,
            Metric::FloatShares => self.float_shares,
            Metric::RelativeVolume => self.relative_volume,
        }
    }
}
