//! Vendor-neutral market data types.
//!
//! Every source normalizes its wire format into these types before handing
//! data to the screener. Values are immutable snapshots: a run re-fetches
//! them, it never updates them in place.

use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier for a tradable instrument (ticker or coin id).
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Borrow the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the symbol is blank.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for Symbol {
    fn from(symbol: &str) -> Self {
        Self(symbol.to_string())
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Latest price snapshot for a symbol over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Instrument the quote belongs to
    pub symbol: Symbol,
    /// Last (closing) price of the period
    pub price: f64,
    /// Opening price of the period
    pub open: f64,
    /// Highest price of the period, when reported
    pub high: Option<f64>,
    /// Lowest price of the period, when reported
    pub low: Option<f64>,
    /// Traded volume over the period, when reported
    pub volume: Option<f64>,
    /// End of the period the quote describes
    pub timestamp: DateTime<Utc>,
}

/// One OHLC candle, used for flat-file history exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    /// Candle open time
    pub timestamp: DateTime<Utc>,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
}

/// Traded volume for one intraday bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    /// Bucket start time
    pub timestamp: DateTime<Utc>,
    /// Volume traded in the bucket
    pub volume: f64,
}

impl VolumeBar {
    /// Calendar day (UTC) the bucket belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Sampling period for indicators and aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timespan {
    /// One minute
    Minute,
    /// One hour
    Hour,
    /// One trading day
    #[default]
    Day,
    /// One week
    Week,
    /// One month
    Month,
}

impl Timespan {
    /// Vendor query-string form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timespan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minute" | "1m" => Ok(Self::Minute),
            "hour" | "1h" => Ok(Self::Hour),
            "day" | "1d" => Ok(Self::Day),
            "week" | "1w" => Ok(Self::Week),
            "month" | "1mo" => Ok(Self::Month),
            _ => Err(format!("Unknown timespan: {}", s)),
        }
    }
}

/// Intraday bar size for volume history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BarInterval {
    /// One-minute bars
    Minute1,
    /// Five-minute bars
    Minute5,
    /// Hourly bars
    #[default]
    Hour1,
}

impl BarInterval {
    /// Vendor query-string form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "1m",
            Self::Minute5 => "5m",
            Self::Hour1 => "1h",
        }
    }
}

impl FromStr for BarInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" => Ok(Self::Minute1),
            "5m" => Ok(Self::Minute5),
            "1h" => Ok(Self::Hour1),
            _ => Err(format!("Unknown bar interval: {}", s)),
        }
    }
}

/// Technical indicator families served by the indicator source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    /// Simple moving average
    Sma,
    /// Exponential moving average
    Ema,
    /// Relative strength index
    Rsi,
    /// MACD line value
    Macd,
}

impl IndicatorKind {
    /// Vendor path segment.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
        }
    }
}

/// A named indicator parameterized by window length and sampling period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorSpec {
    /// Indicator family
    pub kind: IndicatorKind,
    /// Window length in periods
    pub window: u32,
    /// Sampling period
    pub timespan: Timespan,
}

impl IndicatorSpec {
    /// Create a new indicator spec.
    pub const fn new(kind: IndicatorKind, window: u32, timespan: Timespan) -> Self {
        Self {
            kind,
            window,
            timespan,
        }
    }

    /// Daily simple moving average.
    pub const fn sma(window: u32) -> Self {
        Self::new(IndicatorKind::Sma, window, Timespan::Day)
    }

    /// Daily relative strength index.
    pub const fn rsi(window: u32) -> Self {
        Self::new(IndicatorKind::Rsi, window, Timespan::Day)
    }

    /// Stable label such as `sma_50`, with the timespan appended when it is
    /// not daily (`rsi_14_hour`).
    pub fn label(&self) -> String {
        match self.timespan {
            Timespan::Day => format!("{}_{}", self.kind.as_str(), self.window),
            other => format!("{}_{}_{}", self.kind.as_str(), self.window, other),
        }
    }
}

/// Filters applied when enumerating the ticker universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerQuery {
    /// Market to list (e.g. `stocks`, `crypto`)
    pub market: String,
    /// Only list actively traded instruments
    pub active: bool,
    /// Page size requested from the vendor
    pub page_size: u32,
    /// Hard cap on the number of tickers collected across pages
    pub max_results: usize,
    /// Accepted instrument types (empty accepts all)
    pub types: Vec<String>,
    /// Longest accepted symbol (filters out complex tickers)
    pub max_symbol_len: Option<usize>,
}

impl TickerQuery {
    /// Upper bound on the size of any enumerated universe.
    pub const MAX_UNIVERSE: usize = 5000;

    /// Whether a listed ticker satisfies the client-side filters.
    pub fn accepts(&self, info: &TickerInfo) -> bool {
        if self.active && !info.active {
            return false;
        }
        if !self.types.is_empty() {
            match &info.ticker_type {
                Some(t) if self.types.iter().any(|accepted| accepted == t) => {}
                _ => return false,
            }
        }
        if let Some(max_len) = self.max_symbol_len
            && info.symbol.as_str().len() > max_len
        {
            return false;
        }
        true
    }
}

impl Default for TickerQuery {
    fn default() -> Self {
        Self {
            market: "stocks".to_string(),
            active: true,
            page_size: 1000,
            max_results: Self::MAX_UNIVERSE,
            types: vec!["CS".to_string(), "ETF".to_string()],
            max_symbol_len: Some(5),
        }
    }
}

/// One entry of a ticker listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    /// Ticker symbol
    pub symbol: Symbol,
    /// Instrument name
    pub name: Option<String>,
    /// Market the instrument trades in
    pub market: Option<String>,
    /// Vendor instrument type code (e.g. `CS`, `ETF`)
    pub ticker_type: Option<String>,
    /// Whether the instrument is actively traded
    pub active: bool,
    /// Market capitalization, when the listing carries it
    pub market_cap: Option<f64>,
}

/// Reference data for a single instrument.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickerDetails {
    /// Ticker symbol
    pub symbol: Symbol,
    /// Instrument name
    pub name: Option<String>,
    /// Market capitalization
    pub market_cap: Option<f64>,
    /// Industry / sector description
    pub sector: Option<String>,
    /// Company description
    pub description: Option<String>,
    /// Company website
    pub homepage_url: Option<String>,
    /// Headcount
    pub total_employees: Option<u64>,
    /// Primary listing exchange
    pub primary_exchange: Option<String>,
}

/// Upstream "top percentage gainers" request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainerQuery {
    /// Market code (e.g. `US`)
    pub market: String,
    /// Accepted exchanges
    pub exchanges: Vec<String>,
    /// Minimum last price
    pub min_price: Option<f64>,
    /// Maximum last price
    pub max_price: Option<f64>,
    /// Minimum day change in percent
    pub min_change_percent: Option<f64>,
    /// Number of candidates requested
    pub limit: u32,
}

impl Default for GainerQuery {
    fn default() -> Self {
        Self {
            market: "US".to_string(),
            exchanges: vec!["NASDAQ".to_string(), "NYSE".to_string()],
            min_price: Some(1.0),
            max_price: Some(20.0),
            min_change_percent: Some(10.0),
            limit: 50,
        }
    }
}

/// Partial screen record produced by the gainers feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainerCandidate {
    /// Ticker symbol (without exchange suffix)
    pub symbol: Symbol,
    /// Instrument name
    pub name: Option<String>,
    /// Last price
    pub price: f64,
    /// Day change in percent
    pub change_percent: f64,
    /// Day volume, when reported
    pub volume: Option<f64>,
    /// Listing exchange
    pub exchange: Option<String>,
    /// Market capitalization
    pub market_cap: Option<f64>,
}
