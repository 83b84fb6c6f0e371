//! Polygon.io response shapes.

use serde::Deserialize;

/// Page of `/v3/reference/tickers`.
#[derive(Debug, Deserialize)]
pub(crate) struct TickersPage {
    #[serde(default)]
    pub(crate) results: Vec<TickerRow>,
    pub(crate) next_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TickerRow {
    pub(crate) ticker: String,
    pub(crate) name: Option<String>,
    pub(crate) market: Option<String>,
    #[serde(rename = "type")]
    pub(crate) ticker_type: Option<String>,
    #[serde(default)]
    pub(crate) active: bool,
    pub(crate) market_cap: Option<f64>,
}

/// `/v2/aggs/ticker/{ticker}/prev`.
#[derive(Debug, Deserialize)]
pub(crate) struct AggsResponse {
    #[serde(default)]
    pub(crate) results: Vec<AggBar>,
}

/// Aggregate bar. Polygon abbreviates every field.
#[derive(Debug, Deserialize)]
pub(crate) struct AggBar {
    pub(crate) o: Option<f64>,
    pub(crate) h: Option<f64>,
    pub(crate) l: Option<f64>,
    pub(crate) c: Option<f64>,
    pub(crate) v: Option<f64>,
    /// Period start, unix milliseconds
    pub(crate) t: Option<i64>,
}

/// `/v1/indicators/{kind}/{ticker}`.
#[derive(Debug, Deserialize)]
pub(crate) struct IndicatorResponse {
    pub(crate) results: Option<IndicatorResults>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IndicatorResults {
    #[serde(default)]
    pub(crate) values: Vec<IndicatorValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IndicatorValue {
    pub(crate) value: Option<f64>,
}

/// `/v3/reference/tickers/{ticker}`.
#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub(crate) results: Option<DetailsRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsRow {
    pub(crate) name: Option<String>,
    pub(crate) market_cap: Option<f64>,
    pub(crate) sic_description: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) homepage_url: Option<String>,
    pub(crate) total_employees: Option<u64>,
    pub(crate) primary_exchange: Option<String>,
}
