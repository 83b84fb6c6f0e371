//! EODHD response shapes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// `/screener` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ScreenerResponse {
    pub(crate) status: Option<String>,
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) data: Vec<ScreenerRow>,
}

/// One screener hit. The price and change columns have been published under
/// several names, so each spelling is captured and resolved afterwards.
#[derive(Debug, Deserialize)]
pub(crate) struct ScreenerRow {
    pub(crate) code: String,
    pub(crate) name: Option<String>,
    pub(crate) price: Option<f64>,
    pub(crate) last_price: Option<f64>,
    pub(crate) adjusted_close: Option<f64>,
    pub(crate) change_p: Option<f64>,
    pub(crate) change_pct: Option<f64>,
    pub(crate) volume: Option<f64>,
    pub(crate) exchange: Option<String>,
    pub(crate) market_capitalization: Option<f64>,
}

impl ScreenerRow {
    pub(crate) fn resolved_price(&self) -> Option<f64> {
        self.price.or(self.last_price).or(self.adjusted_close)
    }

    pub(crate) fn resolved_change(&self) -> Option<f64> {
        self.change_p.or(self.change_pct)
    }
}

/// `/fundamentals/{symbol}`; only the share statistics are read.
#[derive(Debug, Deserialize)]
pub(crate) struct FundamentalsResponse {
    #[serde(rename = "SharesStats")]
    pub(crate) shares_stats: Option<SharesStats>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SharesStats {
    #[serde(rename = "SharesFloat")]
    pub(crate) shares_float: Option<f64>,
}

/// `/intraday/{symbol}` is documented as a bare array but has also been
/// served wrapped in `{"data": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum IntradayResponse {
    Bars(Vec<IntradayRow>),
    Wrapped {
        #[serde(default)]
        data: Vec<IntradayRow>,
    },
}

impl IntradayResponse {
    pub(crate) fn into_rows(self) -> Vec<IntradayRow> {
        match self {
            Self::Bars(rows) | Self::Wrapped { data: rows } => rows,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IntradayRow {
    /// Unix seconds
    pub(crate) timestamp: Option<i64>,
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub(crate) datetime: Option<String>,
    pub(crate) volume: Option<f64>,
}

impl IntradayRow {
    pub(crate) fn time(&self) -> Option<DateTime<Utc>> {
        if let Some(secs) = self.timestamp {
            return DateTime::from_timestamp(secs, 0);
        }
        let raw = self.datetime.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// One row of `/eod/{symbol}`.
#[derive(Debug, Deserialize)]
pub(crate) struct EodRow {
    pub(crate) date: NaiveDate,
    pub(crate) open: Option<f64>,
    pub(crate) high: Option<f64>,
    pub(crate) low: Option<f64>,
    pub(crate) close: Option<f64>,
    pub(crate) volume: Option<f64>,
}
