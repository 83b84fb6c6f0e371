//! Chat alert text.

use crate::table::gainer_line;
use serde::{Deserialize, Serialize};
use sift_data::Symbol;
use sift_screen::ScreenRecord;
use std::fmt;

/// Absolute 24h move, in percent, that triggers a price alert.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 5.0;

/// A large price move worth notifying about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    /// Instrument that moved
    pub symbol: Symbol,
    /// Move over the period, in percent
    pub change_percent: f64,
    /// Current price
    pub price: f64,
}

impl PriceAlert {
    /// Alert for `record` when its absolute move reaches `threshold`.
    pub fn check(record: &ScreenRecord, threshold: f64) -> Option<Self> {
        (record.change_percent.abs() >= threshold).then(|| Self {
            symbol: record.symbol.clone(),
            change_percent: record.change_percent,
            price: record.price,
        })
    }
}

impl fmt::Display for PriceAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} price changed {:.2}% in 24h. Current price: ${}",
            capitalize(self.symbol.as_str()),
            self.change_percent,
            self.price
        )
    }
}

/// Alerts for every record whose absolute move reaches `threshold`, in
/// record order.
pub fn price_alerts(records: &[ScreenRecord], threshold: f64) -> Vec<PriceAlert> {
    records
        .iter()
        .filter_map(|record| PriceAlert::check(record, threshold))
        .collect()
}

/// Message body listing gainer-scan hits, one per line.
pub fn gainer_digest(records: &[ScreenRecord]) -> String {
    if records.is_empty() {
        return "No stocks found matching criteria.".to_string();
    }
    records
        .iter()
        .map(gainer_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}
