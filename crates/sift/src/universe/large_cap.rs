//! Fifty widely held US large caps.

use crate::universe::gics::GicsSector;
use sift_data::Symbol;
use std::collections::HashMap;

/// A universe member with its sector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Ticker
    pub symbol: Symbol,
    /// GICS sector
    pub sector: GicsSector,
}

/// Default screening universe: fifty popular large-cap tickers.
#[derive(Debug, Clone)]
pub struct LargeCapUniverse {
    members: Vec<Member>,
}

const MEMBERS: [(&str, GicsSector); 50] = {
    use GicsSector::*;
    [
        ("AAPL", InformationTechnology),
        ("MSFT", InformationTechnology),
        ("GOOGL", CommunicationServices),
        ("AMZN", ConsumerDiscretionary),
        ("NVDA", InformationTechnology),
        ("META", CommunicationServices),
        ("TSLA", ConsumerDiscretionary),
        ("BRK.B", Financials),
        ("LLY", HealthCare),
        ("V", Financials),
        ("JPM", Financials),
        ("UNH", HealthCare),
        ("XOM", Energy),
        ("MA", Financials),
        ("PG", ConsumerStaples),
        ("JNJ", HealthCare),
        ("HD", ConsumerDiscretionary),
        ("CVX", Energy),
        ("ABBV", HealthCare),
        ("MRK", HealthCare),
        ("COST", ConsumerStaples),
        ("BAC", Financials),
        ("PEP", ConsumerStaples),
        ("TMO", HealthCare),
        ("AVGO", InformationTechnology),
        ("WMT", ConsumerStaples),
        ("LIN", Materials),
        ("NFLX", CommunicationServices),
        ("DIS", CommunicationServices),
        ("ABT", HealthCare),
        ("CRM", InformationTechnology),
        ("ACN", InformationTechnology),
        ("CSCO", InformationTechnology),
        ("AMD", InformationTechnology),
        ("DHR", HealthCare),
        ("VZ", CommunicationServices),
        ("ADBE", InformationTechnology),
        ("TXN", InformationTechnology),
        ("NEE", Utilities),
        ("PM", ConsumerStaples),
        ("RTX", Industrials),
        ("NKE", ConsumerDiscretionary),
        ("T", CommunicationServices),
        ("LOW", ConsumerDiscretionary),
        ("SPGI", Financials),
        ("QCOM", InformationTechnology),
        ("UNP", Industrials),
        ("HON", Industrials),
        ("AMAT", InformationTechnology),
        ("AXP", Financials),
    ]
};

impl LargeCapUniverse {
    /// The default fifty members, in screening order.
    pub fn new() -> Self {
        Self {
            members: MEMBERS
                .iter()
                .map(|(symbol, sector)| Member {
                    symbol: Symbol::new(*symbol),
                    sector: *sector,
                })
                .collect(),
        }
    }

    /// Restrict the universe to one sector, keeping order.
    pub fn in_sector(mut self, sector: GicsSector) -> Self {
        self.members.retain(|member| member.sector == sector);
        self
    }

    /// All members.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Sector of `symbol`, if it is a member.
    pub fn sector(&self, symbol: &str) -> Option<GicsSector> {
        self.members
            .iter()
            .find(|member| member.symbol.as_str() == symbol)
            .map(|member| member.sector)
    }

    /// Member count per sector.
    pub fn sector_counts(&self) -> HashMap<GicsSector, usize> {
        let mut counts = HashMap::new();
        for member in &self.members {
            *counts.entry(member.sector).or_insert(0) += 1;
        }
        counts
    }
}

impl Default for LargeCapUniverse {
    fn default() -> Self {
        Self::new()
    }
}
