#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sift/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod coingecko;
pub mod config;
pub mod eodhd;
pub mod error;
pub mod http;
pub mod model;
pub mod polygon;
pub mod source;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use coingecko::CoinGeckoClient;
pub use eodhd::EodhdClient;
pub use error::{DataError, Result};
pub use model::{
    BarInterval, GainerCandidate, GainerQuery, IndicatorKind, IndicatorSpec, OhlcBar, Quote,
    Symbol, TickerDetails, TickerInfo, TickerQuery, Timespan, VolumeBar,
};
pub use polygon::PolygonClient;
pub use source::{
    FundamentalsSource, GainersSource, IndicatorSource, QuoteSource, ReferenceSource,
    TickerSource, VolumeSource,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
