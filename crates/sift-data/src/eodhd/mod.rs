//! EODHD market data.
//!
//! Serves the top-gainers screener, share-structure fundamentals, intraday
//! volume history and end-of-day quotes.

mod client;
mod wire;

pub use client::{DEFAULT_RATE_LIMIT, EodhdClient};
