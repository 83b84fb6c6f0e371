//! CoinGecko crypto market data.
//!
//! Coins are identified by their CoinGecko id (`bitcoin`, `ethereum`), which
//! is used as the [`Symbol`](crate::Symbol) throughout.

mod client;
mod wire;

pub use client::{CoinGeckoClient, DEFAULT_RATE_LIMIT};
