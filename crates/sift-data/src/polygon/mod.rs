//! Polygon.io market data.
//!
//! Serves the ticker universe, previous-day aggregates (used as quotes),
//! technical indicators and reference details.

mod client;
mod wire;

pub use client::{DEFAULT_RATE_LIMIT, PolygonClient};
