//! Market data access for the interaction layer.
//!
//! - [`client`] - Fallback facade over a provider and the synthetic generator
//! - [`source`] - Source traits consumed by search, polling and detail views
//!
//! ```text
//! SearchController / PollingScheduler / PriceDetailLoader
//!                      |
//!          SymbolSearch / MoversSource / PriceSource
//!                      |
//!       MarketDataClient (fallback)  |  DirectSource (no fallback)
//!                      |
//!        DataProvider  +  SyntheticDataGenerator
//! ```

pub mod client;
pub mod source;


pub use client::MarketDataClient;
pub use source::{DirectSource, MoversSource, PriceSource, SymbolSearch};
