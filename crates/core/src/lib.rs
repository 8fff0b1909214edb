//! Tickerlens Core - live market data interaction.
//!
//! This crate sits between a rendering layer and the market-data crate:
//!
//! - [`quotes`] - The fallback facade ([`MarketDataClient`]) and source traits
//! - [`search`] - Debounced, race-safe type-ahead search
//! - [`movers`] - Non-overlapping periodic polling of the movers feed
//! - [`prices`] - Price detail loading
//! - [`analytics`] - Pure statistics over a price series

pub mod analytics;
pub mod constants;
pub mod errors;
pub mod movers;
pub mod prices;
pub mod quotes;
pub mod search;
pub mod utils;

pub use errors::Error;
pub use errors::Result;

pub use quotes::{DirectSource, MarketDataClient, MoversSource, PriceSource, SymbolSearch};
