//! Market data models
//!
//! This module contains the data types shared by providers, the synthetic
//! generator and the client facade:
//! - `lookup` - The closed set of remote lookups (search, movers, prices)
//! - `search` - Symbol search results (SearchResult)
//! - `mover` - Index movers (Mover)
//! - `price` - OHLCV observations and price queries (PricePoint, PriceSeries, PriceQuery)
//! - `origin` - Whether data came from upstream or from the fallback generator

mod lookup;
mod mover;
mod origin;
mod price;
mod search;

pub use lookup::Lookup;
pub use mover::Mover;
pub use origin::{DataOrigin, Sourced};
pub use price::{Granularity, PricePoint, PriceQuery, PriceSeries};
pub use search::SearchResult;
