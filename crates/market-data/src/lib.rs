//! Tickerlens Market Data Crate
//!
//! Access to the upstream market data source and the synthetic data that
//! stands in for it.
//!
//! # Overview
//!
//! - Three remote lookups: symbol search, index movers, price series
//! - Tagged envelope decoding with tolerant handling of unknown shapes
//! - Deterministic, seeded fallback data
//! - Circuit breaking and price series validation
//!
//! # Architecture
//!
//! ```text
//! +------------------+        +------------------------+
//! |   DataProvider   |  ...   | SyntheticDataGenerator |
//! +------------------+        +------------------------+
//!          |                              ^
//!          v                              |  (fallback, in tickerlens-core)
//! +------------------+                    |
//! | HttpDataProvider | --- failure -------+
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |     Envelope     |  (Bare | Keyed | Unrecognized)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`SearchResult`], [`Mover`], [`PricePoint`] - normalized upstream data
//! - [`PriceQuery`] - range, granularity and limit of a price lookup
//! - [`Lookup`] - names the remote operation in errors and logs
//! - [`Sourced`] - a value tagged with its [`DataOrigin`]

pub mod errors;
pub mod models;
pub mod provider;
pub mod resilience;

pub use errors::{FailureClass, MarketDataError};

pub use models::{
    DataOrigin, Granularity, Lookup, Mover, PricePoint, PriceQuery, PriceSeries, SearchResult,
    Sourced,
};

pub use provider::{DataProvider, HttpDataProvider, HttpProviderConfig, SyntheticDataGenerator};

pub use resilience::{
    CircuitBreaker, CircuitBreakerConfig, CircuitState, SeriesValidator, ValidatorConfig,
};
