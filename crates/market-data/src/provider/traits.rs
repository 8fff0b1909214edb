//! Data provider trait definition.
//!
//! This module defines the `DataProvider` trait that every upstream
//! market data source implements.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Mover, PriceQuery, PriceSeries, SearchResult};

/// Trait for upstream market data sources.
///
/// Each method issues at most one remote request and reports failures as
/// [`MarketDataError::Transport`] or [`MarketDataError::Status`]. Providers
/// never fall back on their own; that is the client facade's job.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use tickerlens_market_data::provider::DataProvider;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl DataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     // ... implement the three lookups
/// }
/// ```
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Identifier used in log lines.
    fn id(&self) -> &'static str;

    /// Search symbols by keyword.
    ///
    /// A keyword that is empty after trimming returns `Ok(vec![])` without
    /// touching the network.
    async fn search(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>, MarketDataError>;

    /// Fetch the index movers list.
    async fn movers(&self) -> Result<Vec<Mover>, MarketDataError>;

    /// Fetch a price series for a symbol, ordered by timestamp ascending.
    async fn prices(
        &self,
        symbol: &str,
        query: &PriceQuery,
    ) -> Result<PriceSeries, MarketDataError>;
}
