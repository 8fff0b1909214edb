//! Source traits for the interaction layer.
//!
//! Search always goes through the fallback facade, so [`SymbolSearch`] is
//! infallible. Movers and prices may also be read straight from a provider
//! with [`DirectSource`], which surfaces upstream failures to the caller.

use std::sync::Arc;

use async_trait::async_trait;

use tickerlens_market_data::{
    DataProvider, Mover, PriceQuery, PriceSeries, SearchResult, Sourced,
};

use crate::errors::Result;
use crate::quotes::MarketDataClient;

/// Keyword search used by the type-ahead controller.
#[async_trait]
pub trait SymbolSearch: Send + Sync {
    async fn search_symbols(&self, keyword: &str, limit: usize) -> Sourced<Vec<SearchResult>>;
}

/// Movers list used by the polling scheduler.
#[async_trait]
pub trait MoversSource: Send + Sync {
    async fn fetch_movers(&self) -> Result<Sourced<Vec<Mover>>>;
}

/// Price series used by the detail loader.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_prices(&self, symbol: &str, query: &PriceQuery) -> Result<Sourced<PriceSeries>>;
}

#[async_trait]
impl SymbolSearch for MarketDataClient {
    async fn search_symbols(&self, keyword: &str, limit: usize) -> Sourced<Vec<SearchResult>> {
        self.search_sourced(keyword, limit).await
    }
}

#[async_trait]
impl MoversSource for MarketDataClient {
    async fn fetch_movers(&self) -> Result<Sourced<Vec<Mover>>> {
        Ok(self.movers_sourced().await)
    }
}

#[async_trait]
impl PriceSource for MarketDataClient {
    async fn fetch_prices(&self, symbol: &str, query: &PriceQuery) -> Result<Sourced<PriceSeries>> {
        Ok(self.prices_sourced(symbol, query).await)
    }
}

/// Reads a provider without any fallback.
pub struct DirectSource {
    provider: Arc<dyn DataProvider>,
}

impl DirectSource {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl MoversSource for DirectSource {
    async fn fetch_movers(&self) -> Result<Sourced<Vec<Mover>>> {
        Ok(Sourced::live(self.provider.movers().await?))
    }
}

#[async_trait]
impl PriceSource for DirectSource {
    async fn fetch_prices(&self, symbol: &str, query: &PriceQuery) -> Result<Sourced<PriceSeries>> {
        Ok(Sourced::live(self.provider.prices(symbol, query).await?))
    }
}
