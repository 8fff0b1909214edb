//! Price detail loader.
//!
//! Fetches one symbol's series and bundles it with everything a detail view
//! renders: first-to-last change, range statistics, the latest session quote
//! and the data origin.

use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

use tickerlens_market_data::{DataOrigin, Granularity, PriceQuery, PriceSeries};

use crate::analytics::{self, LatestQuote, PriceChange, RangeStats};
use crate::constants::DETAIL_SERIES_LIMIT;
use crate::errors::{Error, Result};
use crate::quotes::PriceSource;

/// Everything the detail view shows for one symbol.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDetail {
    pub symbol: String,
    pub series: PriceSeries,
    pub change: PriceChange,
    pub stats: Option<RangeStats>,
    pub latest: Option<LatestQuote>,
    pub origin: Option<DataOrigin>,
    pub loading: bool,
    /// Set when the source failed; `series` is then empty.
    pub error: Option<String>,
}

pub struct PriceDetailLoader {
    source: Arc<dyn PriceSource>,
    query: PriceQuery,
}

impl PriceDetailLoader {
    /// Loader with the detail view's default query: one day of intraday
    /// points, at most 50.
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self::with_query(
            source,
            PriceQuery::new(1, Granularity::Intraday, DETAIL_SERIES_LIMIT),
        )
    }

    pub fn with_query(source: Arc<dyn PriceSource>, query: PriceQuery) -> Self {
        Self { source, query }
    }

    pub fn query(&self) -> &PriceQuery {
        &self.query
    }

    /// Placeholder shown while `load` runs.
    pub fn pending(&self, symbol: &str) -> PriceDetail {
        PriceDetail {
            symbol: symbol.to_string(),
            series: Vec::new(),
            change: PriceChange::FLAT,
            stats: None,
            latest: None,
            origin: None,
            loading: true,
            error: None,
        }
    }

    pub async fn load(&self, symbol: &str) -> Result<PriceDetail> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(Error::InvalidInput("symbol must not be empty".to_string()));
        }

        let mut detail = self.pending(symbol);
        detail.loading = false;

        match self.source.fetch_prices(symbol, &self.query).await {
            Ok(sourced) => {
                debug!(
                    "Loaded {} price points for {} ({:?})",
                    sourced.data.len(),
                    symbol,
                    sourced.origin
                );
                detail.change = analytics::change(&sourced.data);
                detail.stats = analytics::range_stats(&sourced.data);
                detail.latest = analytics::latest_quote(&sourced.data);
                detail.origin = Some(sourced.origin);
                detail.series = sourced.data;
            }
            Err(e) => {
                warn!("Failed to load prices for {}: {}", symbol, e);
                detail.error = Some(e.to_string());
            }
        }

        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::{DirectSource, MarketDataClient};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tickerlens_market_data::{
        DataProvider, Lookup, MarketDataError, Mover, SearchResult, Sourced,
        SyntheticDataGenerator,
    };

    /// Records the query and always fails with a transport error.
    #[derive(Default)]
    struct OfflineProvider {
        queries: Mutex<Vec<(String, PriceQuery)>>,
    }

    #[async_trait]
    impl DataProvider for OfflineProvider {
        fn id(&self) -> &'static str {
            "OFFLINE"
        }

        async fn search(
            &self,
            _keyword: &str,
            _limit: usize,
        ) -> std::result::Result<Vec<SearchResult>, MarketDataError> {
            Err(MarketDataError::transport(Lookup::Search, "offline"))
        }

        async fn movers(&self) -> std::result::Result<Vec<Mover>, MarketDataError> {
            Err(MarketDataError::transport(Lookup::Movers, "offline"))
        }

        async fn prices(
            &self,
            symbol: &str,
            query: &PriceQuery,
        ) -> std::result::Result<PriceSeries, MarketDataError> {
            self.queries
                .lock()
                .unwrap()
                .push((symbol.to_string(), query.clone()));
            Err(MarketDataError::transport(Lookup::Prices, "offline"))
        }
    }

    #[test]
    fn test_pending_placeholder() {
        let provider = Arc::new(OfflineProvider::default());
        let loader = PriceDetailLoader::new(Arc::new(DirectSource::new(provider)));
        let detail = loader.pending("TCS");
        assert!(detail.loading);
        assert!(detail.series.is_empty());
        assert!(detail.error.is_none());
    }

    #[tokio::test]
    async fn test_fallback_fills_detail() {
        let provider = Arc::new(OfflineProvider::default());
        let client = MarketDataClient::new(provider.clone(), SyntheticDataGenerator::new(3));
        let loader = PriceDetailLoader::new(Arc::new(client));

        let detail = loader.load(" INFY ").await.unwrap();
        assert_eq!(detail.symbol, "INFY");
        assert!(!detail.loading);
        assert!(detail.error.is_none());
        assert_eq!(detail.origin, Some(DataOrigin::Synthetic));
        assert_eq!(detail.series.len(), 50);
        assert!(detail.stats.is_some());
        assert_eq!(
            detail.latest.unwrap().price,
            detail.series.last().unwrap().close
        );

        let queries = provider.queries.lock().unwrap();
        assert_eq!(queries[0].0, "INFY");
        assert_eq!(queries[0].1, PriceQuery::new(1, Granularity::Intraday, 50));
    }

    #[tokio::test]
    async fn test_direct_source_failure_sets_error() {
        let provider = Arc::new(OfflineProvider::default());
        let loader = PriceDetailLoader::new(Arc::new(DirectSource::new(provider)));

        let detail = loader.load("TCS").await.unwrap();
        assert!(!detail.loading);
        assert!(detail.series.is_empty());
        assert!(detail.stats.is_none());
        assert_eq!(detail.change, PriceChange::FLAT);
        assert!(detail.error.unwrap().contains("offline"));
    }

    #[tokio::test]
    async fn test_blank_symbol_is_rejected() {
        let provider = Arc::new(OfflineProvider::default());
        let loader = PriceDetailLoader::new(Arc::new(DirectSource::new(provider.clone())));

        let err = loader.load("  ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(provider.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_live_series_passes_through() {
        struct FixedSource;

        #[async_trait]
        impl PriceSource for FixedSource {
            async fn fetch_prices(
                &self,
                _symbol: &str,
                _query: &PriceQuery,
            ) -> Result<Sourced<PriceSeries>> {
                Ok(Sourced::live(
                    SyntheticDataGenerator::new(9).prices("FIXED"),
                ))
            }
        }

        let detail = PriceDetailLoader::new(Arc::new(FixedSource))
            .load("FIXED")
            .await
            .unwrap();
        assert_eq!(detail.origin, Some(DataOrigin::Live));
        assert_eq!(detail.series.len(), 50);
    }
}
