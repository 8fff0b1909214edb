//! Market Data Client - fallback facade for the market-data crate.
//!
//! Every lookup goes to the upstream provider first. When the provider fails,
//! or its circuit is open, the client logs a warning and answers with
//! synthetic data for the same inputs. Callers never see a network failure.

use std::future::Future;
use std::sync::Arc;

use log::{debug, warn};

use tickerlens_market_data::{
    CircuitBreaker, CircuitBreakerConfig, DataProvider, FailureClass, Lookup, MarketDataError,
    Mover, PriceQuery, PriceSeries, SearchResult, SeriesValidator, Sourced,
    SyntheticDataGenerator,
};

/// Facade combining an upstream provider with synthetic fallback data.
pub struct MarketDataClient {
    provider: Arc<dyn DataProvider>,
    synthetic: SyntheticDataGenerator,
    circuit_breaker: CircuitBreaker,
    validator: SeriesValidator,
}

impl MarketDataClient {
    pub fn new(provider: Arc<dyn DataProvider>, synthetic: SyntheticDataGenerator) -> Self {
        Self {
            provider,
            synthetic,
            circuit_breaker: CircuitBreaker::new(),
            validator: SeriesValidator::new(),
        }
    }

    /// Replace the circuit breaker settings.
    pub fn with_circuit_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.circuit_breaker = CircuitBreaker::with_config(config);
        self
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.id()
    }

    pub fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.circuit_breaker
    }

    /// Search symbols, at most `limit` results.
    pub async fn search(&self, keyword: &str, limit: usize) -> Vec<SearchResult> {
        self.search_sourced(keyword, limit).await.into_inner()
    }

    /// Movers of the configured index.
    pub async fn movers(&self) -> Vec<Mover> {
        self.movers_sourced().await.into_inner()
    }

    /// Price series for `symbol`.
    pub async fn prices(&self, symbol: &str, query: &PriceQuery) -> PriceSeries {
        self.prices_sourced(symbol, query).await.into_inner()
    }

    /// Like [`search`](Self::search), tagged with where the results came from.
    ///
    /// A blank keyword returns an empty list without consulting any source.
    pub async fn search_sourced(&self, keyword: &str, limit: usize) -> Sourced<Vec<SearchResult>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Sourced::live(Vec::new());
        }

        let result = self
            .call_upstream(Lookup::Search, self.provider.search(keyword, limit))
            .await;

        let mut sourced = match result {
            Ok(results) => Sourced::live(results),
            Err(e) => {
                warn!(
                    "{} failed for keyword '{}', serving synthetic results: {}",
                    Lookup::Search,
                    keyword,
                    e
                );
                Sourced::synthetic(self.synthetic.search(keyword))
            }
        };
        sourced.data.truncate(limit);
        sourced
    }

    pub async fn movers_sourced(&self) -> Sourced<Vec<Mover>> {
        match self
            .call_upstream(Lookup::Movers, self.provider.movers())
            .await
        {
            Ok(movers) => Sourced::live(movers),
            Err(e) => {
                warn!(
                    "{} failed, serving synthetic movers: {}",
                    Lookup::Movers,
                    e
                );
                Sourced::synthetic(self.synthetic.movers())
            }
        }
    }

    pub async fn prices_sourced(&self, symbol: &str, query: &PriceQuery) -> Sourced<PriceSeries> {
        let result = self
            .call_upstream(Lookup::Prices, self.provider.prices(symbol, query))
            .await
            .and_then(|series| self.sanitize(symbol, series));

        match result {
            Ok(series) => Sourced::live(series),
            Err(e) => {
                warn!(
                    "{} failed for symbol '{}', serving synthetic series: {}",
                    Lookup::Prices,
                    symbol,
                    e
                );
                Sourced::synthetic(self.synthetic.prices(symbol))
            }
        }
    }

    /// Drop malformed points; a non-empty series with nothing left is a failure.
    fn sanitize(&self, symbol: &str, series: PriceSeries) -> Result<PriceSeries, MarketDataError> {
        let received = series.len();
        let kept = self.validator.sanitize(symbol, series);

        if received > 0 && kept.is_empty() {
            return Err(MarketDataError::ValidationFailed {
                message: format!("all {} points for {} were malformed", received, symbol),
            });
        }
        Ok(kept)
    }

    /// Run one upstream request through the circuit breaker.
    async fn call_upstream<T, F>(&self, lookup: Lookup, request: F) -> Result<T, MarketDataError>
    where
        F: Future<Output = Result<T, MarketDataError>>,
    {
        if !self.circuit_breaker.is_allowed(lookup) {
            debug!(
                "Skipping {} on {}: circuit open",
                lookup,
                self.provider.id()
            );
            return Err(MarketDataError::CircuitOpen { operation: lookup });
        }

        match request.await {
            Ok(value) => {
                self.circuit_breaker.record_success(lookup);
                Ok(value)
            }
            Err(e) => {
                if e.failure_class() == FailureClass::Penalize {
                    self.circuit_breaker.record_failure(lookup);
                }
                Err(e)
            }
        }
    }
}
