//! HTTP provider for the upstream market data API.
//!
//! # API Endpoints
//!
//! - Search: `{base}/search?keyword={q}&length={n}`
//! - Movers: `{base}/index/{index}/movers/`
//! - Prices: `{base}/stock/{symbol}/prices?days={d}&type={INTRADAY|DAILY}&limit={n}`
//!
//! # Response Format
//!
//! Each endpoint answers with either a bare JSON array or an object wrapping
//! the array; see [`crate::provider::envelope`].

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::{Lookup, Mover, PricePoint, PriceQuery, PriceSeries, SearchResult};
use crate::provider::envelope::decode_list;
use crate::provider::DataProvider;

/// Upstream origin used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://portal.tradebrains.in/api/assignment";

/// Index whose movers are listed.
pub const DEFAULT_MOVERS_INDEX: &str = "NIFTY";

const PROVIDER_ID: &str = "TRADEBRAINS";

/// Default HTTP request timeout
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`HttpDataProvider`].
#[derive(Clone, Debug)]
pub struct HttpProviderConfig {
    /// Base origin every endpoint path is appended to.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Index name used by the movers endpoint.
    pub movers_index: String,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            movers_index: DEFAULT_MOVERS_INDEX.to_string(),
        }
    }
}

/// Data provider backed by the upstream REST API.
///
/// # Example
///
/// ```ignore
/// let provider = HttpDataProvider::new(HttpProviderConfig::default());
/// let results = provider.search("TCS", 8).await?;
/// ```
pub struct HttpDataProvider {
    client: Client,
    config: HttpProviderConfig,
}

impl HttpDataProvider {
    /// Create a provider for the configured origin.
    pub fn new(config: HttpProviderConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    pub fn config(&self) -> &HttpProviderConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn search_url(&self, keyword: &str, limit: usize) -> String {
        self.endpoint(&format!(
            "search?keyword={}&length={}",
            urlencoding::encode(keyword),
            limit
        ))
    }

    fn movers_url(&self) -> String {
        self.endpoint(&format!(
            "index/{}/movers/",
            urlencoding::encode(&self.config.movers_index)
        ))
    }

    fn prices_url(&self, symbol: &str, query: &PriceQuery) -> String {
        self.endpoint(&format!(
            "stock/{}/prices?days={}&type={}&limit={}",
            urlencoding::encode(symbol),
            query.days,
            query.granularity.as_str(),
            query.limit
        ))
    }

    /// GET a URL and parse the body as JSON.
    async fn fetch_json(&self, lookup: Lookup, url: &str) -> Result<Value, MarketDataError> {
        debug!("{} {} request: GET {}", PROVIDER_ID, lookup, url);

        let response = self.client.get(url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("request timeout: {}", e)
            } else if e.is_connect() {
                format!("connection failed: {}", e)
            } else {
                format!("request failed: {}", e)
            };
            MarketDataError::transport(lookup, message)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status {
                operation: lookup,
                code: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            MarketDataError::transport(lookup, format!("failed to read response body: {}", e))
        })?;

        serde_json::from_str(&body)
            .map_err(|e| MarketDataError::transport(lookup, format!("malformed payload: {}", e)))
    }
}

#[async_trait]
impl DataProvider for HttpDataProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn search(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>, MarketDataError> {
        if keyword.trim().is_empty() {
            return Ok(Vec::new());
        }

        let payload = self
            .fetch_json(Lookup::Search, &self.search_url(keyword, limit))
            .await?;
        decode_list(payload, Lookup::Search)
    }

    async fn movers(&self) -> Result<Vec<Mover>, MarketDataError> {
        let payload = self.fetch_json(Lookup::Movers, &self.movers_url()).await?;
        decode_list(payload, Lookup::Movers)
    }

    async fn prices(
        &self,
        symbol: &str,
        query: &PriceQuery,
    ) -> Result<PriceSeries, MarketDataError> {
        let payload = self
            .fetch_json(Lookup::Prices, &self.prices_url(symbol, query))
            .await?;
        decode_list::<PricePoint>(payload, Lookup::Prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Granularity;

    fn provider(base_url: &str) -> HttpDataProvider {
        HttpDataProvider::new(HttpProviderConfig {
            base_url: base_url.to_string(),
            ..HttpProviderConfig::default()
        })
    }

    #[test]
    fn test_provider_id() {
        assert_eq!(provider("http://localhost").id(), "TRADEBRAINS");
    }

    #[test]
    fn test_search_url_encodes_keyword() {
        let provider = provider("https://api.example.test/v1/");
        assert_eq!(
            provider.search_url("HDFC BANK&co", 8),
            "https://api.example.test/v1/search?keyword=HDFC%20BANK%26co&length=8"
        );
    }

    #[test]
    fn test_movers_url_uses_configured_index() {
        let provider = HttpDataProvider::new(HttpProviderConfig {
            base_url: "https://api.example.test".to_string(),
            movers_index: "SENSEX".to_string(),
            ..HttpProviderConfig::default()
        });
        assert_eq!(
            provider.movers_url(),
            "https://api.example.test/index/SENSEX/movers/"
        );
    }

    #[test]
    fn test_prices_url() {
        let provider = provider("https://api.example.test");
        let query = PriceQuery::new(5, Granularity::Daily, 50);
        assert_eq!(
            provider.prices_url("M&M", &query),
            "https://api.example.test/stock/M%26M/prices?days=5&type=DAILY&limit=50"
        );
    }

    #[test]
    fn test_default_config() {
        let config = HttpProviderConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.movers_index, "NIFTY");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
