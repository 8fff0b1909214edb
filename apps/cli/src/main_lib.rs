use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tickerlens_core::quotes::MarketDataClient;
use tickerlens_market_data::{
    DataProvider, HttpDataProvider, HttpProviderConfig, SyntheticDataGenerator,
};

use crate::config::{Config, LogFormat};

/// Install the global subscriber. `log` records from the library crates are
/// forwarded through tracing-subscriber's log bridge.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub fn build_provider(config: &Config) -> Arc<dyn DataProvider> {
    Arc::new(HttpDataProvider::new(HttpProviderConfig {
        base_url: config.api_base_url.clone(),
        timeout: config.request_timeout,
        movers_index: config.movers_index.clone(),
    }))
}

pub fn build_client(config: &Config, provider: Arc<dyn DataProvider>) -> Arc<MarketDataClient> {
    tracing::debug!(
        "Market data client: {} at {} (synthetic seed {})",
        provider.id(),
        config.api_base_url,
        config.synthetic_seed
    );
    Arc::new(MarketDataClient::new(
        provider,
        SyntheticDataGenerator::new(config.synthetic_seed),
    ))
}
