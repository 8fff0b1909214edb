use std::str::FromStr;
use std::time::Duration;

use tickerlens_market_data::provider::http::{DEFAULT_BASE_URL, DEFAULT_MOVERS_INDEX};
use tickerlens_market_data::provider::synthetic::DEFAULT_SEED;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub movers_index: String,
    pub synthetic_seed: u64,
    pub poll_interval: Duration,
    pub search_debounce: Duration,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or unparsable values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str, default: u64| -> u64 {
            lookup(key)
                .and_then(|v| u64::from_str(v.trim()).ok())
                .unwrap_or(default)
        };

        let api_base_url = lookup("TICKERLENS_API_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let movers_index = lookup("TICKERLENS_MOVERS_INDEX")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MOVERS_INDEX.into());
        let log_format = match lookup("TICKERLENS_LOG_FORMAT") {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            api_base_url,
            request_timeout: Duration::from_millis(parsed("TICKERLENS_REQUEST_TIMEOUT_MS", 10_000)),
            movers_index,
            synthetic_seed: parsed("TICKERLENS_SYNTHETIC_SEED", DEFAULT_SEED),
            poll_interval: Duration::from_secs(parsed("TICKERLENS_POLL_INTERVAL_SECS", 30).max(1)),
            search_debounce: Duration::from_millis(parsed("TICKERLENS_SEARCH_DEBOUNCE_MS", 300)),
            log_format,
        }
    }
}
