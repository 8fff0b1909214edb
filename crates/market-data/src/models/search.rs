//! Search result models for symbol lookup.

use serde::{Deserialize, Serialize};

/// Result from a ticker/symbol search.
///
/// `symbol` is the natural key within one result list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Symbol/ticker (e.g., "RELIANCE", "TCS")
    pub symbol: String,

    /// Display name (e.g., "Tata Consultancy Services")
    pub name: String,

    /// Exchange name (e.g., "NSE"); empty when the upstream omits it
    #[serde(default)]
    pub exchange: String,

    /// Sector (e.g., "IT Services"); empty when the upstream omits it
    #[serde(default)]
    pub sector: String,
}

impl SearchResult {
    /// Create a new search result.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        exchange: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: exchange.into(),
            sector: sector.into(),
        }
    }

    /// Case-insensitive substring match on symbol or name.
    pub fn matches(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.symbol.to_lowercase().contains(&needle) || self.name.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_exchange_and_sector_default_to_empty() {
        let result: SearchResult =
            serde_json::from_str(r#"{"symbol":"TCS","name":"Tata Consultancy Services"}"#).unwrap();
        assert_eq!(result.symbol, "TCS");
        assert!(result.exchange.is_empty());
        assert!(result.sector.is_empty());
    }

    #[test]
    fn test_matches_symbol_or_name_ignoring_case() {
        let result = SearchResult::new("INFY", "Infosys Limited", "NSE", "IT Services");
        assert!(result.matches("inf"));
        assert!(result.matches("LIMITED"));
        assert!(!result.matches("tcs"));
    }
}
