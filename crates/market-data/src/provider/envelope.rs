//! Response envelope decoding.
//!
//! The upstream wraps result arrays inconsistently: some responses are a bare
//! JSON array, others an object carrying the array under a lookup-specific key
//! (`results`/`data` for search, `movers`, `prices`). Decoding is a two-step
//! process: [`Envelope::classify`] tags the payload shape, then
//! [`decode_list`] turns the tagged items into typed values.

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::Lookup;

/// The closed set of payload shapes the upstream is known to produce.
#[derive(Debug, PartialEq)]
pub enum Envelope {
    /// The payload is the result array itself.
    Bare(Vec<Value>),
    /// The payload is an object carrying the array under `key`.
    Keyed { key: &'static str, items: Vec<Value> },
    /// Anything else.
    Unrecognized,
}

impl Envelope {
    /// Tag a payload against the envelope keys accepted for `lookup`.
    ///
    /// Keys are tried in order; the first one holding an array wins.
    pub fn classify(payload: Value, lookup: Lookup) -> Self {
        match payload {
            Value::Array(items) => Self::Bare(items),
            Value::Object(mut object) => lookup
                .envelope_keys()
                .iter()
                .find_map(|key| match object.remove(*key) {
                    Some(Value::Array(items)) => Some(Self::Keyed { key: *key, items }),
                    _ => None,
                })
                .unwrap_or(Self::Unrecognized),
            _ => Self::Unrecognized,
        }
    }

    /// Items carried by the envelope; empty for an unrecognized shape.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Self::Bare(items) | Self::Keyed { items, .. } => items,
            Self::Unrecognized => Vec::new(),
        }
    }
}

/// Normalize a raw payload into an ordered list of `T`.
///
/// An unrecognized shape yields an empty list and a warning. Items that do
/// not decode as `T` are a malformed payload and fail the whole lookup.
pub fn decode_list<T: DeserializeOwned>(
    payload: Value,
    lookup: Lookup,
) -> Result<Vec<T>, MarketDataError> {
    let envelope = Envelope::classify(payload, lookup);
    if envelope == Envelope::Unrecognized {
        warn!(
            "Unrecognized {} response envelope (expected an array or one of {:?}), treating as empty",
            lookup,
            lookup.envelope_keys()
        );
    }

    envelope
        .into_items()
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| {
                MarketDataError::transport(
                    lookup,
                    format!("malformed item at index {}: {}", index, e),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mover, SearchResult};
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let envelope = Envelope::classify(json!([1, 2]), Lookup::Search);
        assert_eq!(envelope, Envelope::Bare(vec![json!(1), json!(2)]));
    }

    #[test]
    fn test_search_prefers_results_over_data() {
        let payload = json!({ "data": [{"symbol": "B", "name": "b"}], "results": [{"symbol": "A", "name": "a"}] });
        let envelope = Envelope::classify(payload, Lookup::Search);
        assert!(matches!(envelope, Envelope::Keyed { key: "results", .. }));
    }

    #[test]
    fn test_search_falls_back_to_data_key() {
        let payload = json!({ "data": [{"symbol": "TCS", "name": "TCS Ltd"}] });
        let results: Vec<SearchResult> = decode_list(payload, Lookup::Search).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "TCS");
    }

    #[test]
    fn test_keys_are_lookup_specific() {
        // `movers` is not a search envelope key
        let payload = json!({ "movers": [{"symbol": "TCS", "name": "TCS Ltd"}] });
        assert_eq!(
            Envelope::classify(payload, Lookup::Search),
            Envelope::Unrecognized
        );
    }

    #[test]
    fn test_non_array_under_key_is_unrecognized() {
        let payload = json!({ "prices": { "open": 1 } });
        assert_eq!(
            Envelope::classify(payload, Lookup::Prices),
            Envelope::Unrecognized
        );
    }

    #[test]
    fn test_unrecognized_shape_decodes_to_empty() {
        let movers: Vec<Mover> = decode_list(json!("maintenance"), Lookup::Movers).unwrap();
        assert!(movers.is_empty());

        let movers: Vec<Mover> = decode_list(json!({ "status": "ok" }), Lookup::Movers).unwrap();
        assert!(movers.is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let payload = json!({ "movers": [
            {"symbol": "B", "name": "b", "price": 1.0, "change": 1.0, "changePercent": 1.0},
            {"symbol": "A", "name": "a", "price": 1.0, "change": -1.0, "changePercent": -1.0}
        ]});
        let movers: Vec<Mover> = decode_list(payload, Lookup::Movers).unwrap();
        let symbols: Vec<_> = movers.iter().map(|m| m.symbol.as_str()).collect();
        assert_eq!(symbols, ["B", "A"]);
    }

    #[test]
    fn test_malformed_item_is_a_transport_error() {
        let payload = json!([{ "symbol": "TCS" }]);
        let result: Result<Vec<Mover>, _> = decode_list(payload, Lookup::Movers);
        assert!(matches!(
            result,
            Err(MarketDataError::Transport {
                operation: Lookup::Movers,
                ..
            })
        ));
    }
}
