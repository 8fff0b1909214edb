//! Reference data served when the upstream is unreachable.

use crate::models::{Mover, SearchResult};

/// (symbol, name, exchange, sector)
const SEARCH_CATALOG: [(&str, &str, &str, &str); 10] = [
    ("RELIANCE", "Reliance Industries Ltd", "NSE", "Oil & Gas"),
    ("TCS", "Tata Consultancy Services", "NSE", "IT Services"),
    ("INFY", "Infosys Limited", "NSE", "IT Services"),
    ("HDFCBANK", "HDFC Bank Limited", "NSE", "Banking"),
    ("ICICIBANK", "ICICI Bank Limited", "NSE", "Banking"),
    ("ADANIPORTS", "Adani Ports & SEZ Ltd", "NSE", "Infrastructure"),
    ("ASIANPAINT", "Asian Paints Limited", "NSE", "Paints"),
    ("AXISBANK", "Axis Bank Limited", "NSE", "Banking"),
    ("BAJFINANCE", "Bajaj Finance Limited", "NSE", "NBFC"),
    ("BHARTIARTL", "Bharti Airtel Limited", "NSE", "Telecom"),
];

/// (symbol, name, price, change, change percent)
const MOVERS: [(&str, &str, f64, f64, f64); 5] = [
    ("RELIANCE", "Reliance Industries", 2456.75, 45.30, 1.88),
    ("TCS", "TCS Limited", 3234.20, -23.45, -0.72),
    ("INFY", "Infosys Ltd", 1456.80, 34.25, 2.41),
    ("HDFCBANK", "HDFC Bank", 1623.45, -12.30, -0.75),
    ("ICICIBANK", "ICICI Bank", 945.60, 18.75, 2.02),
];

pub(super) fn search_catalog() -> impl Iterator<Item = SearchResult> {
    SEARCH_CATALOG
        .iter()
        .map(|(symbol, name, exchange, sector)| SearchResult::new(*symbol, *name, *exchange, *sector))
}

pub(super) fn movers() -> Vec<Mover> {
    MOVERS
        .iter()
        .map(|(symbol, name, price, change, pct)| Mover::new(*symbol, *name, *price, *change, *pct))
        .collect()
}
