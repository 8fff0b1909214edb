//! Statistics derived from a price series.
//!
//! All functions are pure. Range statistics use closing prices, not the
//! per-point high and low.

use serde::Serialize;

use tickerlens_market_data::PricePoint;

/// Change from the first to the last close.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub change: f64,
    pub change_percent: f64,
    pub is_positive: bool,
}

impl PriceChange {
    pub const FLAT: PriceChange = PriceChange {
        change: 0.0,
        change_percent: 0.0,
        is_positive: true,
    };

    fn between(from: f64, to: f64) -> Self {
        let change = to - from;
        let change_percent = if from == 0.0 {
            0.0
        } else {
            change / from * 100.0
        };
        Self {
            change,
            change_percent,
            is_positive: change >= 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeStats {
    /// Highest close
    pub high: f64,
    /// Lowest close
    pub low: f64,
    pub avg_volume: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub change: f64,
    pub change_percent: f64,
    pub is_positive: bool,
    pub high: f64,
    pub low: f64,
    pub avg_volume: f64,
}

/// Most recent session figures: the last point against the previous close.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestQuote {
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    pub change: f64,
    pub change_percent: f64,
    pub is_positive: bool,
}

/// First-to-last change. Fewer than two points is flat.
pub fn change(series: &[PricePoint]) -> PriceChange {
    match series {
        [first, .., last] => PriceChange::between(first.close, last.close),
        _ => PriceChange::FLAT,
    }
}

/// High/low close and average volume; `None` for an empty series.
pub fn range_stats(series: &[PricePoint]) -> Option<RangeStats> {
    if series.is_empty() {
        return None;
    }

    let (high, low, volume) = series.iter().fold(
        (f64::NEG_INFINITY, f64::INFINITY, 0.0),
        |(high, low, volume), point| {
            (
                high.max(point.close),
                low.min(point.close),
                volume + point.volume,
            )
        },
    );

    Some(RangeStats {
        high,
        low,
        avg_volume: volume / series.len() as f64,
    })
}

pub fn derive(series: &[PricePoint]) -> Option<DerivedStats> {
    let range = range_stats(series)?;
    let change = change(series);
    Some(DerivedStats {
        change: change.change,
        change_percent: change.change_percent,
        is_positive: change.is_positive,
        high: range.high,
        low: range.low,
        avg_volume: range.avg_volume,
    })
}

pub fn latest_quote(series: &[PricePoint]) -> Option<LatestQuote> {
    let last = series.last()?;
    let change = match series {
        [.., previous, _] => PriceChange::between(previous.close, last.close),
        _ => PriceChange::FLAT,
    };

    Some(LatestQuote {
        price: last.close,
        open: last.open,
        high: last.high,
        low: last.low,
        volume: last.volume,
        change: change.change,
        change_percent: change.change_percent,
        is_positive: change.is_positive,
    })
}
