use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One OHLCV observation.
///
/// Invariant for well-formed points: `low <= open, close <= high` and
/// `volume >= 0`. Upstream data is checked with [`PricePoint::is_consistent`]
/// before it reaches callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation instant (ISO-8601 on the wire; offset-less values are UTC)
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PricePoint {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Whether the OHLC ordering and volume invariants hold.
    pub fn is_consistent(&self) -> bool {
        let finite = [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite());

        finite
            && self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
            && self.volume >= 0.0
    }
}

/// Parse an upstream timestamp: RFC 3339, then a naive date-time, then a
/// bare date (midnight). Values without an offset are taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp '{}'", raw)))
}

/// Ordered price observations with strictly increasing timestamps.
pub type PriceSeries = Vec<PricePoint>;

/// Bar granularity accepted by the prices endpoint.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    #[default]
    Intraday,
    Daily,
}

impl Granularity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intraday => "INTRADAY",
            Self::Daily => "DAILY",
        }
    }
}

/// Parameters of a price-series lookup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceQuery {
    /// Range in days
    pub days: u32,
    pub granularity: Granularity,
    /// Maximum number of points
    pub limit: usize,
}

impl PriceQuery {
    pub fn new(days: u32, granularity: Granularity, limit: usize) -> Self {
        Self {
            days,
            granularity,
            limit,
        }
    }
}

impl Default for PriceQuery {
    fn default() -> Self {
        Self::new(1, Granularity::Intraday, 100)
    }
}
