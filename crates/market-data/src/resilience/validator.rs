//! Price series validation.
//!
//! Upstream series are checked point by point before they reach callers:
//! - OHLC ordering (`low <= open, close <= high`) and non-negative volume
//! - Finite values and an optional price ceiling
//! - Chronological order, with duplicate timestamps removed

use log::warn;

use crate::errors::MarketDataError;
use crate::models::{PricePoint, PriceSeries};

/// Series validator configuration.
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    /// Maximum allowed price value (sanity check).
    pub max_price: Option<f64>,
    /// Whether to warn on zero volume.
    pub warn_on_zero_volume: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_price: Some(1_000_000_000.0),
            warn_on_zero_volume: false,
        }
    }
}

/// Drops malformed points from upstream price series.
pub struct SeriesValidator {
    config: ValidatorConfig,
}

impl SeriesValidator {
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate one point in isolation.
    pub fn validate_point(&self, point: &PricePoint) -> Result<(), MarketDataError> {
        if !point.is_consistent() {
            return Err(MarketDataError::ValidationFailed {
                message: format!(
                    "inconsistent OHLCV at {}: o={} h={} l={} c={} v={}",
                    point.timestamp, point.open, point.high, point.low, point.close, point.volume
                ),
            });
        }

        if let Some(max_price) = self.config.max_price {
            if point.high > max_price {
                return Err(MarketDataError::ValidationFailed {
                    message: format!(
                        "price {} at {} exceeds ceiling {}",
                        point.high, point.timestamp, max_price
                    ),
                });
            }
        }

        if self.config.warn_on_zero_volume && point.volume == 0.0 {
            warn!("Zero volume at {}", point.timestamp);
        }

        Ok(())
    }

    /// Keep the valid points in chronological order, dropping repeated
    /// timestamps. Upstream may send newest-first; the sort is stable so the
    /// first point seen for a timestamp wins. Dropped points are logged
    /// against `symbol`.
    pub fn sanitize(&self, symbol: &str, series: PriceSeries) -> PriceSeries {
        let mut kept: PriceSeries = series
            .into_iter()
            .filter(|point| match self.validate_point(point) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Dropping price point for {}: {}", symbol, e);
                    false
                }
            })
            .collect();

        kept.sort_by_key(|point| point.timestamp);
        kept.dedup_by(|later, earlier| {
            let duplicate = later.timestamp == earlier.timestamp;
            if duplicate {
                warn!(
                    "Dropping price point for {}: duplicate timestamp {}",
                    symbol, later.timestamp
                );
            }
            duplicate
        });

        kept
    }
}

impl Default for SeriesValidator {
    fn default() -> Self {
        Self::new()
    }
}
