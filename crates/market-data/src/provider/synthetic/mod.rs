//! Deterministic fallback data.
//!
//! [`SyntheticDataGenerator`] stands in for the upstream when it cannot be
//! reached. Search and movers come from fixed reference lists; price series
//! are a seeded random walk, so one seed and one call order always produce
//! the same output.

mod catalog;

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Mover, PricePoint, PriceSeries, SearchResult};

/// Seed used by [`SyntheticDataGenerator::default`].
pub const DEFAULT_SEED: u64 = 42;

/// Maximum number of synthetic search matches.
pub const SEARCH_LIMIT: usize = 5;

/// Number of points in every synthetic price series.
pub const SERIES_LEN: usize = 50;

/// Spacing between synthetic price points, in minutes.
pub const SERIES_SPACING_MINUTES: i64 = 15;

/// Random-walk volatility as a fraction of the base price.
const VOLATILITY: f64 = 0.02;

/// Maximum intrabar spread above/below the price, as a fraction.
const WICK: f64 = 0.01;

const BASE_PRICE_RANGE: std::ops::Range<f64> = 500.0..2500.0;
const VOLUME_RANGE: std::ops::Range<u64> = 10_000..110_000;

/// Seeded generator for fallback search results, movers and price series.
pub struct SyntheticDataGenerator {
    seed: u64,
    rng: Mutex<StdRng>,
}

impl SyntheticDataGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn lock_rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| {
            warn!("Synthetic generator mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Catalog entries whose symbol or name contains `keyword`, ignoring
    /// case, in catalog order, at most [`SEARCH_LIMIT`].
    pub fn search(&self, keyword: &str) -> Vec<SearchResult> {
        catalog::search_catalog()
            .filter(|entry| entry.matches(keyword))
            .take(SEARCH_LIMIT)
            .collect()
    }

    /// Fixed reference movers list.
    pub fn movers(&self) -> Vec<Mover> {
        catalog::movers()
    }

    /// A [`SERIES_LEN`]-point series ending now.
    pub fn prices(&self, symbol: &str) -> PriceSeries {
        self.prices_ending_at(symbol, Utc::now())
    }

    /// A [`SERIES_LEN`]-point series spaced [`SERIES_SPACING_MINUTES`] apart
    /// whose last point is stamped `end`.
    pub fn prices_ending_at(&self, symbol: &str, end: DateTime<Utc>) -> PriceSeries {
        let mut rng = self.lock_rng();
        let base_price = rng.gen_range(BASE_PRICE_RANGE);
        debug!(
            "Generating synthetic series for {} around base price {:.2}",
            symbol, base_price
        );

        (0..SERIES_LEN)
            .rev()
            .map(|steps_back| {
                let timestamp = end - Duration::minutes(SERIES_SPACING_MINUTES * steps_back as i64);

                // Older points carry more of the perturbation, giving the
                // series a mild linear trend toward the base price.
                let shock = (rng.gen::<f64>() - 0.5) * VOLATILITY * base_price;
                let trend = steps_back as f64 / SERIES_LEN as f64;
                let price = base_price + shock * trend;

                let high = price * (1.0 + rng.gen::<f64>() * WICK);
                let low = price * (1.0 - rng.gen::<f64>() * WICK);
                let volume = rng.gen_range(VOLUME_RANGE) as f64;

                PricePoint::new(timestamp, price, high, low, price, volume)
            })
            .collect()
    }
}

impl Default for SyntheticDataGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
