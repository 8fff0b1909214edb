//! Upstream data access.
//!
//! This module contains:
//! - The [`DataProvider`] trait for the three remote lookups
//! - [`envelope`]: tagged decoding of response envelopes
//! - [`HttpDataProvider`]: the reqwest-backed implementation
//! - [`SyntheticDataGenerator`]: seeded fallback data

mod traits;

pub mod envelope;
pub mod http;
pub mod synthetic;

pub use http::{HttpDataProvider, HttpProviderConfig};
pub use synthetic::SyntheticDataGenerator;
pub use traits::DataProvider;
