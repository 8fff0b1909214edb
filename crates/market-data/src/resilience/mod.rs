//! Resilience helpers for the upstream data source.
//!
//! - Circuit breaking per remote lookup
//! - Price series validation

mod circuit_breaker;
mod validator;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use validator::{SeriesValidator, ValidatorConfig};
