//! Core error types for tickerlens.

use thiserror::Error;

use tickerlens_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
///
/// The fallback facade never returns these for network reasons; they surface
/// only through sources that talk to a provider directly, or for bad input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
