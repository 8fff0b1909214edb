//! Error types and failure classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The error enum for every remote lookup
//! - [`FailureClass`]: How a failure should weigh on the circuit breaker
//!
//! An empty search keyword is not an error: providers short-circuit it to an
//! empty list. An unrecognized response envelope is not an error either; it
//! normalizes to an empty list (see [`crate::provider::envelope`]).

mod retry;

pub use retry::FailureClass;

use thiserror::Error;

use crate::models::Lookup;

/// Errors that can occur while talking to the upstream data source.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The upstream could not be reached, timed out, or answered with a body
    /// that could not be read or decoded.
    #[error("Transport error during {operation}: {message}")]
    Transport {
        /// The lookup that failed
        operation: Lookup,
        /// Underlying transport or decode message
        message: String,
    },

    /// The upstream answered with a non-success HTTP status.
    #[error("Upstream returned status {code} during {operation}")]
    Status {
        /// The lookup that failed
        operation: Lookup,
        /// HTTP status code
        code: u16,
    },

    /// The circuit breaker is open for this lookup; no request was sent.
    #[error("Circuit open: {operation}")]
    CircuitOpen {
        /// The lookup with an open circuit
        operation: Lookup,
    },

    /// The upstream returned data, but none of it passed validation.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },
}

impl MarketDataError {
    /// Build a transport error for a lookup.
    pub fn transport(operation: Lookup, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: message.into(),
        }
    }

    /// HTTP status code, when the failure came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns how this failure should be accounted for.
    ///
    /// # Examples
    ///
    /// ```
    /// use tickerlens_market_data::errors::{FailureClass, MarketDataError};
    /// use tickerlens_market_data::Lookup;
    ///
    /// let error = MarketDataError::Status { operation: Lookup::Prices, code: 503 };
    /// assert_eq!(error.failure_class(), FailureClass::Penalize);
    ///
    /// let error = MarketDataError::Status { operation: Lookup::Prices, code: 404 };
    /// assert_eq!(error.failure_class(), FailureClass::FallbackOnly);
    /// ```
    pub fn failure_class(&self) -> FailureClass {
        match self {
            Self::Transport { .. } => FailureClass::Penalize,

            // Server trouble and throttling say something about upstream health;
            // other client errors are specific to the request.
            Self::Status { code, .. } if *code >= 500 || *code == 429 => FailureClass::Penalize,
            Self::Status { .. } => FailureClass::FallbackOnly,

            Self::CircuitOpen { .. } | Self::ValidationFailed { .. } => FailureClass::FallbackOnly,
        }
    }
}
