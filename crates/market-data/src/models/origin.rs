use serde::{Deserialize, Serialize};

/// Where a piece of market data came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    /// Returned by the upstream data source.
    Live,
    /// Produced locally by the synthetic generator.
    Synthetic,
}

/// Data tagged with its origin.
///
/// The client facade hands out plain data by default; the `*_sourced`
/// variants return this wrapper so a view can flag degraded data.
#[derive(Clone, Debug, PartialEq)]
pub struct Sourced<T> {
    pub data: T,
    pub origin: DataOrigin,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            origin: DataOrigin::Live,
        }
    }

    pub fn synthetic(data: T) -> Self {
        Self {
            data,
            origin: DataOrigin::Synthetic,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.origin == DataOrigin::Synthetic
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            data: f(self.data),
            origin: self.origin,
        }
    }
}
