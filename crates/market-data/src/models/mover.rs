use serde::{Deserialize, Serialize};

/// An index constituent with its latest move.
///
/// `change` and `change_percent` share sign.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mover {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl Mover {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        change: f64,
        change_percent: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
            change,
            change_percent,
        }
    }

    /// True for flat or rising movers.
    pub fn is_gaining(&self) -> bool {
        self.change >= 0.0
    }
}
