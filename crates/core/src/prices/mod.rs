//! Price detail loading for a single symbol.

mod detail;

pub use detail::{PriceDetail, PriceDetailLoader};
