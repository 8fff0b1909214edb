//! Incremental symbol search.
//!
//! - [`SearchController`] - debounces input and applies only the newest response
//! - [`SearchView`] - snapshot published to the renderer
//! - [`TokenSequencer`] - monotonic query tokens

mod controller;
mod session;
mod token;


pub use controller::{Key, SearchConfig, SearchController};
pub use session::{SearchPhase, SearchView};
pub use token::{QueryToken, TokenSequencer};
