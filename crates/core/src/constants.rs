use std::time::Duration;

/// Quiet period after the last keystroke before a search is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Maximum number of results requested per search.
pub const SEARCH_RESULT_LIMIT: usize = 8;

/// Movers refresh period.
pub const MOVERS_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Number of points requested by the price detail view.
pub const DETAIL_SERIES_LIMIT: usize = 50;
