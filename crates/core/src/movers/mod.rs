//! Periodic refresh of the movers feed.

mod scheduler;


pub use scheduler::{MoversFeed, PollingConfig, PollingScheduler};
