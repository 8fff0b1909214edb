pub mod timer;

pub use timer::{CancellableTimer, ScopedTask};
