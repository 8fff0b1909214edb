//! Task handles that release their work when dropped.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Owns a spawned task and aborts it on drop.
#[derive(Debug)]
pub struct ScopedTask {
    handle: JoinHandle<()>,
}

impl ScopedTask {
    /// Spawn `future` on the current runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Single-shot timer; scheduling again replaces the pending one.
#[derive(Debug, Default)]
pub struct CancellableTimer {
    pending: Option<ScopedTask>,
}

impl CancellableTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `on_fire` after `delay`, aborting any timer that has not fired yet.
    pub fn schedule<F>(&mut self, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pending = Some(ScopedTask::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        }));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a scheduled callback has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }
}
