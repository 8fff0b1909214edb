//! Movers polling scheduler.
//!
//! Fetches once on start, then on a fixed period. A tick that arrives while
//! the previous fetch is still running is skipped, never queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

use tickerlens_market_data::{DataOrigin, Mover, Sourced};

use crate::constants::MOVERS_POLL_INTERVAL;
use crate::errors::Result;
use crate::quotes::MoversSource;
use crate::utils::ScopedTask;

#[derive(Clone, Debug)]
pub struct PollingConfig {
    /// Time between fetch attempts.
    pub period: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            period: MOVERS_POLL_INTERVAL,
        }
    }
}

/// Snapshot of the movers feed.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoversFeed {
    /// Last good movers list; kept across failed fetches.
    pub movers: Vec<Mover>,
    /// True until the first fetch settles.
    pub loading: bool,
    pub last_success_at: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
    pub origin: Option<DataOrigin>,
    pub last_error: Option<String>,
}

impl Default for MoversFeed {
    fn default() -> Self {
        Self {
            movers: Vec::new(),
            loading: true,
            last_success_at: None,
            consecutive_failures: 0,
            origin: None,
            last_error: None,
        }
    }
}

struct Shared {
    source: Arc<dyn MoversSource>,
    feed_tx: watch::Sender<MoversFeed>,
    in_flight: AtomicBool,
    stopped: AtomicBool,
    fetch: Mutex<Option<ScopedTask>>,
}

impl Shared {
    fn lock_fetch(&self) -> MutexGuard<'_, Option<ScopedTask>> {
        self.fetch.lock().unwrap_or_else(|poisoned| {
            warn!("Movers fetch mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Start a fetch unless one is still running or polling has stopped.
    ///
    /// The stop flag is checked under the fetch-slot lock that `stop` also
    /// holds, so no fetch can be spawned after `stop` has emptied the slot.
    fn try_fetch(self: &Arc<Self>) {
        let mut slot = self.lock_fetch();
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Skipping movers tick: previous fetch still in flight");
            return;
        }

        let shared = Arc::clone(self);
        *slot = Some(ScopedTask::spawn(async move {
            let result = shared.source.fetch_movers().await;
            shared.settle(result);
        }));
    }

    fn settle(&self, result: Result<Sourced<Vec<Mover>>>) {
        if self.stopped.load(Ordering::SeqCst) {
            debug!("Discarding movers result: polling stopped");
            return;
        }

        self.feed_tx.send_modify(|feed| {
            feed.loading = false;
            match result {
                Ok(sourced) => {
                    debug!(
                        "Movers refreshed: {} entries ({:?})",
                        sourced.data.len(),
                        sourced.origin
                    );
                    feed.movers = sourced.data;
                    feed.origin = Some(sourced.origin);
                    feed.last_success_at = Some(Utc::now());
                    feed.consecutive_failures = 0;
                    feed.last_error = None;
                }
                Err(e) => {
                    feed.consecutive_failures += 1;
                    warn!(
                        "Movers fetch failed ({} in a row), keeping last data: {}",
                        feed.consecutive_failures, e
                    );
                    feed.last_error = Some(e.to_string());
                }
            }
        });
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Non-overlapping periodic poller for a [`MoversSource`].
///
/// Must be started inside a tokio runtime. Dropping the scheduler stops it.
pub struct PollingScheduler {
    shared: Arc<Shared>,
    ticker: Mutex<Option<ScopedTask>>,
}

impl PollingScheduler {
    /// Fetch immediately, then every `config.period`.
    pub fn start(source: Arc<dyn MoversSource>, config: PollingConfig) -> Self {
        let (feed_tx, _) = watch::channel(MoversFeed::default());
        let shared = Arc::new(Shared {
            source,
            feed_tx,
            in_flight: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            fetch: Mutex::new(None),
        });

        info!("Movers polling started ({:?} interval)", config.period);
        let ticker_shared = Arc::clone(&shared);
        let ticker = ScopedTask::spawn(async move {
            // First tick completes immediately
            let mut ticks = interval(config.period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                ticker_shared.try_fetch();
            }
        });

        Self {
            shared,
            ticker: Mutex::new(Some(ticker)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MoversFeed> {
        self.shared.feed_tx.subscribe()
    }

    pub fn feed(&self) -> MoversFeed {
        self.shared.feed_tx.borrow().clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.shared.stopped.load(Ordering::SeqCst)
    }

    /// Stop ticking and abort any in-flight fetch. Safe to call repeatedly.
    pub fn stop(&self) {
        let fetch = {
            let mut slot = self.shared.lock_fetch();
            if self.shared.stopped.swap(true, Ordering::SeqCst) {
                return;
            }
            slot.take()
        };
        drop(fetch);

        let ticker = self
            .ticker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        drop(ticker);
        info!("Movers polling stopped");
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
