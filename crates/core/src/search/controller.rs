//! Type-ahead search controller.
//!
//! Keystrokes are debounced; each settled query is issued with a fresh
//! [`QueryToken`](super::QueryToken) and runs to completion in its own task.
//! Responses older than the last applied one are discarded, so a slow early
//! query can never overwrite a faster later one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::watch;

use tickerlens_market_data::{SearchResult, Sourced};

use super::session::{DebounceOutcome, SearchSession, SearchView};
use super::token::QueryToken;
use crate::constants::{SEARCH_DEBOUNCE, SEARCH_RESULT_LIMIT};
use crate::quotes::SymbolSearch;
use crate::utils::CancellableTimer;

/// Search timing and size settings.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke.
    pub debounce: Duration,
    /// Results requested per query.
    pub result_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: SEARCH_DEBOUNCE,
            result_limit: SEARCH_RESULT_LIMIT,
        }
    }
}

/// Keys the controller reacts to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// State shared with the timer and request tasks.
struct Shared {
    source: Arc<dyn SymbolSearch>,
    result_limit: usize,
    session: Mutex<SearchSession>,
    view_tx: watch::Sender<SearchView>,
    closed: AtomicBool,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SearchSession> {
        self.session.lock().unwrap_or_else(|poisoned| {
            warn!("Search session mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn publish(&self, session: &SearchSession) {
        self.view_tx.send_replace(session.view());
    }

    fn debounce_elapsed(self: &Arc<Self>, generation: u64) {
        if self.closed.load(Ordering::SeqCst) {
            return;
        }

        let outcome = {
            let mut session = self.lock();
            let outcome = session.debounce_elapsed(generation);
            if outcome != DebounceOutcome::Superseded {
                self.publish(&session);
            }
            outcome
        };

        if let DebounceOutcome::Lookup { token, keyword } = outcome {
            debug!("Issuing search {:?} for '{}'", token, keyword);
            let shared = Arc::clone(self);
            tokio::spawn(async move {
                let response = shared
                    .source
                    .search_symbols(&keyword, shared.result_limit)
                    .await;
                shared.respond(token, response);
            });
        }
    }

    fn respond(&self, token: QueryToken, response: Sourced<Vec<SearchResult>>) {
        if self.closed.load(Ordering::SeqCst) {
            debug!("Discarding search response {:?}: controller closed", token);
            return;
        }

        let mut session = self.lock();
        if session.apply(token, response) {
            self.publish(&session);
        } else {
            debug!("Discarding stale search response {:?}", token);
        }
    }
}

/// Debounced, race-safe incremental search over a [`SymbolSearch`] source.
///
/// Must be used inside a tokio runtime. Dropping the controller cancels the
/// pending debounce and discards responses that arrive afterwards.
pub struct SearchController {
    shared: Arc<Shared>,
    debounce: Duration,
    timer: CancellableTimer,
}

impl SearchController {
    pub fn new(source: Arc<dyn SymbolSearch>, config: SearchConfig) -> Self {
        let session = SearchSession::default();
        let (view_tx, _) = watch::channel(session.view());

        Self {
            shared: Arc::new(Shared {
                source,
                result_limit: config.result_limit,
                session: Mutex::new(session),
                view_tx,
                closed: AtomicBool::new(false),
            }),
            debounce: config.debounce,
            timer: CancellableTimer::new(),
        }
    }

    /// Receive a snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.shared.view_tx.subscribe()
    }

    pub fn view(&self) -> SearchView {
        self.shared.lock().view()
    }

    /// New query text from the input field. Restarts the debounce window.
    pub fn input(&mut self, text: &str) {
        let generation = {
            let mut session = self.shared.lock();
            let generation = session.set_query(text);
            self.shared.publish(&session);
            generation
        };

        let shared = Arc::clone(&self.shared);
        self.timer
            .schedule(self.debounce, move || shared.debounce_elapsed(generation));
    }

    /// Keyboard navigation. Returns the committed result on Enter.
    pub fn handle_key(&mut self, key: Key) -> Option<SearchResult> {
        match key {
            Key::ArrowDown => self.update(SearchSession::move_down),
            Key::ArrowUp => self.update(SearchSession::move_up),
            Key::Escape => self.update(SearchSession::dismiss),
            Key::Enter => {
                let index = self.shared.lock().highlighted()?;
                return self.select(index);
            }
        }
        None
    }

    /// Pointer click on a result row.
    pub fn select(&mut self, index: usize) -> Option<SearchResult> {
        let committed = {
            let mut session = self.shared.lock();
            let committed = session.commit(index)?;
            self.shared.publish(&session);
            committed
        };
        self.timer.cancel();
        debug!("Committed search result {}", committed.symbol);
        Some(committed)
    }

    /// Pointer over a result row.
    pub fn hover(&mut self, index: usize) {
        self.update(|session| session.hover(index));
    }

    /// Pointer interaction outside the search surface.
    pub fn pointer_outside(&mut self) {
        self.update(SearchSession::blur);
    }

    /// Input field regained focus.
    pub fn focus(&mut self) {
        self.update(SearchSession::focus);
    }

    fn update(&self, change: impl FnOnce(&mut SearchSession)) {
        let mut session = self.shared.lock();
        change(&mut session);
        self.shared.publish(&session);
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::SeqCst);
        self.timer.cancel();
    }
}
