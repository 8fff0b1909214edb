//! Search session state machine.
//!
//! ```text
//! Idle --input--> Debouncing --fire(non-empty)--> Loading --response--> Shown
//!                      |                                                  |
//!                      +--fire(empty)--> Hidden <--escape/commit/blur-----+
//! ```

use serde::Serialize;

use tickerlens_market_data::{DataOrigin, SearchResult, Sourced};

use super::token::{QueryToken, TokenSequencer};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Idle,
    Debouncing,
    Loading,
    Shown,
    Hidden,
}

/// Snapshot of the session handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SearchView {
    pub query: String,
    pub phase: SearchPhase,
    pub results: Vec<SearchResult>,
    /// Highlighted row; `None` when nothing is highlighted.
    pub selection: Option<usize>,
    /// A query is in flight.
    pub loading: bool,
    /// Origin of `results`; `None` until a response is applied.
    pub origin: Option<DataOrigin>,
}

/// What to do when the debounce timer fires.
#[derive(Debug, PartialEq)]
pub(crate) enum DebounceOutcome {
    /// A newer keystroke or a commit superseded this timer.
    Superseded,
    /// The query is blank: results were cleared and hidden.
    Cleared,
    /// Run a lookup for `keyword`, answering with `token`.
    Lookup { token: QueryToken, keyword: String },
}

#[derive(Debug, Default)]
pub(crate) struct SearchSession {
    query: String,
    phase: SearchPhase,
    results: Vec<SearchResult>,
    selection: Option<usize>,
    origin: Option<DataOrigin>,
    tokens: TokenSequencer,
    /// Bumped by every keystroke and commit so a timer that already fired
    /// cannot act on a newer query.
    debounce_generation: u64,
}

impl SearchSession {
    pub(crate) fn view(&self) -> SearchView {
        SearchView {
            query: self.query.clone(),
            phase: self.phase,
            results: self.results.clone(),
            selection: self.selection,
            loading: self.tokens.has_outstanding(),
            origin: self.origin,
        }
    }

    /// Store new query text and start debouncing. Returns the generation the
    /// debounce timer must present when it fires.
    pub(crate) fn set_query(&mut self, text: &str) -> u64 {
        self.query = text.to_string();
        self.phase = SearchPhase::Debouncing;
        self.debounce_generation += 1;
        self.debounce_generation
    }

    pub(crate) fn debounce_elapsed(&mut self, generation: u64) -> DebounceOutcome {
        if generation != self.debounce_generation {
            return DebounceOutcome::Superseded;
        }

        let keyword = self.query.trim();
        if keyword.is_empty() {
            self.results.clear();
            self.selection = None;
            self.origin = None;
            self.tokens.invalidate();
            self.phase = SearchPhase::Hidden;
            return DebounceOutcome::Cleared;
        }

        let keyword = keyword.to_string();
        self.phase = SearchPhase::Loading;
        DebounceOutcome::Lookup {
            token: self.tokens.issue(),
            keyword,
        }
    }

    /// Apply a response. Returns false and leaves state untouched when the
    /// response is stale.
    pub(crate) fn apply(&mut self, token: QueryToken, response: Sourced<Vec<SearchResult>>) -> bool {
        if !self.tokens.accept(token) {
            return false;
        }
        self.results = response.data;
        self.origin = Some(response.origin);
        self.selection = None;
        self.phase = SearchPhase::Shown;
        true
    }

    pub(crate) fn move_down(&mut self) {
        if !self.navigable() {
            return;
        }
        let last = self.results.len() - 1;
        self.selection = Some(match self.selection {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    pub(crate) fn move_up(&mut self) {
        if !self.navigable() {
            return;
        }
        self.selection = match self.selection {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    fn navigable(&self) -> bool {
        self.phase == SearchPhase::Shown && !self.results.is_empty()
    }

    /// The selection, if the results are on screen.
    pub(crate) fn highlighted(&self) -> Option<usize> {
        self.selection.filter(|_| self.navigable())
    }

    pub(crate) fn hover(&mut self, index: usize) {
        if index < self.results.len() {
            self.selection = Some(index);
        }
    }

    /// Commit the result at `index`, if any.
    pub(crate) fn commit(&mut self, index: usize) -> Option<SearchResult> {
        let chosen = self.results.get(index)?.clone();
        self.query = chosen.symbol.clone();
        self.debounce_generation += 1;
        self.tokens.invalidate();
        self.selection = None;
        self.phase = SearchPhase::Hidden;
        Some(chosen)
    }

    pub(crate) fn dismiss(&mut self) {
        self.phase = SearchPhase::Hidden;
        self.selection = None;
    }

    pub(crate) fn blur(&mut self) {
        self.phase = SearchPhase::Hidden;
    }

    pub(crate) fn focus(&mut self) {
        if !self.query.trim().is_empty() && self.phase == SearchPhase::Hidden {
            self.phase = SearchPhase::Shown;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn results(n: usize) -> Sourced<Vec<SearchResult>> {
        Sourced::live(
            (0..n)
                .map(|i| SearchResult::new(format!("S{i}"), format!("Stock {i}"), "NSE", ""))
                .collect(),
        )
    }

    fn shown(n: usize) -> SearchSession {
        let mut session = SearchSession::default();
        let generation = session.set_query("s");
        let DebounceOutcome::Lookup { token, .. } = session.debounce_elapsed(generation) else {
            panic!("expected a lookup");
        };
        assert!(session.apply(token, results(n)));
        session
    }

    #[test]
    fn test_blank_query_clears_and_hides() {
        let mut session = shown(3);
        let generation = session.set_query("   ");
        assert_eq!(session.debounce_elapsed(generation), DebounceOutcome::Cleared);

        let view = session.view();
        assert_eq!(view.phase, SearchPhase::Hidden);
        assert!(view.results.is_empty());
        assert!(!view.loading);
    }

    #[test]
    fn test_superseded_timer_is_ignored() {
        let mut session = SearchSession::default();
        let old = session.set_query("a");
        session.set_query("ab");
        assert_eq!(session.debounce_elapsed(old), DebounceOutcome::Superseded);
        assert_eq!(session.view().phase, SearchPhase::Debouncing);
    }

    #[test]
    fn test_lookup_uses_trimmed_query_and_sets_loading() {
        let mut session = SearchSession::default();
        let generation = session.set_query("  tcs ");
        match session.debounce_elapsed(generation) {
            DebounceOutcome::Lookup { keyword, .. } => assert_eq!(keyword, "tcs"),
            other => panic!("unexpected {other:?}"),
        }
        let view = session.view();
        assert_eq!(view.phase, SearchPhase::Loading);
        assert!(view.loading);
        assert_eq!(view.query, "  tcs ");
    }

    #[test]
    fn test_empty_response_is_still_shown() {
        let session = shown(0);
        assert_eq!(session.view().phase, SearchPhase::Shown);
    }

    #[test]
    fn test_selection_is_clamped() {
        let len = 2;
        let mut session = shown(len);

        session.move_up();
        assert_eq!(session.view().selection, None);

        for _ in 0..len + 5 {
            session.move_down();
        }
        assert_eq!(session.view().selection, Some(len - 1));

        for _ in 0..len + 5 {
            session.move_up();
        }
        assert_eq!(session.view().selection, None);
    }

    proptest! {
        #[test]
        fn prop_selection_stays_in_range(len in 1usize..10, downs in 0usize..20, ups in 0usize..20) {
            let mut session = shown(len);

            for _ in 0..downs {
                session.move_down();
            }
            let after_downs = downs.min(len).checked_sub(1);
            prop_assert_eq!(session.view().selection, after_downs);

            for _ in 0..ups {
                session.move_up();
            }
            let after_ups = after_downs.and_then(|index| index.checked_sub(ups));
            prop_assert_eq!(session.view().selection, after_ups);
        }
    }

    #[test]
    fn test_navigation_ignored_when_hidden_or_empty() {
        let mut empty = shown(0);
        empty.move_down();
        assert_eq!(empty.view().selection, None);

        let mut hidden = shown(3);
        hidden.blur();
        hidden.move_down();
        assert_eq!(hidden.view().selection, None);
    }

    #[test]
    fn test_commit_sets_query_and_discards_outstanding() {
        let mut session = shown(3);
        let generation = session.set_query("s1");
        let DebounceOutcome::Lookup { token, .. } = session.debounce_elapsed(generation) else {
            panic!("expected a lookup");
        };

        let chosen = session.commit(1).unwrap();
        assert_eq!(chosen.symbol, "S1");

        let view = session.view();
        assert_eq!(view.query, "S1");
        assert_eq!(view.phase, SearchPhase::Hidden);
        assert!(!view.loading);
        assert!(!session.apply(token, results(1)));
    }

    #[test]
    fn test_commit_out_of_range_is_noop() {
        let mut session = shown(2);
        assert!(session.commit(5).is_none());
        assert_eq!(session.view().phase, SearchPhase::Shown);
    }

    #[test]
    fn test_blur_keeps_results_and_focus_reshows() {
        let mut session = shown(2);
        session.blur();
        assert_eq!(session.view().phase, SearchPhase::Hidden);
        assert_eq!(session.view().results.len(), 2);

        session.focus();
        assert_eq!(session.view().phase, SearchPhase::Shown);
    }

    #[test]
    fn test_hover_sets_selection_within_bounds() {
        let mut session = shown(3);
        session.hover(2);
        assert_eq!(session.view().selection, Some(2));
        session.hover(7);
        assert_eq!(session.view().selection, Some(2));
    }
}
