//! Browse state: the category/search toggle driving what is listed.
//!
//! ```text
//!   All ──select──▶ Category(name) ──type──▶ Search
//!    ▲                   ▲                     │
//!    └──── clear ────────┴─────── clear ───────┘   (back to the remembered view)
//! ```
//!
//! `previous` is captured on the first keystroke of a search session and is
//! left alone by later keystrokes of the same session.

use crate::interface::{EnrichedEntry, ViewState};
use crate::query::{QueryEngine, ALL_CATEGORIES};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseState {
    current: ViewState,
    previous: ViewState,
    query: String,
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &ViewState {
        &self.current
    }

    pub fn previous(&self) -> &ViewState {
        &self.previous
    }

    /// The query of the active search session, empty outside `Search`.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Switch to a category tab (`"all"` selects the whole catalog). Selecting
    /// the view that is already active changes nothing.
    pub fn select_category<'e>(&mut self, engine: &'e QueryEngine, name: &str) -> Vec<&'e EnrichedEntry> {
        let target = view_for(name);
        if target != self.current {
            self.previous = std::mem::replace(&mut self.current, target);
            self.query.clear();
        }
        self.listing(engine)
    }

    /// Feed the search box. A non-empty query enters (or stays in) `Search`;
    /// an empty one ends the session and restores the remembered view.
    pub fn apply_query<'e>(&mut self, engine: &'e QueryEngine, query: &str) -> Vec<&'e EnrichedEntry> {
        if query.trim().is_empty() {
            return self.clear_search(engine);
        }
        if self.current != ViewState::Search {
            self.previous = std::mem::replace(&mut self.current, ViewState::Search);
        }
        self.query = query.to_string();
        engine.search(query)
    }

    /// End the search session and list the remembered view.
    pub fn clear_search<'e>(&mut self, engine: &'e QueryEngine) -> Vec<&'e EnrichedEntry> {
        if self.current == ViewState::Search {
            // a tab picked mid-search remembers Search; there is nothing to go back to
            self.current = match std::mem::take(&mut self.previous) {
                ViewState::Search => ViewState::All,
                view => view,
            };
            self.query.clear();
        }
        self.listing(engine)
    }

    /// Entries for the current view.
    pub fn listing<'e>(&self, engine: &'e QueryEngine) -> Vec<&'e EnrichedEntry> {
        match &self.current {
            ViewState::Search => engine.search(&self.query),
            _ => engine.by_category(self.active_category()),
        }
    }

    /// `by_category` key of the current view, or of the remembered view while
    /// searching.
    pub fn active_category(&self) -> &str {
        let view = match &self.current {
            ViewState::Search => &self.previous,
            view => view,
        };
        match view {
            ViewState::Category { name } => name,
            _ => ALL_CATEGORIES,
        }
    }
}

fn view_for(name: &str) -> ViewState {
    if name == ALL_CATEGORIES {
        ViewState::All
    } else {
        ViewState::Category {
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::lexicon::Lexicon;

    fn engine() -> QueryEngine {
        QueryEngine::new(Catalog::fallback(Lexicon::builtin()))
    }

    fn category(name: &str) -> ViewState {
        ViewState::Category {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_initial_state() {
        let engine = engine();
        let state = BrowseState::new();
        assert_eq!(state.current(), &ViewState::All);
        assert_eq!(state.previous(), &ViewState::All);
        assert_eq!(state.listing(&engine).len(), engine.catalog().len());
    }

    #[test]
    fn test_select_category_remembers_previous() {
        let engine = engine();
        let mut state = BrowseState::new();

        let food = state.select_category(&engine, "Food & Drink");
        assert_eq!(food.len(), 1);
        assert_eq!(state.current(), &category("Food & Drink"));
        assert_eq!(state.previous(), &ViewState::All);

        state.select_category(&engine, "Objects");
        assert_eq!(state.previous(), &category("Food & Drink"));

        state.select_category(&engine, ALL_CATEGORIES);
        assert_eq!(state.current(), &ViewState::All);
        assert_eq!(state.previous(), &category("Objects"));
    }

    #[test]
    fn test_reselecting_active_view_is_ignored() {
        let engine = engine();
        let mut state = BrowseState::new();
        state.select_category(&engine, "Objects");
        let before = state.clone();
        state.select_category(&engine, "Objects");
        assert_eq!(state, before);
    }

    #[test]
    fn test_search_session_keeps_first_previous() {
        let engine = engine();
        let mut state = BrowseState::new();
        state.select_category(&engine, "Animals & Nature");

        state.apply_query(&engine, "d");
        state.apply_query(&engine, "do");
        let results = state.apply_query(&engine, "dog");
        assert_eq!(results.len(), 1);
        assert_eq!(state.current(), &ViewState::Search);
        assert_eq!(state.previous(), &category("Animals & Nature"));
        assert_eq!(state.active_category(), "Animals & Nature");
    }

    #[test]
    fn test_empty_query_restores_previous_view() {
        let engine = engine();
        let mut state = BrowseState::new();
        state.select_category(&engine, "Food & Drink");
        state.apply_query(&engine, "pizza");

        let restored = state.apply_query(&engine, "   ");
        assert_eq!(state.current(), &category("Food & Drink"));
        assert_eq!(state.query(), "");
        let expected = engine.by_category("Food & Drink");
        assert_eq!(restored.len(), expected.len());
        assert!(restored.iter().zip(&expected).all(|(a, b)| a.is_same_entry(b)));
    }

    #[test]
    fn test_clear_search_from_all() {
        let engine = engine();
        let mut state = BrowseState::new();
        state.apply_query(&engine, "heart");
        let listed = state.clear_search(&engine);
        assert_eq!(state.current(), &ViewState::All);
        assert_eq!(listed.len(), engine.catalog().len());
    }

    #[test]
    fn test_clear_search_outside_search_keeps_view() {
        let engine = engine();
        let mut state = BrowseState::new();
        state.select_category(&engine, "Flags");
        state.clear_search(&engine);
        assert_eq!(state.current(), &category("Flags"));
        assert_eq!(state.previous(), &ViewState::All);
    }

    #[test]
    fn test_tab_picked_mid_search_clears_to_all() {
        let engine = engine();
        let mut state = BrowseState::new();
        state.select_category(&engine, "Objects");
        state.apply_query(&engine, "phone");
        state.select_category(&engine, "Flags");
        assert_eq!(state.previous(), &ViewState::Search);
        assert_eq!(state.query(), "");

        // a new search remembers the tab, not the old session
        state.apply_query(&engine, "flag");
        assert_eq!(state.previous(), &category("Flags"));
        state.clear_search(&engine);
        assert_eq!(state.current(), &category("Flags"));
    }

    #[test]
    fn test_listing_while_searching_repeats_search() {
        let engine = engine();
        let mut state = BrowseState::new();
        let results = state.apply_query(&engine, "ball");
        assert_eq!(state.listing(&engine).len(), results.len());
    }
}
