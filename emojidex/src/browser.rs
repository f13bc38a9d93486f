//! EmojiBrowser - Main API for foreign-language interop
//!
//! Wraps the query engine, the load notice and the browse state behind a
//! UniFFI object. Queries are synchronous (a linear scan over a few thousand
//! entries). The only async entry point is `open_browser`, which performs the
//! one-shot dataset load.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::catalog::{Catalog, LoadOutcome};
use crate::interface::{CategoryCount, EnrichedEntry, LoadNotice, ViewState};
use crate::lexicon::Lexicon;
use crate::models::RawDataset;
use crate::query::QueryEngine;
use crate::source::{source_for_location, CatalogSource, LoadError};
use crate::view::BrowseState;

/// Global fallback Tokio runtime for when async functions are called outside any runtime context.
/// Never dropped. Used by UniFFI which doesn't provide a tokio runtime.
static FALLBACK_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create fallback tokio runtime")
});

fn runtime_handle() -> tokio::runtime::Handle {
    tokio::runtime::Handle::try_current().unwrap_or_else(|_| FALLBACK_RUNTIME.handle().clone())
}

/// Thread-safe browser over an immutable catalog.
/// Only the browse state is mutable; it sits behind a mutex.
#[derive(uniffi::Object)]
pub struct EmojiBrowser {
    engine: QueryEngine,
    notice: Option<LoadNotice>,
    state: Mutex<BrowseState>,
}

impl EmojiBrowser {
    pub fn new(outcome: LoadOutcome) -> Self {
        Self {
            engine: QueryEngine::new(outcome.catalog),
            notice: outcome.notice,
            state: Mutex::new(BrowseState::new()),
        }
    }

    /// Load from any source with the built-in lexicon.
    pub async fn load(source: &dyn CatalogSource) -> Self {
        Self::new(Catalog::load(source, Lexicon::builtin()).await)
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    pub fn state(&self) -> BrowseState {
        self.state.lock().clone()
    }
}

fn owned(entries: Vec<&EnrichedEntry>) -> Vec<EnrichedEntry> {
    entries.into_iter().cloned().collect()
}

#[uniffi::export]
impl EmojiBrowser {
    /// Build from an in-memory JSON dataset. Malformed or empty input yields
    /// the fallback set with a notice.
    #[uniffi::constructor]
    pub fn from_json(json: String) -> Self {
        let lexicon = Lexicon::builtin();
        Self::new(Catalog::from_fetch(RawDataset::from_json_str(&json), lexicon))
    }

    /// Browser over the built-in fallback set only, without a notice.
    #[uniffi::constructor]
    pub fn with_fallback() -> Self {
        Self::new(LoadOutcome {
            catalog: Catalog::fallback(Lexicon::builtin()),
            notice: None,
        })
    }

    pub fn entry_count(&self) -> u64 {
        self.engine.catalog().len() as u64
    }

    /// Present when the dataset failed to load and the fallback set is active.
    pub fn load_notice(&self) -> Option<LoadNotice> {
        self.notice.clone()
    }

    pub fn categories(&self) -> Vec<CategoryCount> {
        self.engine.catalog().category_counts()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Stateless queries
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn by_category(&self, category: String) -> Vec<EnrichedEntry> {
        owned(self.engine.by_category(&category))
    }

    pub fn search(&self, query: String) -> Vec<EnrichedEntry> {
        owned(self.engine.search(&query))
    }

    pub fn suggestions(&self, query: String, limit: u32) -> Vec<EnrichedEntry> {
        owned(self.engine.suggestions(&query, limit as usize))
    }

    pub fn related(&self, entry: EnrichedEntry, limit: u32) -> Vec<EnrichedEntry> {
        owned(self.engine.related(&entry, limit as usize))
    }

    pub fn by_keyword(&self, keyword: String) -> Vec<EnrichedEntry> {
        owned(self.engine.by_keyword(&keyword))
    }

    pub fn find(&self, glyph: String, name: String, group: String) -> Option<EnrichedEntry> {
        self.engine.find(&glyph, &name, &group).cloned()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Browse state
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn select_category(&self, name: String) -> Vec<EnrichedEntry> {
        owned(self.state.lock().select_category(&self.engine, &name))
    }

    /// Search-box input; an empty query restores the remembered view.
    pub fn input_query(&self, query: String) -> Vec<EnrichedEntry> {
        owned(self.state.lock().apply_query(&self.engine, &query))
    }

    pub fn clear_search(&self) -> Vec<EnrichedEntry> {
        owned(self.state.lock().clear_search(&self.engine))
    }

    pub fn view_state(&self) -> ViewState {
        self.state.lock().current().clone()
    }

    pub fn active_category(&self) -> String {
        self.state.lock().active_category().to_string()
    }
}

/// Open a browser over the dataset at `location` (file path or http(s) URL).
/// Never fails: any load problem yields the fallback set plus a notice.
#[uniffi::export]
pub async fn open_browser(location: String) -> Arc<EmojiBrowser> {
    // UniFFI doesn't provide a tokio runtime context, so spawn on our own
    let handle = runtime_handle().spawn(async move {
        match source_for_location(&location) {
            Ok(source) => EmojiBrowser::load(source.as_ref()).await,
            Err(err) => EmojiBrowser::new(Catalog::recover(err, Lexicon::builtin())),
        }
    });

    let browser = match handle.await {
        Ok(browser) => browser,
        Err(join_error) => EmojiBrowser::new(Catalog::recover(
            LoadError::Task(join_error.to_string()),
            Lexicon::builtin(),
        )),
    };
    Arc::new(browser)
}
