//! emojidex - emoji catalog enrichment and query engine
//!
//! Loads a nested category → subcategory → entry dataset, enriches every
//! entry with keywords, a description and a usage sentence drawn from a static
//! lexicon, and answers category, search, suggestion and related-entry queries
//! over the resulting immutable catalog.
//!
//! Types are exported via UniFFI proc-macros (#[derive(uniffi::Record/Enum/Object)]).

mod browser;
pub mod catalog;
pub mod enrich;
pub mod interface;
pub mod lexicon;
pub mod models;
pub mod query;
pub mod source;
pub mod view;

pub use browser::{open_browser, EmojiBrowser};
pub use catalog::{Catalog, LoadOutcome};
pub use interface::*;
pub use lexicon::Lexicon;
pub use query::QueryEngine;
pub use source::{source_for_location, CatalogSource, FileSource, HttpSource, JsonSource, LoadError};
pub use view::BrowseState;

uniffi::setup_scaffolding!("emojidex");
