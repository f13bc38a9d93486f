//! emojidex FFI Interface Definition
//!
//! Plain data shared with the presentation layer via UniFFI.
//! Nothing here holds behaviour beyond identity helpers.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// ENUMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Which listing the presentation layer is showing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum ViewState {
    All,
    Category { name: String },
    Search,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::All
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// A catalog entry with its derived search data.
///
/// Created once per raw entry while the catalog is built and never modified
/// afterwards. `keywords[0]` is always the case-folded name and the list holds
/// no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct EnrichedEntry {
    #[serde(rename = "emoji", alias = "glyph")]
    pub glyph: String,
    pub name: String,
    pub group: String,
    pub subcategory: String,
    pub keywords: Vec<String>,
    pub description: String,
    pub usage: String,
}

impl EnrichedEntry {
    /// Entries have no identifier; glyph + name + group identify one.
    pub fn is_same_entry(&self, other: &EnrichedEntry) -> bool {
        self.has_identity(&other.glyph, &other.name, &other.group)
    }

    pub fn has_identity(&self, glyph: &str, name: &str, group: &str) -> bool {
        self.glyph == glyph && self.name == name && self.group == group
    }

    /// Exact keyword membership (keywords are already case-folded).
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }
}

/// Number of entries in one top-level category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Record)]
pub struct CategoryCount {
    pub group: String,
    pub count: u64,
}

/// Degraded-mode notice: the dataset could not be loaded and the built-in
/// fallback set is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Record)]
pub struct LoadNotice {
    /// User-facing text
    pub message: String,
    /// Underlying load error, for display or logs
    pub cause: String,
    pub fallback_size: u64,
    pub occurred_at_unix: i64,
}
