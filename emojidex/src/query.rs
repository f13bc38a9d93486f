//! Query engine: read-only filtering and search over the catalog.
//!
//! Matching is plain case-insensitive substring containment on the name and
//! keywords. There is no ranking; results keep catalog order. The only state
//! is the memoized "sad" view, which can never go stale because the catalog is
//! immutable.

use std::sync::OnceLock;

use crate::catalog::Catalog;
use crate::interface::EnrichedEntry;
use crate::lexicon::fold;

/// Category key selecting the whole catalog.
pub const ALL_CATEGORIES: &str = "all";

pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;
pub const DEFAULT_RELATED_LIMIT: usize = 12;

/// Reserved query that selects the curated sad view instead of substring search.
pub const SAD_QUERY: &str = "sad";

const SAD_TERMS: &[&str] = &[
    "sad", "cry", "tears", "tear", "sob", "pensive", "disappointed", "weary", "tired",
    "anguished", "confused", "frown", "downcast", "worried", "fear", "scream",
    "persevering", "confounded", "unamused", "expressionless", "neutral", "grimace",
    "sleepy", "sleeping", "dizzy", "nauseated", "vomit", "sick", "hurt", "pain", "upset",
    "depressed", "broken heart", "heartbreak", "crying", "loudly crying", "sad but relieved",
];

/// Any of these excludes an entry from the sad view.
const HAPPY_TERMS: &[&str] = &["happy", "smile", "laugh", "joy", "cheer", "grin", "glee"];

#[derive(Debug)]
pub struct QueryEngine {
    catalog: Catalog,
    sad_view: OnceLock<Vec<usize>>,
}

impl QueryEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            sad_view: OnceLock::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// `"all"` returns the whole catalog. Any other value selects entries of
    /// that group: exact match first, then a case-insensitive retry when the
    /// exact match finds nothing.
    pub fn by_category(&self, category: &str) -> Vec<&EnrichedEntry> {
        if category == ALL_CATEGORIES {
            return self.catalog.iter().collect();
        }
        filter_by_group(self.catalog.entries(), category)
    }

    /// Entries whose name or any keyword contains the query, case-insensitively.
    ///
    /// An empty or whitespace-only query means "no search" and returns the
    /// whole catalog; callers tracking a category view should use
    /// [`BrowseState::apply_query`](crate::view::BrowseState::apply_query),
    /// which restores that view instead. The query `sad` returns the curated
    /// sad view.
    pub fn search(&self, query: &str) -> Vec<&EnrichedEntry> {
        let term = fold(query);
        if term.is_empty() {
            return self.by_category(ALL_CATEGORIES);
        }
        if term == SAD_QUERY {
            return self.sad_entries();
        }
        self.matching(&term, usize::MAX)
    }

    /// Typeahead: substring matches truncated to `limit`. Empty query yields
    /// nothing.
    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<&EnrichedEntry> {
        let term = fold(query);
        if term.is_empty() {
            return Vec::new();
        }
        self.matching(&term, limit)
    }

    /// Other entries of the same group, excluding `entry` itself.
    pub fn related(&self, entry: &EnrichedEntry, limit: usize) -> Vec<&EnrichedEntry> {
        self.catalog
            .iter()
            .filter(|e| e.group == entry.group && !e.is_same_entry(entry))
            .take(limit)
            .collect()
    }

    /// Entries carrying exactly this keyword.
    pub fn by_keyword(&self, keyword: &str) -> Vec<&EnrichedEntry> {
        let keyword = fold(keyword);
        self.catalog.iter().filter(|e| e.has_keyword(&keyword)).collect()
    }

    /// Look an entry up by its identity triple.
    pub fn find(&self, glyph: &str, name: &str, group: &str) -> Option<&EnrichedEntry> {
        self.catalog.iter().find(|e| e.has_identity(glyph, name, group))
    }

    fn matching(&self, term: &str, limit: usize) -> Vec<&EnrichedEntry> {
        self.catalog
            .iter()
            .filter(|e| matches_term(e, term))
            .take(limit)
            .collect()
    }

    fn sad_entries(&self) -> Vec<&EnrichedEntry> {
        let entries = self.catalog.entries();
        let indices = self.sad_view.get_or_init(|| {
            let view: Vec<usize> = entries
                .iter()
                .enumerate()
                .filter(|(_, e)| mentions_any(e, SAD_TERMS) && !mentions_any(e, HAPPY_TERMS))
                .map(|(i, _)| i)
                .collect();
            tracing::debug!(entries = view.len(), "sad view computed");
            view
        });
        indices.iter().map(|&i| &entries[i]).collect()
    }
}

/// Exact group match, else case-insensitive match.
fn filter_by_group<'a>(entries: &'a [EnrichedEntry], category: &str) -> Vec<&'a EnrichedEntry> {
    let exact: Vec<&EnrichedEntry> = entries.iter().filter(|e| e.group == category).collect();
    if !exact.is_empty() {
        return exact;
    }

    let folded = category.to_lowercase();
    let relaxed: Vec<&EnrichedEntry> = entries
        .iter()
        .filter(|e| e.group.to_lowercase() == folded)
        .collect();
    if !relaxed.is_empty() {
        tracing::debug!(category, matches = relaxed.len(), "using case-insensitive category match");
    }
    relaxed
}

fn matches_term(entry: &EnrichedEntry, term: &str) -> bool {
    entry.name.to_lowercase().contains(term) || entry.keywords.iter().any(|k| k.contains(term))
}

/// Name contains the term, or the keyword set holds it exactly.
fn mentions_any(entry: &EnrichedEntry, terms: &[&str]) -> bool {
    let name = entry.name.to_lowercase();
    terms
        .iter()
        .any(|t| name.contains(t) || entry.has_keyword(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::models::{RawDataset, RawEntry};

    fn engine(entries: &[(&str, &str, &str)]) -> QueryEngine {
        let dataset: RawDataset = entries
            .iter()
            .map(|(glyph, name, group)| RawEntry::new(glyph, name, group, ""))
            .collect();
        QueryEngine::new(Catalog::build(&dataset, Lexicon::builtin()))
    }

    fn names(entries: &[&EnrichedEntry]) -> Vec<String> {
        entries.iter().map(|e| e.name.clone()).collect()
    }

    fn sample() -> QueryEngine {
        engine(&[
            ("😀", "grinning face", "Smileys & Emotion"),
            ("😢", "crying face", "Smileys & Emotion"),
            ("😂", "face with tears of joy", "Smileys & Emotion"),
            ("😔", "pensive face", "Smileys & Emotion"),
            ("🦊", "fox", "Animals & Nature"),
            ("🐶", "dog face", "Animals & Nature"),
            ("🍕", "pizza", "Food & Drink"),
            ("🎂", "birthday cake", "Food & Drink"),
        ])
    }

    #[test]
    fn test_all_is_identity() {
        let engine = sample();
        let all = engine.by_category(ALL_CATEGORIES);
        assert_eq!(all.len(), engine.catalog().len());
        for (a, b) in all.iter().zip(engine.catalog().iter()) {
            assert!(a.is_same_entry(b));
        }
    }

    #[test]
    fn test_by_category_filters() {
        let engine = sample();
        for group in engine.catalog().groups() {
            let entries = engine.by_category(group);
            assert!(!entries.is_empty());
            assert!(entries.iter().all(|e| e.group == group));
        }
        assert_eq!(names(&engine.by_category("Food & Drink")), vec!["pizza", "birthday cake"]);
    }

    #[test]
    fn test_by_category_case_insensitive_fallback() {
        let engine = sample();
        assert_eq!(engine.by_category("food & drink").len(), 2);
        assert!(engine.by_category("Flags").is_empty());
    }

    #[test]
    fn test_exact_match_wins_over_relaxed() {
        let engine = engine(&[
            ("1", "one", "Objects"),
            ("2", "two", "objects"),
        ]);
        assert_eq!(names(&engine.by_category("objects")), vec!["two"]);
        assert_eq!(names(&engine.by_category("OBJECTS")), vec!["one", "two"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let engine = sample();
        assert_eq!(names(&engine.search("FOX")), names(&engine.search("fox")));
        assert_eq!(names(&engine.search("fox")), vec!["fox"]);
    }

    #[test]
    fn test_search_matches_keywords() {
        let engine = sample();
        // "clever" is a lexicon term for "fox", not part of the name
        assert_eq!(names(&engine.search("clever")), vec!["fox"]);
        // keyword substring: "celebrat" hits "celebration"
        assert!(names(&engine.search("celebrat")).contains(&"birthday cake".to_string()));
    }

    #[test]
    fn test_search_keeps_catalog_order() {
        let engine = sample();
        let results = engine.search("face");
        let positions: Vec<usize> = results
            .iter()
            .map(|r| engine.catalog().iter().position(|e| e.is_same_entry(r)).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_empty_search_is_no_search() {
        let engine = sample();
        assert_eq!(engine.search("   ").len(), engine.catalog().len());
    }

    fn reactions() -> QueryEngine {
        engine(&[
            ("😀", "grinning face", "Reactions"),
            ("😢", "crying face", "Reactions"),
            ("😂", "face with tears of joy", "Reactions"),
            ("😔", "pensive face", "Reactions"),
            ("💔", "broken heart", "Reactions"),
            ("🦊", "fox", "Animals & Nature"),
        ])
    }

    #[test]
    fn test_sad_view_excludes_happy() {
        let engine = reactions();
        // "tears" is sad but "joy" is happy
        assert_eq!(
            names(&engine.search("sad")),
            vec!["crying face", "pensive face", "broken heart"]
        );
    }

    #[test]
    fn test_sad_view_honours_category_terms() {
        // Smileys carry both "sad" and "happy" as default terms, so none qualify
        let engine = sample();
        assert!(engine.search("sad").is_empty());
    }

    #[test]
    fn test_sad_view_is_cached() {
        let engine = reactions();
        assert!(engine.sad_view.get().is_none());
        let first = names(&engine.search(" SAD "));
        assert!(engine.sad_view.get().is_some());
        assert_eq!(first, names(&engine.search("sad")));
    }

    #[test]
    fn test_suggestions_truncate() {
        let engine = sample();
        assert_eq!(engine.suggestions("face", 2).len(), 2);
        assert_eq!(
            names(&engine.suggestions("face", 2)),
            names(&engine.search("face")[..2])
        );
        assert!(engine.suggestions("", DEFAULT_SUGGESTION_LIMIT).is_empty());
    }

    #[test]
    fn test_related_excludes_self_and_limits() {
        let engine = sample();
        for entry in engine.catalog() {
            let related = engine.related(entry, 2);
            assert!(related.len() <= 2);
            assert!(related.iter().all(|r| !r.is_same_entry(entry)));
            assert!(related.iter().all(|r| r.group == entry.group));
        }
        let grinning = &engine.catalog().entries()[0];
        assert_eq!(
            names(&engine.related(grinning, DEFAULT_RELATED_LIMIT)),
            vec!["crying face", "face with tears of joy", "pensive face"]
        );
    }

    #[test]
    fn test_related_keeps_same_glyph_different_name() {
        let engine = engine(&[
            ("⭐", "star", "Symbols"),
            ("⭐", "gold star", "Symbols"),
        ]);
        let star = &engine.catalog().entries()[0];
        assert_eq!(names(&engine.related(star, DEFAULT_RELATED_LIMIT)), vec!["gold star"]);
    }

    #[test]
    fn test_by_keyword_is_exact() {
        let engine = sample();
        assert_eq!(names(&engine.by_keyword("Clever")), vec!["fox"]);
        assert!(engine.by_keyword("clev").is_empty());
    }

    #[test]
    fn test_find_by_identity() {
        let engine = sample();
        let pizza = engine.find("🍕", "pizza", "Food & Drink").unwrap();
        assert_eq!(pizza.name, "pizza");
        assert!(engine.find("🍕", "pizza", "Objects").is_none());
    }
}
