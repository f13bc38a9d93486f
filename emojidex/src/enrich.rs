//! Enricher: derives keywords, description and usage for one raw entry.
//!
//! Pure and total. Missing lexicon data is never an error; every lookup has a
//! fallback (generic description, category usage, generic usage).

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::interface::EnrichedEntry;
use crate::lexicon::{fold, Lexicon};
use crate::models::RawEntry;

/// Separators between name tokens: whitespace, hyphen, underscore
static TOKEN_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-_]+").unwrap());

/// Stands in for a blank name so every entry keeps a keyword.
const UNNAMED: &str = "unnamed";

pub fn enrich(entry: &RawEntry, lexicon: &Lexicon) -> EnrichedEntry {
    let folded = fold(&entry.name);
    let name_lower = if folded.is_empty() { UNNAMED } else { folded.as_str() };

    EnrichedEntry {
        glyph: entry.glyph.clone(),
        name: entry.name.clone(),
        group: entry.group.clone(),
        subcategory: entry.subcategory.clone(),
        keywords: derive_keywords(name_lower, &entry.group, lexicon),
        description: derive_description(name_lower, lexicon),
        usage: derive_usage(name_lower, &entry.group, lexicon),
    }
}

/// Insertion-ordered set of case-folded terms.
#[derive(Default)]
struct KeywordSet {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl KeywordSet {
    fn push(&mut self, term: &str) {
        let term = fold(term);
        if term.is_empty() || self.seen.contains(&term) {
            return;
        }
        self.seen.insert(term.clone());
        self.ordered.push(term);
    }

    fn extend<'a>(&mut self, terms: impl IntoIterator<Item = &'a str>) {
        for term in terms {
            self.push(term);
        }
    }
}

fn derive_keywords(name_lower: &str, group: &str, lexicon: &Lexicon) -> Vec<String> {
    let mut keywords = KeywordSet::default();

    keywords.push(name_lower);
    keywords.extend(TOKEN_SEPARATOR.split(name_lower));
    keywords.extend(lexicon.matching_terms(name_lower));
    keywords.extend(lexicon.category_terms(group).iter().map(String::as_str));
    for theme in lexicon.matching_themes(name_lower) {
        keywords.extend(theme.terms.iter().map(String::as_str));
    }

    keywords.ordered
}

fn derive_description(name_lower: &str, lexicon: &Lexicon) -> String {
    match lexicon.description(name_lower) {
        Some(description) => description.to_string(),
        None => format!("A {name_lower} emoji that adds personality and emotion to your messages."),
    }
}

fn derive_usage(name_lower: &str, group: &str, lexicon: &Lexicon) -> String {
    if let Some(rule) = lexicon.usage_rule(name_lower) {
        return rule.usage.clone();
    }
    lexicon
        .category_usage(group)
        .unwrap_or(emoji_lexicon::GENERIC_USAGE)
        .to_string()
}
