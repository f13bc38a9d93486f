//! Enrichment lexicon and fallback dataset for emojidex.
//!
//! The lexicon lives in `data/*.csv` and is embedded at compile time. Each table
//! is parsed once, on first access. Multi-valued cells are `|`-separated.

use once_cell::sync::Lazy;

mod fallback;

pub use fallback::{FallbackEntry, FALLBACK_ENTRIES};

const TERMS_CSV: &str = include_str!("../data/terms.csv");
const CATEGORY_TERMS_CSV: &str = include_str!("../data/category_terms.csv");
const THEMES_CSV: &str = include_str!("../data/themes.csv");
const DESCRIPTIONS_CSV: &str = include_str!("../data/descriptions.csv");
const USAGE_RULES_CSV: &str = include_str!("../data/usage_rules.csv");
const CATEGORY_USAGE_CSV: &str = include_str!("../data/category_usage.csv");

/// Usage sentence for entries whose category has no usage row.
pub const GENERIC_USAGE: &str = "A versatile emoji that can add personality to your messages.";

/// A key and the terms it contributes (`terms.csv`, `category_terms.csv`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRow {
    pub key: String,
    pub terms: Vec<String>,
}

/// Cross-cutting rule: any trigger substring in a name appends `terms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeRow {
    pub theme: String,
    pub triggers: Vec<String>,
    pub terms: Vec<String>,
}

/// A key and one sentence (`descriptions.csv`, `category_usage.csv`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseRow {
    pub key: String,
    pub text: String,
}

/// Ordered usage rule; rows earlier in `usage_rules.csv` take priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRuleRow {
    pub rule: String,
    pub triggers: Vec<String>,
    pub usage: String,
}

static TERM_RULES: Lazy<Vec<TermRow>> = Lazy::new(|| parse_term_rows(TERMS_CSV));
static CATEGORY_TERMS: Lazy<Vec<TermRow>> = Lazy::new(|| parse_term_rows(CATEGORY_TERMS_CSV));
static DESCRIPTIONS: Lazy<Vec<PhraseRow>> = Lazy::new(|| parse_phrase_rows(DESCRIPTIONS_CSV));
static CATEGORY_USAGE: Lazy<Vec<PhraseRow>> = Lazy::new(|| parse_phrase_rows(CATEGORY_USAGE_CSV));

static THEMES: Lazy<Vec<ThemeRow>> = Lazy::new(|| {
    records(THEMES_CSV)
        .into_iter()
        .map(|r| ThemeRow {
            theme: field(&r, 0).to_string(),
            triggers: split_terms(field(&r, 1)),
            terms: split_terms(field(&r, 2)),
        })
        .collect()
});

static USAGE_RULES: Lazy<Vec<UsageRuleRow>> = Lazy::new(|| {
    records(USAGE_RULES_CSV)
        .into_iter()
        .map(|r| UsageRuleRow {
            rule: field(&r, 0).to_string(),
            triggers: split_terms(field(&r, 1)),
            usage: field(&r, 2).to_string(),
        })
        .collect()
});

/// Substring key → related search terms, in file order.
pub fn term_rules() -> &'static [TermRow] {
    &TERM_RULES
}

/// Default terms per top-level category.
pub fn category_terms() -> &'static [TermRow] {
    &CATEGORY_TERMS
}

/// Seasonal and festive rules.
pub fn themes() -> &'static [ThemeRow] {
    &THEMES
}

/// Canonical descriptions keyed by exact (lowercase) name.
pub fn descriptions() -> &'static [PhraseRow] {
    &DESCRIPTIONS
}

/// Name-substring usage rules in priority order.
pub fn usage_rules() -> &'static [UsageRuleRow] {
    &USAGE_RULES
}

/// Usage sentence per top-level category.
pub fn category_usage() -> &'static [PhraseRow] {
    &CATEGORY_USAGE
}

fn records(data: &str) -> Vec<csv::StringRecord> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes())
        .records()
        .collect::<Result<Vec<_>, _>>()
        .expect("embedded lexicon table is valid CSV")
}

fn field(record: &csv::StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or_default()
}

fn split_terms(cell: &str) -> Vec<String> {
    cell.split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_term_rows(data: &str) -> Vec<TermRow> {
    records(data)
        .into_iter()
        .map(|r| TermRow {
            key: field(&r, 0).to_string(),
            terms: split_terms(field(&r, 1)),
        })
        .collect()
}

fn parse_phrase_rows(data: &str) -> Vec<PhraseRow> {
    records(data)
        .into_iter()
        .map(|r| PhraseRow {
            key: field(&r, 0).to_string(),
            text: field(&r, 1).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_parse() {
        assert!(term_rules().len() > 1000);
        assert_eq!(category_terms().len(), 9);
        assert_eq!(category_usage().len(), 9);
        assert_eq!(themes().len(), 5);
        assert_eq!(usage_rules().len(), 5);
        assert!(!descriptions().is_empty());
    }

    #[test]
    fn test_quoted_cells_keep_commas() {
        let grinning = descriptions()
            .iter()
            .find(|row| row.key == "grinning face")
            .unwrap();
        assert_eq!(grinning.text, "A cheerful, happy face showing teeth in a big smile.");
    }

    #[test]
    fn test_moon_terms() {
        let moon = term_rules().iter().find(|row| row.key == "moon").unwrap();
        assert!(moon.terms.contains(&"night".to_string()));
    }

    #[test]
    fn test_usage_rule_priority() {
        let order: Vec<&str> = usage_rules().iter().map(|r| r.rule.as_str()).collect();
        assert_eq!(order, vec!["celebration", "love", "winter", "summer", "flag"]);
    }

    #[test]
    fn test_every_key_is_lowercase() {
        for row in term_rules() {
            assert_eq!(row.key, row.key.to_lowercase());
            assert!(!row.terms.is_empty(), "{} has no terms", row.key);
        }
    }

    #[test]
    fn test_fallback_entries() {
        assert_eq!(FALLBACK_ENTRIES.len(), 8);
        assert!(FALLBACK_ENTRIES.iter().all(|e| !e.name.is_empty() && !e.glyph.is_empty()));
    }
}
