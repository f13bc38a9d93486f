//! Enrichment lexicon
//!
//! An immutable set of lookup tables: name-substring keys → related terms,
//! per-category default terms, cross-cutting themes, canonical descriptions,
//! and usage sentences. The built-in lexicon is assembled once from the
//! `emoji-lexicon` data crate; custom lexicons are built with the `with_*`
//! methods.
//!
//! Name-keyed tables are case-folded on insertion. Category tables are keyed
//! by the exact category name.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static BUILTIN: Lazy<Lexicon> = Lazy::new(Lexicon::from_embedded);

/// A substring key and the terms it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermSet {
    pub key: String,
    pub terms: Vec<String>,
}

/// Seasonal/festive rule: fires when any trigger occurs in the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub triggers: Vec<String>,
    pub terms: Vec<String>,
}

impl Theme {
    fn fires_for(&self, name_lower: &str) -> bool {
        self.triggers.iter().any(|t| name_lower.contains(t.as_str()))
    }
}

/// Name-substring usage rule. Rules are tried in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRule {
    pub name: String,
    pub triggers: Vec<String>,
    pub usage: String,
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    terms: Vec<TermSet>,
    category_terms: Vec<(String, Vec<String>)>,
    themes: Vec<Theme>,
    descriptions: HashMap<String, String>,
    usage_rules: Vec<UsageRule>,
    category_usage: Vec<(String, String)>,
}

impl Lexicon {
    /// The lexicon shipped with the crate, built on first use.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    fn from_embedded() -> Self {
        let mut lexicon = Lexicon::default();
        for row in emoji_lexicon::term_rules() {
            lexicon = lexicon.with_terms(&row.key, row.terms.as_slice());
        }
        for row in emoji_lexicon::category_terms() {
            lexicon = lexicon.with_category_terms(&row.key, row.terms.as_slice());
        }
        for row in emoji_lexicon::themes() {
            lexicon = lexicon.with_theme(&row.theme, row.triggers.as_slice(), row.terms.as_slice());
        }
        for row in emoji_lexicon::descriptions() {
            lexicon = lexicon.with_description(&row.key, &row.text);
        }
        for row in emoji_lexicon::usage_rules() {
            lexicon = lexicon.with_usage_rule(&row.rule, row.triggers.as_slice(), &row.usage);
        }
        for row in emoji_lexicon::category_usage() {
            lexicon = lexicon.with_category_usage(&row.key, &row.text);
        }
        lexicon
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────────────

    /// Add a substring key. Repeating a key replaces its terms.
    pub fn with_terms<S: AsRef<str>>(mut self, key: &str, terms: &[S]) -> Self {
        let key = fold(key);
        if key.is_empty() {
            return self;
        }
        let terms = fold_all(terms);
        match self.terms.iter_mut().find(|t| t.key == key) {
            Some(existing) => existing.terms = terms,
            None => self.terms.push(TermSet { key, terms }),
        }
        self
    }

    pub fn with_category_terms<S: AsRef<str>>(mut self, category: &str, terms: &[S]) -> Self {
        let terms = fold_all(terms);
        match self.category_terms.iter_mut().find(|(c, _)| c == category) {
            Some((_, existing)) => *existing = terms,
            None => self.category_terms.push((category.to_string(), terms)),
        }
        self
    }

    pub fn with_theme<S: AsRef<str>>(mut self, name: &str, triggers: &[S], terms: &[S]) -> Self {
        self.themes.push(Theme {
            name: name.to_string(),
            triggers: fold_all(triggers),
            terms: fold_all(terms),
        });
        self
    }

    pub fn with_description(mut self, name: &str, description: &str) -> Self {
        self.descriptions.insert(fold(name), description.to_string());
        self
    }

    pub fn with_usage_rule<S: AsRef<str>>(mut self, name: &str, triggers: &[S], usage: &str) -> Self {
        self.usage_rules.push(UsageRule {
            name: name.to_string(),
            triggers: fold_all(triggers),
            usage: usage.to_string(),
        });
        self
    }

    pub fn with_category_usage(mut self, category: &str, usage: &str) -> Self {
        match self.category_usage.iter_mut().find(|(c, _)| c == category) {
            Some((_, existing)) => *existing = usage.to_string(),
            None => self
                .category_usage
                .push((category.to_string(), usage.to_string())),
        }
        self
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Lookups (callers pass an already case-folded name)
    // ─────────────────────────────────────────────────────────────────────────────

    /// Terms of every key contained in the name. All matching keys contribute,
    /// in table order. A key equal to the name is the trivial containment case.
    pub fn matching_terms<'a>(&'a self, name_lower: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.terms
            .iter()
            .filter(move |t| name_lower.contains(t.key.as_str()))
            .flat_map(|t| t.terms.iter().map(String::as_str))
    }

    /// Default terms for a category; empty for unrecognised categories.
    pub fn category_terms(&self, group: &str) -> &[String] {
        self.category_terms
            .iter()
            .find(|(c, _)| c == group)
            .map(|(_, terms)| terms.as_slice())
            .unwrap_or(&[])
    }

    /// Every theme whose triggers occur in the name.
    pub fn matching_themes<'a>(&'a self, name_lower: &'a str) -> impl Iterator<Item = &'a Theme> + 'a {
        self.themes.iter().filter(move |t| t.fires_for(name_lower))
    }

    pub fn description(&self, name_lower: &str) -> Option<&str> {
        self.descriptions.get(name_lower).map(String::as_str)
    }

    /// First usage rule whose trigger occurs in the name.
    pub fn usage_rule(&self, name_lower: &str) -> Option<&UsageRule> {
        self.usage_rules
            .iter()
            .find(|r| r.triggers.iter().any(|t| name_lower.contains(t.as_str())))
    }

    pub fn category_usage(&self, group: &str) -> Option<&str> {
        self.category_usage
            .iter()
            .find(|(c, _)| c == group)
            .map(|(_, usage)| usage.as_str())
    }

    /// Categories with default terms, in table order.
    pub fn known_categories(&self) -> impl Iterator<Item = &str> {
        self.category_terms.iter().map(|(c, _)| c.as_str())
    }

    pub fn term_key_count(&self) -> usize {
        self.terms.len()
    }
}

pub(crate) fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

fn fold_all<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    terms
        .iter()
        .map(|t| fold(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.term_key_count() > 1000);
        assert_eq!(lexicon.known_categories().count(), 9);
        assert!(lexicon.known_categories().any(|c| c == "Food & Drink"));
        assert!(lexicon.category_usage("Flags").is_some());
        assert_eq!(
            lexicon.description("red heart"),
            Some("The classic symbol of love and affection.")
        );
    }

    #[test]
    fn test_substring_keys_all_match() {
        let lexicon = Lexicon::default()
            .with_terms("moon", &["night", "sleepy"])
            .with_terms("full moon", &["bright"])
            .with_terms("sun", &["day"]);

        let terms: Vec<&str> = lexicon.matching_terms("full moon").collect();
        assert_eq!(terms, vec!["night", "sleepy", "bright"]);
    }

    #[test]
    fn test_keys_and_terms_are_folded() {
        let lexicon = Lexicon::default().with_terms(" Fox ", &["Clever", "  ", "SLY"]);
        let terms: Vec<&str> = lexicon.matching_terms("arctic fox").collect();
        assert_eq!(terms, vec!["clever", "sly"]);
    }

    #[test]
    fn test_empty_key_is_ignored() {
        let lexicon = Lexicon::default().with_terms("", &["everything"]);
        assert_eq!(lexicon.matching_terms("anything").count(), 0);
    }

    #[test]
    fn test_repeated_key_replaces_terms() {
        let lexicon = Lexicon::default()
            .with_terms("bomb", &["explosion"])
            .with_terms("bomb", &["danger"]);
        let terms: Vec<&str> = lexicon.matching_terms("bomb").collect();
        assert_eq!(terms, vec!["danger"]);
    }

    #[test]
    fn test_category_terms_are_exact() {
        let lexicon = Lexicon::default().with_category_terms("Flags", &["flag", "nation"]);
        assert_eq!(lexicon.category_terms("Flags").len(), 2);
        assert!(lexicon.category_terms("flags").is_empty());
        assert!(lexicon.category_terms("Nature").is_empty());
    }

    #[test]
    fn test_usage_rules_first_match_wins() {
        let lexicon = Lexicon::default()
            .with_usage_rule("celebration", &["party", "birthday"], "celebrate")
            .with_usage_rule("love", &["heart"], "love");

        assert_eq!(lexicon.usage_rule("birthday heart").unwrap().usage, "celebrate");
        assert_eq!(lexicon.usage_rule("red heart").unwrap().usage, "love");
        assert!(lexicon.usage_rule("pizza").is_none());
    }

    #[test]
    fn test_themes_are_independent() {
        let lexicon = Lexicon::builtin();
        let themes: Vec<&str> = lexicon
            .matching_themes("snowman party in the sun")
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(themes, vec!["winter", "summer", "festive"]);
    }
}
