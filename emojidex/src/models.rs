//! Raw dataset model
//!
//! The external dataset is a nested mapping of category → subcategory → list of
//! entries. Access is tolerant: anything that is not the expected shape below
//! the top level is treated as empty instead of failing the load.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::source::LoadError;

/// An unenriched catalog item as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(rename = "emoji", alias = "glyph", default)]
    pub glyph: String,
    #[serde(default)]
    pub name: String,
    /// Filled from the enclosing category key when parsed from a dataset
    #[serde(default)]
    pub group: String,
    /// Filled from the enclosing subcategory key when parsed from a dataset
    #[serde(default)]
    pub subcategory: String,
}

impl RawEntry {
    pub fn new(glyph: &str, name: &str, group: &str, subcategory: &str) -> Self {
        Self {
            glyph: glyph.to_string(),
            name: name.to_string(),
            group: group.to_string(),
            subcategory: subcategory.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSubcategory {
    pub name: String,
    pub entries: Vec<RawEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawCategory {
    pub name: String,
    pub subcategories: Vec<RawSubcategory>,
}

/// The full nested dataset, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawDataset {
    pub categories: Vec<RawCategory>,
}

impl RawDataset {
    /// Parse a dataset document. Accepts `{"emojis": {...}}` or the category
    /// mapping itself.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let Value::Object(mut root) = value else {
            return Err(LoadError::Shape("top level must be an object".to_string()));
        };

        let categories = match root.remove("emojis") {
            Some(Value::Object(inner)) => inner,
            Some(_) => return Err(LoadError::Shape("`emojis` must be an object".to_string())),
            None => root,
        };

        let mut dataset = RawDataset::default();
        let mut skipped = 0usize;
        for (category, subcategories) in categories {
            let subcategories = as_object(&subcategories)
                .map(|subs| {
                    subs.iter()
                        .map(|(subcategory, list)| RawSubcategory {
                            name: subcategory.clone(),
                            entries: parse_entries(list, &category, subcategory, &mut skipped),
                        })
                        .collect()
                })
                .unwrap_or_default();
            dataset.categories.push(RawCategory {
                name: category,
                subcategories,
            });
        }

        if skipped > 0 {
            tracing::debug!(skipped, "skipped dataset entries without a name");
        }
        Ok(dataset)
    }

    /// Append an entry under its own group and subcategory, creating either
    /// one at the end if it does not exist yet.
    pub fn push(&mut self, entry: RawEntry) {
        let ci = match self.categories.iter().position(|c| c.name == entry.group) {
            Some(i) => i,
            None => {
                self.categories.push(RawCategory {
                    name: entry.group.clone(),
                    subcategories: Vec::new(),
                });
                self.categories.len() - 1
            }
        };
        let category = &mut self.categories[ci];
        let si = match category
            .subcategories
            .iter()
            .position(|s| s.name == entry.subcategory)
        {
            Some(i) => i,
            None => {
                category.subcategories.push(RawSubcategory {
                    name: entry.subcategory.clone(),
                    entries: Vec::new(),
                });
                category.subcategories.len() - 1
            }
        };
        category.subcategories[si].entries.push(entry);
    }

    /// Entries in category → subcategory → list order.
    pub fn entries(&self) -> impl Iterator<Item = &RawEntry> {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories.iter())
            .flat_map(|s| s.entries.iter())
    }

    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }
}

impl FromIterator<RawEntry> for RawDataset {
    fn from_iter<I: IntoIterator<Item = RawEntry>>(iter: I) -> Self {
        let mut dataset = RawDataset::default();
        for entry in iter {
            dataset.push(entry);
        }
        dataset
    }
}

fn as_object(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn parse_entries(list: &Value, category: &str, subcategory: &str, skipped: &mut usize) -> Vec<RawEntry> {
    let Value::Array(items) = list else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let parsed = RawEntry::deserialize(item).ok();
            match parsed {
                Some(entry) if !entry.name.trim().is_empty() => Some(RawEntry {
                    group: category.to_string(),
                    subcategory: subcategory.to_string(),
                    ..entry
                }),
                _ => {
                    *skipped += 1;
                    None
                }
            }
        })
        .collect()
}
