//! Catalog: the immutable, ordered collection of enriched entries.
//!
//! Built once at startup. Order is load order (category → subcategory →
//! entry). A failed or empty load is replaced by the embedded fallback set so
//! the catalog is never empty; the failure is reported as a `LoadNotice`.

use chrono::Utc;

use crate::enrich::enrich;
use crate::interface::{CategoryCount, EnrichedEntry, LoadNotice};
use crate::lexicon::Lexicon;
use crate::models::{RawDataset, RawEntry};
use crate::source::{CatalogSource, LoadError};

const FALLBACK_MESSAGE: &str =
    "Failed to load emoji data. Using limited emoji set. Please ensure the data source is available.";

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<EnrichedEntry>,
}

/// Result of a load: always a usable catalog, plus a notice when the fallback
/// set is in use.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub catalog: Catalog,
    pub notice: Option<LoadNotice>,
}

impl Catalog {
    /// Enrich every entry of the dataset, in dataset order.
    pub fn build(dataset: &RawDataset, lexicon: &Lexicon) -> Self {
        #[cfg(feature = "perf-log")]
        let t0 = std::time::Instant::now();

        let mut entries = Vec::with_capacity(dataset.entry_count());
        for category in &dataset.categories {
            let before = entries.len();
            for subcategory in &category.subcategories {
                entries.extend(subcategory.entries.iter().map(|raw| enrich(raw, lexicon)));
            }
            tracing::debug!(
                category = %category.name,
                entries = entries.len() - before,
                "category enriched"
            );
        }

        #[cfg(feature = "perf-log")]
        tracing::debug!(
            entries = entries.len(),
            elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0,
            "[perf] enrichment"
        );

        Self { entries }
    }

    /// Catalog of the embedded fallback entries.
    pub fn fallback(lexicon: &Lexicon) -> Self {
        let dataset: RawDataset = emoji_lexicon::FALLBACK_ENTRIES
            .iter()
            .map(|e| RawEntry::new(e.glyph, e.name, e.group, ""))
            .collect();
        Self::build(&dataset, lexicon)
    }

    /// Fetch the dataset from `source` and build the catalog, falling back to
    /// the embedded set on any failure. Never returns an error.
    pub async fn load(source: &dyn CatalogSource, lexicon: &Lexicon) -> LoadOutcome {
        tracing::info!(source = %source.describe(), "loading emoji dataset");
        let fetched = source.fetch().await;
        Self::from_fetch(fetched, lexicon)
    }

    /// Build from the result of a fetch. An empty dataset counts as a failure.
    pub fn from_fetch(fetched: Result<RawDataset, LoadError>, lexicon: &Lexicon) -> LoadOutcome {
        let dataset = fetched.and_then(|dataset| {
            if dataset.entry_count() == 0 {
                Err(LoadError::Empty)
            } else {
                Ok(dataset)
            }
        });

        match dataset {
            Ok(dataset) => {
                let catalog = Self::build(&dataset, lexicon);
                tracing::info!(
                    categories = dataset.categories.len(),
                    entries = catalog.len(),
                    "emoji dataset loaded"
                );
                for count in catalog.category_counts() {
                    tracing::debug!(group = %count.group, count = count.count, "category size");
                }
                LoadOutcome { catalog, notice: None }
            }
            Err(err) => Self::recover(err, lexicon),
        }
    }

    /// Substitute the fallback set for a failed load.
    pub fn recover(err: LoadError, lexicon: &Lexicon) -> LoadOutcome {
        tracing::warn!(error = %err, "emoji dataset unavailable, using fallback set");
        let catalog = Self::fallback(lexicon);
        let notice = LoadNotice {
            message: FALLBACK_MESSAGE.to_string(),
            cause: err.to_string(),
            fallback_size: catalog.len() as u64,
            occurred_at_unix: Utc::now().timestamp(),
        };
        LoadOutcome {
            catalog,
            notice: Some(notice),
        }
    }

    pub fn entries(&self) -> &[EnrichedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnrichedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct groups in first-appearance order.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !groups.contains(&entry.group.as_str()) {
                groups.push(&entry.group);
            }
        }
        groups
    }

    /// Entry count per group, in first-appearance order.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = Vec::new();
        for entry in &self.entries {
            match counts.iter_mut().find(|c| c.group == entry.group) {
                Some(count) => count.count += 1,
                None => counts.push(CategoryCount {
                    group: entry.group.clone(),
                    count: 1,
                }),
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a EnrichedEntry;
    type IntoIter = std::slice::Iter<'a, EnrichedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
