//! The loaded export catalog
//!
//! On disk an export is a document with a `levels` table, mapping each level
//! name to its metric ids, and an `issue_categories` list:
//!
//! ```toml
//! [[levels.System]]
//! name = "CoreSourceElementCount"
//! presentation_name = "Source Elements"
//!
//! [[levels.Module]]
//! name = "Cycles"
//! presentation_name = "Cyclic Elements"
//! float = true
//!
//! [[issue_categories]]
//! name = "ArchitectureViolation"
//! presentation_name = "Architecture Violation"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{IssueCategory, MetricId};

/// Serialized form of an export file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub(crate) struct ExportDocument {
    #[serde(default)]
    pub levels: IndexMap<String, Vec<MetricId>>,
    #[serde(default)]
    pub issue_categories: Vec<IssueCategory>,
}

/// Catalog of metric ids per level and issue categories.
///
/// Produced by a [`MetadataLoader`](crate::MetadataLoader) and immutable
/// afterwards. Levels, metric ids and categories keep the order in which
/// they were first encountered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportMetadata {
    levels: IndexMap<String, IndexMap<String, MetricId>>,
    issue_categories: IndexMap<String, IssueCategory>,
    sources: Vec<String>,
}

impl ExportMetadata {
    /// Start building a catalog in memory.
    pub fn builder() -> ExportMetadataBuilder {
        ExportMetadataBuilder::default()
    }

    /// Level names in encounter order.
    pub fn metric_levels(&self) -> impl Iterator<Item = &str> {
        self.levels.keys().map(String::as_str)
    }

    /// Metric ids of a level in encounter order.
    ///
    /// An unknown level yields no ids.
    pub fn metric_ids_for_level<'a>(
        &'a self,
        level: &str,
    ) -> impl Iterator<Item = &'a MetricId> + use<'a> {
        self.levels
            .get(level)
            .into_iter()
            .flat_map(|ids| ids.values())
    }

    /// Issue categories keyed by name, in encounter order.
    pub fn issue_categories(&self) -> &IndexMap<String, IssueCategory> {
        &self.issue_categories
    }

    /// Labels of the streams or files this catalog was loaded from.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Total number of metric ids over all levels.
    pub fn metric_count(&self) -> usize {
        self.levels.values().map(IndexMap::len).sum()
    }
}

/// Incremental construction of an [`ExportMetadata`].
///
/// Entries are first-wins: a metric id whose name already exists on the same
/// level, or a category whose name already exists, is not inserted.
#[derive(Debug, Default)]
pub struct ExportMetadataBuilder {
    inner: ExportMetadata,
}

impl ExportMetadataBuilder {
    /// Insert a metric id on `level`.
    ///
    /// Returns `false` if the level already holds a metric of that name.
    pub fn add_metric(&mut self, level: &str, id: MetricId) -> bool {
        let ids = self.inner.levels.entry(level.to_string()).or_default();
        if ids.contains_key(&id.name) {
            return false;
        }
        ids.insert(id.name.clone(), id);
        true
    }

    /// Insert an issue category.
    ///
    /// Returns `false` if a category of that name already exists.
    pub fn add_category(&mut self, category: IssueCategory) -> bool {
        if self.inner.issue_categories.contains_key(&category.name) {
            return false;
        }
        self.inner
            .issue_categories
            .insert(category.name.clone(), category);
        true
    }

    /// Record a source label.
    pub fn add_source(&mut self, label: impl Into<String>) {
        self.inner.sources.push(label.into());
    }

    pub fn metric(mut self, level: &str, id: MetricId) -> Self {
        self.add_metric(level, id);
        self
    }

    pub fn category(mut self, category: IssueCategory) -> Self {
        self.add_category(category);
        self
    }

    pub fn source(mut self, label: impl Into<String>) -> Self {
        self.add_source(label);
        self
    }

    pub fn build(self) -> ExportMetadata {
        self.inner
    }
}
