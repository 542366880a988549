//! Merging of several exports into one catalog
//!
//! Exports are merged in the order given. Within each level a metric id whose
//! name was already contributed by an earlier export is skipped, and the same
//! holds for issue categories. Levels and categories keep the order in which
//! they were first seen.

use crate::{Error, ExportMetadata, Result};

/// Merge `exports` into a single catalog.
///
/// Fails with [`Error::NothingToMerge`] if `exports` is empty.
pub fn merge(exports: Vec<ExportMetadata>) -> Result<ExportMetadata> {
    if exports.is_empty() {
        return Err(Error::NothingToMerge);
    }

    let mut builder = ExportMetadata::builder();
    let mut skipped = 0usize;

    for export in &exports {
        for level in export.metric_levels() {
            for id in export.metric_ids_for_level(level) {
                if !builder.add_metric(level, id.clone()) {
                    skipped += 1;
                }
            }
        }
        for category in export.issue_categories().values() {
            if !builder.add_category(category.clone()) {
                skipped += 1;
            }
        }
        for source in export.sources() {
            builder.add_source(source.clone());
        }
    }

    if skipped > 0 {
        tracing::debug!(
            "Skipped {} entries already provided by earlier exports while merging {} exports",
            skipped,
            exports.len()
        );
    }

    Ok(builder.build())
}
