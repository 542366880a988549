//! Building metric definitions from export metadata

use indexmap::IndexMap;
use sonargraph_meta::{ExportMetadata, LEVEL_MODULE, LEVEL_SYSTEM, MetricId};

use crate::keys::{DOMAIN_SONARGRAPH, metric_key};
use crate::metric::{Direction, MetricDefinition, ValueKind};
use crate::supplementary::supplementary_definitions;

/// Longest description the host accepts, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

const ELLIPSIS: &str = "...";

/// Size metrics: a change of their value is neither an improvement nor a
/// degradation.
pub const SIZE_METRICS: [&str; 2] = ["JavaByteCodeInstructions", "CoreSourceElementCount"];

/// Builds the metric catalog from export metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricCatalogBuilder;

impl MetricCatalogBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build definitions for all system and module level metrics, followed
    /// by the supplementary metrics.
    ///
    /// A metric present on both levels is taken from the system level.
    pub fn build(&self, metadata: &ExportMetadata) -> Vec<MetricDefinition> {
        let mut by_name: IndexMap<&str, &MetricId> = IndexMap::new();
        for level in [LEVEL_SYSTEM, LEVEL_MODULE] {
            for id in metadata.metric_ids_for_level(level) {
                by_name.entry(id.name.as_str()).or_insert(id);
            }
        }

        let mut metrics: Vec<MetricDefinition> =
            by_name.values().map(|id| definition_for(id)).collect();
        metrics.extend(supplementary_definitions());
        metrics
    }
}

fn definition_for(id: &MetricId) -> MetricDefinition {
    let definition = MetricDefinition {
        key: metric_key(&id.name),
        name: id.presentation_name.clone(),
        value_kind: if id.is_float {
            ValueKind::Float
        } else {
            ValueKind::Int
        },
        description: truncate_description(&id.description).trim().to_string(),
        domain: DOMAIN_SONARGRAPH.to_string(),
        direction: Direction::None,
        qualitative: false,
    };

    if SIZE_METRICS.contains(&id.name.as_str()) {
        definition
    } else {
        definition.worst_is_bad()
    }
}

/// Cut descriptions longer than [`MAX_DESCRIPTION_LENGTH`] characters so
/// that, ellipsis included, they are exactly that long.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_LENGTH {
        return description.to_string();
    }

    let keep = MAX_DESCRIPTION_LENGTH - ELLIPSIS.len();
    let mut truncated: String = description.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
