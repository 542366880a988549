//! Metrics the plugin registers in addition to those found in the export
//!
//! These back the structural debt, structure and architecture widgets and
//! are always appended after the export-derived metrics, in table order.

use crate::keys::DOMAIN_SONARGRAPH;
use crate::metric::{Direction, MetricDefinition, ValueKind};

#[derive(Debug)]
pub struct SupplementaryMetric {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub value_kind: ValueKind,
    pub direction: Direction,
    pub qualitative: bool,
}

impl SupplementaryMetric {
    pub fn to_definition(&self) -> MetricDefinition {
        MetricDefinition {
            key: self.key.to_string(),
            name: self.name.to_string(),
            value_kind: self.value_kind,
            description: self.description.to_string(),
            domain: DOMAIN_SONARGRAPH.to_string(),
            direction: self.direction,
            qualitative: self.qualitative,
        }
    }
}

macro_rules! supplementary {
    ($key:expr, $name:expr, $description:expr, $kind:ident) => {
        SupplementaryMetric {
            key: $key,
            name: $name,
            description: $description,
            value_kind: ValueKind::$kind,
            direction: Direction::None,
            qualitative: false,
        }
    };
    ($key:expr, $name:expr, $description:expr, $kind:ident, worst) => {
        SupplementaryMetric {
            key: $key,
            name: $name,
            description: $description,
            value_kind: ValueKind::$kind,
            direction: Direction::Worst,
            qualitative: true,
        }
    };
}

pub const SUPPLEMENTARY_METRICS: &[SupplementaryMetric] = &[
    // Structural debt widget
    supplementary!(
        "sg_p.STRUCTURAL_DEBT_COST",
        "Structural Debt Cost",
        "Estimated cost of removing the structural debt",
        Float,
        worst
    ),
    supplementary!(
        "sg_p.CURRENT_VIRTUAL_MODEL",
        "Virtual Model",
        "Name of the virtual model used for the analysis",
        String
    ),
    supplementary!(
        "sg_p.VIRTUAL_MODEL_FEATURE_AVAILABLE",
        "Virtual Model Feature Available",
        "Whether the license includes the virtual model feature",
        Bool
    ),
    supplementary!(
        "sg_p.NUMBER_OF_TASKS",
        "Tasks",
        "Number of tasks defined in the virtual model",
        Int,
        worst
    ),
    supplementary!(
        "sg_p.NUMBER_OF_UNAPPLICABLE_TASKS",
        "Unapplicable Tasks",
        "Number of tasks that no longer match any element",
        Int,
        worst
    ),
    supplementary!(
        "sg_p.NUMBER_OF_RESOLUTIONS",
        "Resolutions",
        "Number of issue resolutions defined in the virtual model",
        Int,
        worst
    ),
    supplementary!(
        "sg_p.NUMBER_OF_UNAPPLICABLE_RESOLUTIONS",
        "Unapplicable Resolutions",
        "Number of resolutions that no longer match any issue",
        Int,
        worst
    ),
    supplementary!(
        "sg_p.NUMBER_OF_REFACTORINGS",
        "Refactorings",
        "Number of refactorings defined in the virtual model",
        Int,
        worst
    ),
    supplementary!(
        "sg_p.NUMBER_OF_UNAPPLICABLE_REFACTORINGS",
        "Unapplicable Refactorings",
        "Number of refactorings that can no longer be applied",
        Int,
        worst
    ),
    supplementary!(
        "sg_p.NUMBER_OF_PARSER_DEPENDENCIES_AFFECTED_BY_REFACTORINGS",
        "Parser Dependencies Affected by Refactorings",
        "Number of parser dependencies changed by the defined refactorings",
        Int
    ),
    // Structure widget
    supplementary!(
        "sg_p.CYCLIC_PACKAGES_PERCENT",
        "Cyclic Packages (%)",
        "Percentage of packages involved in package cycles",
        Percent,
        worst
    ),
    supplementary!(
        "sg_p.MAX_MODULE_NCCD",
        "Highest Module NCCD",
        "Highest normalized cumulative component dependency of all modules",
        Float,
        worst
    ),
    // Architecture widget
    supplementary!(
        "sg_p.ARCHITECTURE_FEATURE_AVAILABLE",
        "Architecture Feature Available",
        "Whether the license includes the architecture feature",
        Bool
    ),
    supplementary!(
        "sg_p.NUMBER_OF_ISSUES",
        "Issues",
        "Total number of issues",
        Int,
        worst
    ),
    supplementary!(
        "sg_p.NUMBER_OF_CRITICAL_ISSUES_WITHOUT_RESOLUTION",
        "Unresolved Critical Issues",
        "Number of critical issues without a resolution",
        Int,
        worst
    ),
    supplementary!(
        "sg_p.VIOLATING_COMPONENTS_PERCENT",
        "Violating Components (%)",
        "Percentage of components with architecture violations",
        Percent,
        worst
    ),
    supplementary!(
        "sg_p.UNASSIGNED_COMPONENTS_PERCENT",
        "Unassigned Components (%)",
        "Percentage of components not assigned to any architectural artifact",
        Percent,
        worst
    ),
    supplementary!(
        "sg_p.NUMBER_OF_THRESHOLD_VIOLATIONS",
        "Threshold Violations",
        "Number of metric threshold violations",
        Int,
        worst
    ),
    supplementary!(
        "sg_p.NUMBER_OF_WORKSPACE_WARNINGS",
        "Workspace Warnings",
        "Number of workspace warnings",
        Int,
        worst
    ),
    supplementary!(
        "sg_p.NUMBER_OF_IGNORED_CRITICAL_ISSUES",
        "Ignored Critical Issues",
        "Number of critical issues marked as ignored",
        Int,
        worst
    ),
];

/// Definitions for all supplementary metrics, in table order.
pub fn supplementary_definitions() -> impl Iterator<Item = MetricDefinition> {
    SUPPLEMENTARY_METRICS
        .iter()
        .map(SupplementaryMetric::to_definition)
}
