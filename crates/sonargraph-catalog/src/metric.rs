//! Metric definitions handed to the host

use serde::Serialize;

/// Kind of value a metric holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueKind {
    Int,
    Float,
    Percent,
    Bool,
    String,
}

/// Which way a change of the metric's value is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Higher values are worse
    Worst,
    /// No judgement (platform default)
    #[default]
    None,
}

/// A metric as registered with the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDefinition {
    /// Unique key within the catalog
    pub key: String,
    /// Display name
    pub name: String,
    pub value_kind: ValueKind,
    pub description: String,
    pub domain: String,
    pub direction: Direction,
    /// Whether changes of the value affect quality
    pub qualitative: bool,
}

impl MetricDefinition {
    /// Mark the metric as one where higher values are worse.
    pub fn worst_is_bad(mut self) -> Self {
        self.direction = Direction::Worst;
        self.qualitative = true;
        self
    }
}
