//! Metric identifiers as they appear in an export
//!
//! # Example TOML
//!
//! ```toml
//! [[levels.System]]
//! name = "CoreSourceElementCount"
//! presentation_name = "Source Elements"
//! description = "Number of source elements"
//! float = false
//! ```

use serde::{Deserialize, Serialize};

/// Level name for metrics computed for the whole system
pub const LEVEL_SYSTEM: &str = "System";

/// Level name for metrics computed per module
pub const LEVEL_MODULE: &str = "Module";

/// A metric computed at some level
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetricId {
    /// Standard name, unique within a level (e.g., "CoreSourceElementCount")
    pub name: String,
    /// Human readable name
    pub presentation_name: String,
    /// Free text description, possibly long
    #[serde(default)]
    pub description: String,
    /// Whether values are floating point rather than integral
    #[serde(default, rename = "float")]
    pub is_float: bool,
}

impl MetricId {
    /// Create an integer valued metric id with an empty description.
    pub fn new(name: impl Into<String>, presentation_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            presentation_name: presentation_name.into(),
            description: String::new(),
            is_float: false,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the metric as float valued.
    pub fn float(mut self) -> Self {
        self.is_float = true;
        self
    }
}
