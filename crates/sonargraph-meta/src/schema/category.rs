//! Issue categories as they appear in an export
//!
//! # Example TOML
//!
//! ```toml
//! [[issue_categories]]
//! name = "ArchitectureViolation"
//! presentation_name = "Architecture Violation"
//! ```

use serde::{Deserialize, Serialize};

/// A named classification of analysis findings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IssueCategory {
    /// Standard name, unique within an export
    pub name: String,
    /// Human readable name
    pub presentation_name: String,
}

impl IssueCategory {
    pub fn new(name: impl Into<String>, presentation_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            presentation_name: presentation_name.into(),
        }
    }
}
