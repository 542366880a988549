//! Building rule definitions from export metadata
//!
//! Every issue category of the export becomes one rule. Rules are registered
//! in a single repository named after the plugin.

use serde::Serialize;
use sonargraph_meta::{ExportMetadata, IssueCategory};

use crate::keys::{
    PLUGIN_KEY, PLUGIN_PRESENTATION_NAME, RULE_REPOSITORY_LANGUAGE, RULE_TAG_SONARGRAPH, rule_key,
};

/// Rule severity as understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Minor,
    #[default]
    Major,
    Critical,
    Blocker,
}

/// A rule as registered with the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleDefinition {
    /// Unique key within the repository
    pub key: String,
    pub name: String,
    pub html_description: String,
    pub tags: Vec<String>,
    pub severity: Severity,
}

/// A repository of rules as registered with the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleRepositoryDefinition {
    pub key: String,
    pub language: String,
    pub name: String,
    pub rules: Vec<RuleDefinition>,
}

impl RuleRepositoryDefinition {
    /// The plugin's repository holding `rules`.
    pub fn sonargraph(rules: Vec<RuleDefinition>) -> Self {
        Self {
            key: PLUGIN_KEY.to_string(),
            language: RULE_REPOSITORY_LANGUAGE.to_string(),
            name: format!("{PLUGIN_PRESENTATION_NAME} Rules"),
            rules,
        }
    }
}

/// Builds the rule catalog from export metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleCatalogBuilder;

impl RuleCatalogBuilder {
    pub fn new() -> Self {
        Self
    }

    /// One rule per issue category, in the export's category order.
    pub fn build(&self, metadata: &ExportMetadata) -> Vec<RuleDefinition> {
        metadata
            .issue_categories()
            .values()
            .map(rule_for)
            .collect()
    }
}

fn rule_for(category: &IssueCategory) -> RuleDefinition {
    RuleDefinition {
        key: rule_key(&category.name),
        name: format!("{PLUGIN_PRESENTATION_NAME}: {}", category.presentation_name),
        html_description: category.presentation_name.clone(),
        tags: vec![RULE_TAG_SONARGRAPH.to_string()],
        severity: Severity::default(),
    }
}
