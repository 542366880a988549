//! Names, keys and fixed identifiers of the plugin
//!
//! Metric and rule keys are derived from the standard names found in the
//! export by prefixing them. The prefixes differ, so metric keys and rule
//! keys live in separate namespaces, and distinct names always give distinct
//! keys.

/// Key of the plugin and of its rule repository
pub const PLUGIN_KEY: &str = "sonargraph_integration";

/// Name the plugin presents itself with
pub const PLUGIN_PRESENTATION_NAME: &str = "Sonargraph Integration";

/// Domain all metrics are registered under
pub const DOMAIN_SONARGRAPH: &str = "Sonargraph";

/// Language the rule repository is attached to
pub const RULE_REPOSITORY_LANGUAGE: &str = "java";

/// Tag added to every rule
pub const RULE_TAG_SONARGRAPH: &str = "sonargraph-integration";

/// Prefix of metric keys derived from export names
pub const METRIC_KEY_PREFIX: &str = "sg_i.";

/// Prefix of the plugin's own supplementary metric keys
pub const SUPPLEMENTARY_KEY_PREFIX: &str = "sg_p.";

/// Prefix of rule keys derived from issue category names
pub const RULE_KEY_PREFIX: &str = "sg_r.";

/// Metric key for a metric's standard name.
pub fn metric_key(standard_name: &str) -> String {
    format!("{METRIC_KEY_PREFIX}{standard_name}")
}

/// Rule key for an issue category name.
pub fn rule_key(category_name: &str) -> String {
    format!("{RULE_KEY_PREFIX}{category_name}")
}
