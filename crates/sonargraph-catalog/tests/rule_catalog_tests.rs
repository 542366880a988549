//! Tests for building the rule catalog

use proptest::prelude::*;
use sonargraph_catalog::RuleCatalogBuilder;
use sonargraph_meta::{ExportMetadata, IssueCategory};
use std::collections::HashSet;

#[test]
fn test_rules_follow_category_order() {
    let metadata = ExportMetadata::builder()
        .category(IssueCategory::new("Workspace", "Workspace Warning"))
        .category(IssueCategory::new("ArchitectureViolation", "Architecture Violation"))
        .category(IssueCategory::new("Duplicate", "Duplicate Code Block"))
        .build();

    let rules = RuleCatalogBuilder::new().build(&metadata);

    let keys: Vec<_> = rules.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["sg_r.Workspace", "sg_r.ArchitectureViolation", "sg_r.Duplicate"]
    );
    assert_eq!(rules[2].html_description, "Duplicate Code Block");
}

#[test]
fn test_no_categories_no_rules() {
    let rules = RuleCatalogBuilder::new().build(&ExportMetadata::default());
    assert!(rules.is_empty());
}

fn category_names() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set("[A-Za-z][A-Za-z0-9 _-]{0,20}", 0..30)
}

proptest! {
    #[test]
    fn test_distinct_categories_give_distinct_keys(names in category_names()) {
        let mut builder = ExportMetadata::builder();
        for name in &names {
            builder.add_category(IssueCategory::new(name.clone(), name.clone()));
        }
        let metadata = builder.build();

        let rules = RuleCatalogBuilder::new().build(&metadata);

        prop_assert_eq!(rules.len(), names.len());
        let keys: HashSet<_> = rules.iter().map(|r| r.key.clone()).collect();
        prop_assert_eq!(keys.len(), rules.len());
    }
}
