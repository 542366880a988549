//! Registration surface of the host platform
//!
//! The host asks plugins for their metrics through [`Metrics`] and lets them
//! register rule repositories through [`RulesDefinition`].

use std::sync::Arc;

use crate::metric::MetricDefinition;
use crate::rules::RuleRepositoryDefinition;

/// Extension point providing metric definitions.
pub trait Metrics {
    fn metrics(&self) -> Arc<[MetricDefinition]>;
}

/// Extension point defining rule repositories.
pub trait RulesDefinition {
    fn define(&self, context: &mut dyn RulesContext);
}

/// Receives rule repositories during the host's rule definition phase.
pub trait RulesContext {
    fn create_repository(&mut self, repository: RuleRepositoryDefinition);
}

/// A [`RulesContext`] that records every repository created in it.
#[derive(Debug, Default)]
pub struct InMemoryRulesContext {
    repositories: Vec<RuleRepositoryDefinition>,
}

impl InMemoryRulesContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(&self) -> &[RuleRepositoryDefinition] {
        &self.repositories
    }

    /// The repository registered under `key`, if any.
    pub fn repository(&self, key: &str) -> Option<&RuleRepositoryDefinition> {
        self.repositories.iter().find(|r| r.key == key)
    }
}

impl RulesContext for InMemoryRulesContext {
    fn create_repository(&mut self, repository: RuleRepositoryDefinition) {
        tracing::debug!(
            "Registered rule repository '{}' with {} rules",
            repository.key,
            repository.rules.len()
        );
        self.repositories.push(repository);
    }
}
