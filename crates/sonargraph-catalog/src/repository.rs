//! Plugin entry point for metric and rule registration
//!
//! `SonargraphRulesRepository` wires settings, the metadata resolver, the
//! catalog builders and the shared [`ConfigurationCache`] together and
//! implements the host's [`Metrics`] and [`RulesDefinition`] extension
//! points.

use std::sync::Arc;

use indexmap::IndexMap;
use sonargraph_meta::MetadataLoader;

use crate::cache::{ConfigurationCache, LoadedMetrics};
use crate::host::{Metrics, RulesContext, RulesDefinition};
use crate::metric::MetricDefinition;
use crate::metrics::MetricCatalogBuilder;
use crate::resolver::{BundledResources, MetadataSourceResolver};
use crate::rules::{RuleCatalogBuilder, RuleRepositoryDefinition};
use crate::settings::{METADATA_PATH_KEY, Settings};

/// Registers Sonargraph metrics and rules with the host.
pub struct SonargraphRulesRepository<S, L> {
    settings: S,
    resolver: MetadataSourceResolver<L>,
    cache: Arc<ConfigurationCache>,
    metric_builder: MetricCatalogBuilder,
    rule_builder: RuleCatalogBuilder,
}

impl<S: Settings, L: MetadataLoader> SonargraphRulesRepository<S, L> {
    /// Create a repository using the bundled default export.
    pub fn new(settings: S, loader: L) -> Self {
        let resolver = MetadataSourceResolver::new(loader);
        let cache = Arc::new(ConfigurationCache::new(resolver.default_path()));
        Self::with_cache(settings, resolver, cache)
    }

    /// Create a repository whose default export is looked up at
    /// `default_path` in the bundled resources.
    pub fn with_default_path(settings: S, loader: L, default_path: &str) -> Self {
        let resolver = MetadataSourceResolver::with_resources(
            loader,
            Box::new(BundledResources),
            default_path,
        );
        let cache = Arc::new(ConfigurationCache::new(default_path));
        Self::with_cache(settings, resolver, cache)
    }

    /// Create a repository sharing an existing cache.
    ///
    /// The cache must have been created for the resolver's default path.
    pub fn with_cache(
        settings: S,
        resolver: MetadataSourceResolver<L>,
        cache: Arc<ConfigurationCache>,
    ) -> Self {
        debug_assert_eq!(cache.default_path(), resolver.default_path());
        Self {
            settings,
            resolver,
            cache,
            metric_builder: MetricCatalogBuilder::new(),
            rule_builder: RuleCatalogBuilder::new(),
        }
    }

    pub fn cache(&self) -> &Arc<ConfigurationCache> {
        &self.cache
    }

    pub fn resolver(&self) -> &MetadataSourceResolver<L> {
        &self.resolver
    }

    fn configured_path(&self) -> Option<String> {
        self.settings.get_string(METADATA_PATH_KEY)
    }

    /// Metric catalog for the current configuration.
    ///
    /// Returns the cached catalog unless the configured path changed.
    pub fn metrics(&self) -> Arc<[MetricDefinition]> {
        let configured = self.configured_path();
        self.cache.get_metrics(configured.as_deref(), || {
            let resolved = self.resolver.resolve(configured.as_deref())?;
            Ok(LoadedMetrics {
                metrics: self.metric_builder.build(&resolved.metadata),
                active_path: resolved.active_path,
            })
        })
    }

    /// Register the rule repository in `context`.
    ///
    /// Nothing is registered if no metadata can be loaded.
    pub fn define(&self, context: &mut dyn RulesContext) {
        let configured = self.configured_path();
        let resolved = match self.resolver.resolve(configured.as_deref()) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::error!(
                    "Failed to load configuration for Sonargraph repository from '{}': {}",
                    configured.as_deref().unwrap_or_default(),
                    e
                );
                return;
            }
        };

        let rules = self.rule_builder.build(&resolved.metadata);
        tracing::info!(
            "Defining {} Sonargraph rules from '{}'",
            rules.len(),
            resolved.active_path
        );
        context.create_repository(RuleRepositoryDefinition::sonargraph(rules));
    }

    /// The cached catalog keyed by metric key; empty if nothing was loaded.
    pub fn loaded_metrics(&self) -> IndexMap<String, MetricDefinition> {
        self.cache.loaded()
    }

    /// Drop the cached catalog so the next [`metrics`](Self::metrics) call
    /// reloads.
    pub fn clear_loaded_metrics(&self) {
        self.cache.clear();
    }
}

impl<S: Settings, L: MetadataLoader> Metrics for SonargraphRulesRepository<S, L> {
    fn metrics(&self) -> Arc<[MetricDefinition]> {
        SonargraphRulesRepository::metrics(self)
    }
}

impl<S: Settings, L: MetadataLoader> RulesDefinition for SonargraphRulesRepository<S, L> {
    fn define(&self, context: &mut dyn RulesContext) {
        SonargraphRulesRepository::define(self, context)
    }
}
