//! Metric and rule catalog registration for the Sonargraph integration.
//!
//! The catalog is driven by exported Sonargraph metadata. Metadata is taken
//! from a configured directory (all files in it are merged) or, failing
//! that, from the export bundled with the plugin. From it this crate derives:
//!
//! - metric definitions, cached until the configured path changes
//! - one rule per issue category
//!
//! Failures never propagate to the host: they are logged and degrade to an
//! empty catalog.

pub mod cache;
pub mod error;
pub mod host;
pub mod keys;
pub mod logging;
pub mod metric;
pub mod metrics;
pub mod repository;
pub mod resolver;
pub mod rules;
pub mod settings;
pub mod supplementary;

pub use cache::{ConfigurationCache, LoadedMetrics};
pub use error::{Error, Result};
pub use host::{InMemoryRulesContext, Metrics, RulesContext, RulesDefinition};
pub use metric::{Direction, MetricDefinition, ValueKind};
pub use metrics::MetricCatalogBuilder;
pub use repository::SonargraphRulesRepository;
pub use resolver::{
    BundledResources, DEFAULT_METADATA_PATH, MetadataOrigin, MetadataSourceResolver,
    ResolvedMetadata, ResourceProvider,
};
pub use rules::{RuleCatalogBuilder, RuleDefinition, RuleRepositoryDefinition, Severity};
pub use settings::{METADATA_PATH_KEY, MapSettings, PluginSettings, Settings};
