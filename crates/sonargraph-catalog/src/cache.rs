//! Cache of loaded metric definitions
//!
//! The cache holds the metric catalog together with the path it was loaded
//! from (the active path). It is either empty or fully populated; a reload
//! replaces both at once.
//!
//! On each access the configured path is compared with the active path:
//!
//! - equal: the cached catalog is returned
//! - configured path blank while the default export is active: unchanged
//! - anything else: the catalog is reloaded
//!
//! A reload that fails leaves the cache empty.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

use crate::Result;
use crate::metric::MetricDefinition;
use crate::resolver::normalize_path_setting;

/// A freshly built catalog and the path it was loaded from
#[derive(Debug)]
pub struct LoadedMetrics {
    pub active_path: String,
    pub metrics: Vec<MetricDefinition>,
}

#[derive(Debug, Default)]
enum CacheState {
    #[default]
    Empty,
    Populated {
        active_path: String,
        metrics: Arc<[MetricDefinition]>,
    },
}

/// Shared cache of the metric catalog.
///
/// A single lock guards the whole check-and-reload sequence, so concurrent
/// callers never race to populate the cache.
#[derive(Debug)]
pub struct ConfigurationCache {
    default_path: String,
    state: Mutex<CacheState>,
}

impl ConfigurationCache {
    /// Create an empty cache. `default_path` is the path recorded when the
    /// bundled default export is loaded.
    pub fn new(default_path: impl Into<String>) -> Self {
        Self {
            default_path: default_path.into(),
            state: Mutex::new(CacheState::Empty),
        }
    }

    pub fn default_path(&self) -> &str {
        &self.default_path
    }

    /// The cached catalog for `requested_path`, loading it with `load` if
    /// the cache is empty or the configuration changed.
    ///
    /// Load failures are logged and yield an empty catalog.
    pub fn get_metrics<F>(&self, requested_path: Option<&str>, load: F) -> Arc<[MetricDefinition]>
    where
        F: FnOnce() -> Result<LoadedMetrics>,
    {
        let mut state = self.lock();

        if let CacheState::Populated {
            active_path,
            metrics,
        } = &*state
        {
            if !self.configuration_changed(requested_path, active_path) {
                return Arc::clone(metrics);
            }
            tracing::info!(
                "Configured path for meta-data changed from '{}' to '{}'. Reloading metric configuration.",
                active_path,
                requested_path.unwrap_or_default()
            );
        }

        match load() {
            Ok(loaded) => {
                let metrics: Arc<[MetricDefinition]> = loaded.metrics.into();
                tracing::debug!(
                    "Cached {} metric definitions from '{}'",
                    metrics.len(),
                    loaded.active_path
                );
                *state = CacheState::Populated {
                    active_path: loaded.active_path,
                    metrics: Arc::clone(&metrics),
                };
                metrics
            }
            Err(e) => {
                tracing::error!("Failed to load configuration for Sonargraph plugin: {}", e);
                *state = CacheState::Empty;
                Arc::from(Vec::new())
            }
        }
    }

    /// Whether `requested_path` differs from the active path in a way that
    /// requires a reload.
    pub fn configuration_changed(&self, requested_path: Option<&str>, active_path: &str) -> bool {
        match normalize_path_setting(requested_path) {
            Some(requested) => requested != active_path,
            None => active_path != self.default_path,
        }
    }

    /// Path of the currently cached catalog, `None` while empty.
    pub fn active_path(&self) -> Option<String> {
        match &*self.lock() {
            CacheState::Empty => None,
            CacheState::Populated { active_path, .. } => Some(active_path.clone()),
        }
    }

    pub fn is_populated(&self) -> bool {
        matches!(&*self.lock(), CacheState::Populated { .. })
    }

    /// Drop the cached catalog and its active path.
    pub fn clear(&self) {
        *self.lock() = CacheState::Empty;
    }

    /// The cached catalog keyed by metric key.
    pub fn loaded(&self) -> IndexMap<String, MetricDefinition> {
        match &*self.lock() {
            CacheState::Empty => {
                tracing::error!("No metric definitions have been loaded yet");
                IndexMap::new()
            }
            CacheState::Populated { metrics, .. } => metrics
                .iter()
                .map(|metric| (metric.key.clone(), metric.clone()))
                .collect(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::metric::{Direction, ValueKind};
    use std::cell::Cell;

    const DEFAULT: &str = "/bundled/ExportMetaData.toml";

    fn metric(key: &str) -> MetricDefinition {
        MetricDefinition {
            key: key.to_string(),
            name: key.to_string(),
            value_kind: ValueKind::Int,
            description: String::new(),
            domain: "Sonargraph".to_string(),
            direction: Direction::None,
            qualitative: false,
        }
    }

    fn loaded(path: &str, keys: &[&str]) -> Result<LoadedMetrics> {
        Ok(LoadedMetrics {
            active_path: path.to_string(),
            metrics: keys.iter().map(|k| metric(k)).collect(),
        })
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = ConfigurationCache::new(DEFAULT);
        assert!(!cache.is_populated());
        assert_eq!(cache.active_path(), None);
        assert!(cache.loaded().is_empty());
    }

    #[test]
    fn test_configuration_changed() {
        let cache = ConfigurationCache::new(DEFAULT);
        assert!(!cache.configuration_changed(Some("/dir"), "/dir"));
        assert!(!cache.configuration_changed(Some(" /dir "), "/dir"));
        assert!(!cache.configuration_changed(None, DEFAULT));
        assert!(!cache.configuration_changed(Some(""), DEFAULT));
        assert!(cache.configuration_changed(Some("/other"), "/dir"));
        assert!(cache.configuration_changed(Some("/dir"), DEFAULT));
        assert!(cache.configuration_changed(None, "/dir"));
    }

    #[test]
    fn test_unchanged_path_returns_same_catalog() {
        let cache = ConfigurationCache::new(DEFAULT);
        let loads = Cell::new(0);
        let load = || {
            loads.set(loads.get() + 1);
            loaded(DEFAULT, &["a", "b"])
        };

        let first = cache.get_metrics(None, load);
        let second = cache.get_metrics(None, load);

        assert_eq!(loads.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_failed_reload_empties_cache() {
        let cache = ConfigurationCache::new(DEFAULT);
        let first = cache.get_metrics(None, || loaded(DEFAULT, &["a"]));
        assert_eq!(first.len(), 1);

        let second = cache.get_metrics(Some("/dir"), || {
            Err(Error::ResourceNotFound {
                path: DEFAULT.to_string(),
            })
        });

        assert!(second.is_empty());
        assert!(!cache.is_populated());
        assert_eq!(cache.active_path(), None);
    }

    #[test]
    fn test_clear_forces_reload() {
        let cache = ConfigurationCache::new(DEFAULT);
        let loads = Cell::new(0);
        let load = || {
            loads.set(loads.get() + 1);
            loaded(DEFAULT, &["a"])
        };

        cache.get_metrics(None, load);
        cache.clear();
        cache.get_metrics(None, load);

        assert_eq!(loads.get(), 2);
    }

    #[test]
    fn test_loaded_keyed_by_metric_key() {
        let cache = ConfigurationCache::new(DEFAULT);
        cache.get_metrics(None, || loaded(DEFAULT, &["sg_i.A", "sg_i.B"]));

        let map = cache.loaded();
        assert_eq!(map.len(), 2);
        assert_eq!(map["sg_i.B"].key, "sg_i.B");
    }
}
