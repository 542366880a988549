//! Plugin settings
//!
//! The catalog reads a single setting, [`METADATA_PATH_KEY`], naming the
//! directory to load metadata from. Settings are consumed through the
//! [`Settings`] trait so the host can supply its own storage. Two
//! implementations are provided:
//!
//! - [`MapSettings`] - in-memory key/value store
//! - [`PluginSettings`] - loaded from a TOML file
//!
//! # Example TOML
//!
//! ```toml
//! [metadata]
//! path = "/opt/sonargraph/metadata"
//!
//! [properties]
//! "sonar.sonargraph.integration.report.path" = "target/sonargraph.xml"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Setting naming the directory to load export metadata from.
pub const METADATA_PATH_KEY: &str = "sonar.sonargraph.integration.metadata.path";

/// Settings files larger than this are rejected.
const MAX_SETTINGS_SIZE: u64 = 1024 * 1024;

/// Read access to string settings.
pub trait Settings {
    /// Value of `key`, or `None` if unset.
    fn get_string(&self, key: &str) -> Option<String>;
}

impl<T: Settings + ?Sized> Settings for Arc<T> {
    fn get_string(&self, key: &str) -> Option<String> {
        (**self).get_string(key)
    }
}

impl<T: Settings + ?Sized> Settings for &T {
    fn get_string(&self, key: &str) -> Option<String> {
        (**self).get_string(key)
    }
}

/// In-memory settings.
///
/// Values can be changed through a shared reference, so a host can update
/// settings seen by a repository it has already handed them to.
#[derive(Debug, Default)]
pub struct MapSettings {
    values: RwLock<HashMap<String, String>>,
}

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings with only the metadata path set.
    pub fn with_metadata_path(path: impl Into<String>) -> Self {
        let settings = Self::new();
        settings.set(METADATA_PATH_KEY, path);
        settings
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }
}

impl Settings for MapSettings {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

/// Metadata section of a settings file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetadataSettings {
    /// Directory holding export files; unset means the bundled default
    #[serde(default)]
    pub path: Option<String>,
}

/// Settings loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PluginSettings {
    #[serde(default)]
    pub metadata: MetadataSettings,
    /// Any other settings, keyed by their full name
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl PluginSettings {
    /// Parse settings from TOML text.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidSettings {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::SettingsNotFound {
                path: path.to_path_buf(),
            });
        }

        let size = fs::metadata(path).map_err(|e| Error::io(path, e))?.len();
        if size > MAX_SETTINGS_SIZE {
            return Err(Error::SettingsTooLarge {
                path: path.to_path_buf(),
                size,
                max: MAX_SETTINGS_SIZE,
            });
        }

        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&content, path)
    }
}

impl Settings for PluginSettings {
    fn get_string(&self, key: &str) -> Option<String> {
        if key == METADATA_PATH_KEY {
            return self.metadata.path.clone();
        }
        self.properties.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_settings_set_and_remove() {
        let settings = MapSettings::new();
        assert_eq!(settings.get_string(METADATA_PATH_KEY), None);

        settings.set(METADATA_PATH_KEY, "/opt/metadata");
        assert_eq!(
            settings.get_string(METADATA_PATH_KEY),
            Some("/opt/metadata".to_string())
        );

        assert_eq!(
            settings.remove(METADATA_PATH_KEY),
            Some("/opt/metadata".to_string())
        );
        assert_eq!(settings.get_string(METADATA_PATH_KEY), None);
    }

    #[test]
    fn test_shared_settings_see_updates() {
        let settings = Arc::new(MapSettings::new());
        let view = Arc::clone(&settings);
        settings.set(METADATA_PATH_KEY, "/a");
        assert_eq!(view.get_string(METADATA_PATH_KEY), Some("/a".to_string()));
    }

    #[test]
    fn test_plugin_settings_empty_file() {
        let settings = PluginSettings::from_toml("", Path::new("settings.toml")).unwrap();
        assert_eq!(settings, PluginSettings::default());
        assert_eq!(settings.get_string(METADATA_PATH_KEY), None);
    }

    #[test]
    fn test_plugin_settings_metadata_path() {
        let content = r#"
[metadata]
path = "/opt/sonargraph/metadata"

[properties]
"sonar.sonargraph.integration.report.path" = "target/sonargraph.xml"
"#;
        let settings = PluginSettings::from_toml(content, Path::new("settings.toml")).unwrap();
        assert_eq!(
            settings.get_string(METADATA_PATH_KEY),
            Some("/opt/sonargraph/metadata".to_string())
        );
        assert_eq!(
            settings.get_string("sonar.sonargraph.integration.report.path"),
            Some("target/sonargraph.xml".to_string())
        );
    }

    #[test]
    fn test_plugin_settings_invalid_toml() {
        let err = PluginSettings::from_toml("[metadata", Path::new("settings.toml")).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings { .. }));
    }
}
