//! Resolution of the metadata source
//!
//! The `MetadataSourceResolver` decides where export metadata comes from:
//!
//! 1. If a directory is configured, every file directly inside it is merged.
//! 2. Otherwise, or if loading from the directory fails, the export bundled
//!    with the plugin is loaded.
//!
//! A failure to load the bundled export is final; there is nothing further
//! to fall back to.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use sonargraph_meta::{ExportMetadata, MetadataLoader};

use crate::{Error, Result};

/// Path of the export bundled with the plugin.
pub const DEFAULT_METADATA_PATH: &str = "/sonargraph/integration/ExportMetaData.toml";

/// Access to resources bundled with the plugin.
pub trait ResourceProvider: Send + Sync {
    /// Open the resource at `path` for reading.
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>>;
}

/// Resources compiled into the plugin binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledResources;

impl BundledResources {
    const RESOURCES: &'static [(&'static str, &'static [u8])] = &[(
        DEFAULT_METADATA_PATH,
        include_bytes!("../resources/ExportMetaData.toml"),
    )];
}

impl ResourceProvider for BundledResources {
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>> {
        Self::RESOURCES
            .iter()
            .find(|(resource, _)| *resource == path)
            .map(|(_, bytes)| Box::new(*bytes) as Box<dyn Read + '_>)
            .ok_or_else(|| Error::ResourceNotFound {
                path: path.to_string(),
            })
    }
}

/// Where resolved metadata came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataOrigin {
    /// Merged from the files of the configured directory
    Directory,
    /// Loaded from the bundled default export
    Default,
}

/// Successfully resolved metadata
#[derive(Debug)]
pub struct ResolvedMetadata {
    pub metadata: ExportMetadata,
    /// Path the metadata was loaded from, becomes the active path when cached
    pub active_path: String,
    pub origin: MetadataOrigin,
}

/// Normalize a configured path setting: surrounding whitespace is dropped
/// and a blank setting counts as unset.
pub fn normalize_path_setting(setting: Option<&str>) -> Option<&str> {
    setting.map(str::trim).filter(|path| !path.is_empty())
}

/// Decides between the configured directory and the bundled default.
pub struct MetadataSourceResolver<L> {
    loader: L,
    resources: Box<dyn ResourceProvider>,
    default_path: String,
}

impl<L: MetadataLoader> MetadataSourceResolver<L> {
    /// Create a resolver using the bundled resources and default path.
    pub fn new(loader: L) -> Self {
        Self::with_resources(loader, Box::new(BundledResources), DEFAULT_METADATA_PATH)
    }

    /// Create a resolver with custom resources and default path.
    pub fn with_resources(
        loader: L,
        resources: Box<dyn ResourceProvider>,
        default_path: impl Into<String>,
    ) -> Self {
        Self {
            loader,
            resources,
            default_path: default_path.into(),
        }
    }

    pub fn default_path(&self) -> &str {
        &self.default_path
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Resolve metadata for the configured path setting.
    pub fn resolve(&self, configured_path: Option<&str>) -> Result<ResolvedMetadata> {
        if let Some(path) = normalize_path_setting(configured_path) {
            match self.load_from_directory(Path::new(path)) {
                Ok(metadata) => {
                    return Ok(ResolvedMetadata {
                        metadata,
                        active_path: path.to_string(),
                        origin: MetadataOrigin::Directory,
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to load meta-data from '{}': {}", path, e);
                    tracing::warn!(
                        "Failed to load configuration for Sonargraph plugin. Continue with default configuration."
                    );
                }
            }
        }

        let metadata = self.load_default()?;
        Ok(ResolvedMetadata {
            metadata,
            active_path: self.default_path.clone(),
            origin: MetadataOrigin::Default,
        })
    }

    fn load_from_directory(&self, dir: &Path) -> Result<ExportMetadata> {
        if !dir.exists() {
            return Err(Error::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        if !dir.is_dir() {
            return Err(Error::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let files = list_files(dir)?;
        if files.is_empty() {
            return Err(Error::EmptyDirectory {
                path: dir.to_path_buf(),
            });
        }

        tracing::debug!("Merging {} meta-data files from '{}'", files.len(), dir.display());
        Ok(self.loader.merge_many(&files)?)
    }

    fn load_default(&self) -> Result<ExportMetadata> {
        let load = || -> Result<ExportMetadata> {
            let mut reader = self.resources.open(&self.default_path)?;
            Ok(self.loader.load_single(&mut reader, &self.default_path)?)
        };

        load().inspect_err(|e| {
            tracing::error!(
                "Failed to load default configuration for Sonargraph Plugin from '{}': {}",
                self.default_path,
                e
            );
        })
    }
}

/// Non-directory entries directly inside `dir`, sorted.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if !path.is_dir() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
