//! Loading export metadata from streams and files
//!
//! The [`MetadataLoader`] trait is the capability the catalog consumes: load
//! one export from a stream, or merge several export files into one catalog.
//! [`ExportLoader`] implements it for serialized exports, detecting the
//! format from the extension of the source label:
//!
//! - `.toml` -> TOML
//! - `.json` -> JSON
//! - `.yaml`, `.yml` -> YAML

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::merge;
use crate::schema::export::ExportDocument;
use crate::{Error, ExportMetadata, Result};

/// Exports larger than this are rejected without parsing.
pub const MAX_METADATA_SIZE: u64 = 16 * 1024 * 1024;

/// Capability to produce [`ExportMetadata`].
pub trait MetadataLoader {
    /// Load a single export from `reader`.
    ///
    /// `source_label` names the stream in errors and determines the format.
    fn load_single(&self, reader: &mut dyn Read, source_label: &str) -> Result<ExportMetadata>;

    /// Load every file in `files` and merge them into one catalog.
    fn merge_many(&self, files: &[PathBuf]) -> Result<ExportMetadata>;
}

impl<T: MetadataLoader + ?Sized> MetadataLoader for &T {
    fn load_single(&self, reader: &mut dyn Read, source_label: &str) -> Result<ExportMetadata> {
        (**self).load_single(reader, source_label)
    }

    fn merge_many(&self, files: &[PathBuf]) -> Result<ExportMetadata> {
        (**self).merge_many(files)
    }
}

/// Serialization format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataFormat {
    Toml,
    Json,
    Yaml,
}

impl MetadataFormat {
    /// Detect the format from the extension of `label`.
    pub fn from_label(label: &str) -> Result<Self> {
        let extension = Path::new(label)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        match extension.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Loader for serialized export files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportLoader;

impl ExportLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a single export file from disk.
    pub fn load_file(&self, path: &Path) -> Result<ExportMetadata> {
        let size = fs::metadata(path).map_err(|e| Error::io(path, e))?.len();
        if size > MAX_METADATA_SIZE {
            return Err(Error::MetadataTooLarge {
                source_label: path.display().to_string(),
                size,
                max: MAX_METADATA_SIZE,
            });
        }

        let mut file = fs::File::open(path).map_err(|e| Error::io(path, e))?;
        self.load_single(&mut file, &path.to_string_lossy())
    }

    fn parse(&self, content: &str, source_label: &str) -> Result<ExportDocument> {
        let format = MetadataFormat::from_label(source_label)?;
        let parse_error = |message: String| Error::Parse {
            source_label: source_label.to_string(),
            format: format.name().into(),
            message,
        };

        match format {
            MetadataFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
            MetadataFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))
            }
            MetadataFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))
            }
        }
    }
}

impl MetadataLoader for ExportLoader {
    fn load_single(&self, reader: &mut dyn Read, source_label: &str) -> Result<ExportMetadata> {
        let mut content = String::new();
        reader
            .take(MAX_METADATA_SIZE + 1)
            .read_to_string(&mut content)
            .map_err(|e| Error::io(source_label, e))?;

        let size = content.len() as u64;
        if size > MAX_METADATA_SIZE {
            return Err(Error::MetadataTooLarge {
                source_label: source_label.to_string(),
                size,
                max: MAX_METADATA_SIZE,
            });
        }

        let document = self.parse(&content, source_label)?;
        let metadata = into_metadata(document, source_label)?;
        tracing::debug!(
            "Loaded {} metric ids and {} issue categories from '{}'",
            metadata.metric_count(),
            metadata.issue_categories().len(),
            source_label
        );
        Ok(metadata)
    }

    fn merge_many(&self, files: &[PathBuf]) -> Result<ExportMetadata> {
        let mut paths = files.to_vec();
        paths.sort();

        let mut loaded = Vec::with_capacity(paths.len());
        for path in &paths {
            loaded.push(self.load_file(path)?);
        }
        merge::merge(loaded)
    }
}

/// Validate a parsed document and convert it into the catalog model.
fn into_metadata(document: ExportDocument, source_label: &str) -> Result<ExportMetadata> {
    let mut builder = ExportMetadata::builder().source(source_label);

    for (level, ids) in document.levels {
        for id in ids {
            if id.name.trim().is_empty() {
                return Err(Error::invalid(
                    source_label,
                    format!("metric without name on level '{level}'"),
                ));
            }
            let name = id.name.clone();
            if !builder.add_metric(&level, id) {
                return Err(Error::invalid(
                    source_label,
                    format!("duplicate metric '{name}' on level '{level}'"),
                ));
            }
        }
    }

    for category in document.issue_categories {
        if category.name.trim().is_empty() {
            return Err(Error::invalid(source_label, "issue category without name"));
        }
        let name = category.name.clone();
        if !builder.add_category(category) {
            return Err(Error::invalid(
                source_label,
                format!("duplicate issue category '{name}'"),
            ));
        }
    }

    Ok(builder.build())
}
