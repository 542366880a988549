//! Error types for sonargraph-meta

use std::path::PathBuf;

/// Result type for sonargraph-meta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or merging export metadata
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} metadata from '{source_label}': {message}")]
    Parse {
        source_label: String,
        format: String,
        message: String,
    },

    #[error("Unsupported metadata format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid metadata in '{source_label}': {message}")]
    InvalidMetadata {
        source_label: String,
        message: String,
    },

    #[error("Metadata too large: '{source_label}' is {size} bytes (max {max})")]
    MetadataTooLarge {
        source_label: String,
        size: u64,
        max: u64,
    },

    #[error("No metadata files to merge")]
    NothingToMerge,
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(source_label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            source_label: source_label.into(),
            message: message.into(),
        }
    }
}
