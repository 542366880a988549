//! Error types for sonargraph-catalog

use std::path::PathBuf;

/// Result type for sonargraph-catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving metadata or reading settings
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Loader reported a failure
    #[error(transparent)]
    Meta(#[from] sonargraph_meta::Error),

    #[error("Cannot load meta-data from directory '{path}'. It does not exist.")]
    DirectoryNotFound { path: PathBuf },

    #[error("Cannot load meta-data from '{path}'. It is not a directory.")]
    NotADirectory { path: PathBuf },

    #[error("No meta-data files found in directory '{path}'")]
    EmptyDirectory { path: PathBuf },

    #[error("Bundled resource not found: {path}")]
    ResourceNotFound { path: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings not found at {path}")]
    SettingsNotFound { path: PathBuf },

    #[error("Invalid settings at {path}: {message}")]
    InvalidSettings { path: PathBuf, message: String },

    #[error("Settings file too large: {path} is {size} bytes (max {max})")]
    SettingsTooLarge { path: PathBuf, size: u64, max: u64 },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
