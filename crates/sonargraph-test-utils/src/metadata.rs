//! [`MetadataDir`] builder for metadata directory scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path of a file under the workspace's `test-fixtures/metadata/`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/metadata")
        .join(name)
}

/// A temporary directory to configure as the metadata path.
pub struct MetadataDir {
    temp_dir: TempDir,
}

impl Default for MetadataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The directory as a path setting value.
    pub fn path_setting(&self) -> String {
        self.root().to_string_lossy().into_owned()
    }

    /// Write `content` to `name` inside the directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Copy a file from `test-fixtures/metadata/` into the directory.
    pub fn copy_fixture(&self, name: &str) -> PathBuf {
        let target = self.root().join(name);
        fs::copy(fixture_path(name), &target)
            .unwrap_or_else(|e| panic!("MetadataDir::copy_fixture: failed to copy {name}: {e}"));
        target
    }

    /// Create an empty subdirectory, which metadata resolution ignores.
    pub fn create_subdir(&self, name: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::create_dir_all(&path).unwrap();
        path
    }
}
