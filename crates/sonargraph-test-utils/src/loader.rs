//! [`CountingLoader`] test double.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use sonargraph_meta::{Error, ExportMetadata, MetadataLoader, Result};

/// A loader returning fixed in-memory metadata and counting its calls.
///
/// `load_single` answers with the default metadata, `merge_many` with the
/// directory metadata. Either can be made to fail by leaving it unset.
///
/// # Example
///
/// ```rust
/// use sonargraph_meta::{ExportMetadata, MetadataLoader};
/// use sonargraph_test_utils::CountingLoader;
///
/// let loader = CountingLoader::new(ExportMetadata::default());
/// let _ = loader.load_single(&mut "".as_bytes(), "default.toml");
/// assert_eq!(loader.single_loads(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CountingLoader {
    default_metadata: Option<ExportMetadata>,
    directory_metadata: Option<ExportMetadata>,
    single_loads: AtomicUsize,
    merges: AtomicUsize,
    merged_files: Mutex<Vec<Vec<PathBuf>>>,
}

impl CountingLoader {
    /// Loader answering single loads with `default_metadata`; merges fail.
    pub fn new(default_metadata: ExportMetadata) -> Self {
        Self {
            default_metadata: Some(default_metadata),
            ..Self::default()
        }
    }

    /// Loader for which every operation fails.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Answer merges with `metadata`.
    pub fn with_directory_metadata(mut self, metadata: ExportMetadata) -> Self {
        self.directory_metadata = Some(metadata);
        self
    }

    pub fn single_loads(&self) -> usize {
        self.single_loads.load(Ordering::SeqCst)
    }

    pub fn merges(&self) -> usize {
        self.merges.load(Ordering::SeqCst)
    }

    /// Total number of load attempts of either kind.
    pub fn total_loads(&self) -> usize {
        self.single_loads() + self.merges()
    }

    /// File lists passed to each `merge_many` call.
    pub fn merged_files(&self) -> Vec<Vec<PathBuf>> {
        self.merged_files.lock().unwrap().clone()
    }
}

impl MetadataLoader for CountingLoader {
    fn load_single(&self, _reader: &mut dyn Read, source_label: &str) -> Result<ExportMetadata> {
        self.single_loads.fetch_add(1, Ordering::SeqCst);
        self.default_metadata
            .clone()
            .ok_or_else(|| Error::invalid(source_label, "test loader configured to fail"))
    }

    fn merge_many(&self, files: &[PathBuf]) -> Result<ExportMetadata> {
        self.merges.fetch_add(1, Ordering::SeqCst);
        self.merged_files.lock().unwrap().push(files.to_vec());
        self.directory_metadata
            .clone()
            .ok_or_else(|| Error::invalid("merge", "test loader configured to fail"))
    }
}
