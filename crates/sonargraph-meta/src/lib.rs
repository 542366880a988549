//! Export metadata for the Sonargraph integration.
//!
//! This crate provides the metadata model (metric levels, metric ids and
//! issue categories) and the loader capability used to read and merge
//! exported metadata files.

pub mod error;
pub mod loader;
pub mod merge;
pub mod schema;

pub use error::{Error, Result};
pub use loader::{ExportLoader, MetadataFormat, MetadataLoader};
pub use schema::{
    ExportMetadata, ExportMetadataBuilder, IssueCategory, LEVEL_MODULE, LEVEL_SYSTEM, MetricId,
};
