//! Schema definitions for exported metadata
//!
//! An export describes the metrics a Sonargraph installation computes,
//! grouped by the level they are computed at, and the issue categories its
//! findings are classified into:
//!
//! - [`MetricId`] - one metric at one level
//! - [`IssueCategory`] - one classification of findings
//! - [`ExportMetadata`] - the loaded (or merged) catalog of both

pub mod category;
pub mod export;
pub mod metric;

pub use category::IssueCategory;
pub use export::{ExportMetadata, ExportMetadataBuilder};
pub use metric::{LEVEL_MODULE, LEVEL_SYSTEM, MetricId};
