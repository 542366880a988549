//! Shared test utilities for the sonargraph-integration workspace.
//!
//! This crate is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`loader`] - [`CountingLoader`] test double for the metadata loader
//! - [`metadata`] - [`MetadataDir`] temporary directories of export files

pub mod loader;
pub mod metadata;

pub use loader::CountingLoader;
pub use metadata::{MetadataDir, fixture_path};
