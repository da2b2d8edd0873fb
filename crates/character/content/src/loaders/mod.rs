//! Content loaders for reading rule data from files.
//!
//! Each catalog file holds one list of definitions; [`ContentFactory`]
//! collects them into [`character_core::RuleTables`].

pub mod catalog;
pub mod config;
pub mod factory;

pub use catalog::{AncestryLoader, ClassLoader, TalentLoader, TraitLoader};
pub use config::ConfigLoader;
pub use factory::{ContentFactory, bundled_data_dir};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
