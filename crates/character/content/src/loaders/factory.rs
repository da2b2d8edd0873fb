//! Content factory for building rule tables from data files.

use std::path::{Path, PathBuf};

use anyhow::bail;
use character_core::{RuleTables, RulesConfig};

use crate::loaders::{
    AncestryLoader, ClassLoader, ConfigLoader, LoadResult, TalentLoader, TraitLoader,
};

/// Directory of the rule data shipped with this crate.
pub fn bundled_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Content factory that loads all rule content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── traits.ron
/// ├── ancestries.ron
/// ├── classes.ron
/// └── talents.ron
/// ```
///
/// `rules.toml` and `talents.ron` are optional; the other catalogs are required.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over [`bundled_data_dir`].
    pub fn bundled() -> Self {
        Self::new(bundled_data_dir())
    }

    /// Load rule constants from `rules.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no rules.toml, using default rules");
            return Ok(RulesConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load every catalog into one [`RuleTables`].
    ///
    /// Fails on a duplicate id within a catalog.
    pub fn load_tables(&self) -> LoadResult<RuleTables> {
        let mut tables = RuleTables::new();

        for definition in TraitLoader::load(&self.data_dir.join("traits.ron"))? {
            let id = definition.id.clone();
            if tables.insert_trait(definition).is_some() {
                bail!("duplicate trait id '{}'", id);
            }
        }
        for definition in AncestryLoader::load(&self.data_dir.join("ancestries.ron"))? {
            let id = definition.id.clone();
            if tables.insert_ancestry(definition).is_some() {
                bail!("duplicate ancestry id '{}'", id);
            }
        }
        for definition in ClassLoader::load(&self.data_dir.join("classes.ron"))? {
            let id = definition.id.clone();
            if tables.insert_class(definition).is_some() {
                bail!("duplicate class id '{}'", id);
            }
        }

        let talents_path = self.data_dir.join("talents.ron");
        if talents_path.exists() {
            for definition in TalentLoader::load(&talents_path)? {
                let id = definition.id.clone();
                if tables.insert_talent(definition).is_some() {
                    bail!("duplicate talent id '{}'", id);
                }
            }
        }

        tracing::info!(
            data_dir = %self.data_dir.display(),
            traits = tables.traits().count(),
            ancestries = tables.ancestries().count(),
            classes = tables.classes().count(),
            talents = tables.talents().count(),
            "loaded rule tables"
        );
        Ok(tables)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
