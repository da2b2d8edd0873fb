//! Rules configuration loader.

use std::path::Path;

use character_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`RulesConfig`] from TOML files.
///
/// Keys left out of the file keep their default values.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let config: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            ancestry_points = 6
            knowledge_trades = ["Arcana", "History"]
            "#,
        )
        .unwrap();

        assert_eq!(config.ancestry_points, 6);
        assert!(config.is_knowledge_trade("history"));
        assert_eq!(config.base_skill_points, RulesConfig::DEFAULT_SKILL_POINTS);
        assert_eq!(config.attribute_floor, -2);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(ConfigLoader::parse("ancestry_points = \"five\"").is_err());
    }
}
