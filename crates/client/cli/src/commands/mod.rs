//! Subcommands and the context they share.

mod calc;
mod list;
mod save;
mod show;
mod validate;

pub use calc::Calc;
pub use list::List;
pub use save::Save;
pub use show::Show;
pub use validate::Validate;

use std::path::Path;

use anyhow::{Context as _, Result};
use character_content::{ContentFactory, lint};
use character_core::{CalculationError, CharacterBuildData, RulesError};
use character_runtime::{CharacterService, FileCharacterRepository};

use crate::config::CliConfig;

/// What every command may need: configuration plus lazily loaded content.
pub struct Context {
    pub config: CliConfig,
}

impl Context {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Loads rule content, lints it and opens the character store.
    pub fn service(&self) -> Result<CharacterService<FileCharacterRepository>> {
        let factory = ContentFactory::new(&self.config.content_dir);
        let tables = factory.load_tables()?;
        let rules = factory.load_config()?;

        let issues = lint(&tables);
        if !issues.is_empty() {
            tracing::warn!(
                issues = issues.len(),
                "rule content has integrity problems, see earlier warnings"
            );
        }

        let repository = FileCharacterRepository::new(&self.config.data_dir).with_context(|| {
            format!(
                "Failed to open character store {}",
                self.config.data_dir.display()
            )
        })?;
        Ok(CharacterService::new(tables, rules, repository))
    }

    pub fn owner<'a>(&'a self, owner: &'a Option<String>) -> &'a str {
        owner.as_deref().unwrap_or(&self.config.owner)
    }
}

/// Turns an engine rejection into a CLI error carrying its stable code.
pub fn rejected(err: CalculationError) -> anyhow::Error {
    let severity = err.severity();
    tracing::error!(
        code = err.error_code(),
        severity = severity.as_str(),
        "build rejected by the calculator"
    );
    if severity.is_fatal() {
        anyhow::anyhow!("{err} [{}]; check the rule content setup", err.error_code())
    } else {
        anyhow::anyhow!("{err} [{}]", err.error_code())
    }
}

/// Reads a JSON build file.
pub fn read_build(path: &Path) -> Result<CharacterBuildData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read build file {}", path.display()))?;
    let build = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse build file {}", path.display()))?;
    Ok(build)
}

#[cfg(test)]
mod tests {
    use super::*;
    use character_core::MasteryLevel;

    #[test]
    fn reads_minimal_build_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragna.json");
        std::fs::write(
            &path,
            r#"{
                "name": "Ragna",
                "level": 1,
                "class_id": "barbarian",
                "ancestry_ids": ["human"],
                "attributes": {"might": 3, "agility": 1, "charisma": 0, "intelligence": 0},
                "feature_choices": {"human_attribute_increase::attribute": ["might"]},
                "skills": {"athletics": "adept"}
            }"#,
        )
        .unwrap();

        let build = read_build(&path).unwrap();
        assert_eq!(build.class_id, "barbarian");
        assert_eq!(build.skills.get("athletics"), Some(&MasteryLevel::Adept));
        assert!(build.selected_trait_ids.is_empty());
    }

    #[test]
    fn rejection_carries_error_code() {
        let err = rejected(CalculationError::InvalidLevel { level: 0, max: 20 });
        let message = err.to_string();
        assert!(message.contains("CALC_INVALID_LEVEL"));
        assert!(message.contains("got 0"));
    }

    #[test]
    fn missing_build_file_names_the_path() {
        let err = read_build(Path::new("/nonexistent/build.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/build.json"));
    }
}
