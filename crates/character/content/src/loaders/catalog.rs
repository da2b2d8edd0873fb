//! RON catalogs for traits, ancestries, classes and talents.

use std::path::Path;

use character_core::{AncestryDefinition, ClassDefinition, TalentDefinition, TraitDefinition};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Trait catalog structure for RON files.
///
/// ```ron
/// (
///     traits: [
///         (
///             id: "dwarf_tough",
///             name: "Tough",
///             cost: 1,
///             effects: [(type: "modify-stat", target: "hpMax", value: 1)],
///         ),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitCatalog {
    pub traits: Vec<TraitDefinition>,
}

/// Ancestry catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AncestryCatalog {
    pub ancestries: Vec<AncestryDefinition>,
}

/// Class catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassDefinition>,
}

/// Talent catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentCatalog {
    pub talents: Vec<TalentDefinition>,
}

fn parse<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    let catalog = ron::from_str(&content).map_err(|e| {
        anyhow::anyhow!("Failed to parse {} catalog RON at {}: {}", what, path.display(), e)
    })?;
    Ok(catalog)
}

/// Loader for trait catalogs.
pub struct TraitLoader;

impl TraitLoader {
    /// Load trait definitions from a RON file containing a [`TraitCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<TraitDefinition>> {
        let catalog: TraitCatalog = parse(path, "trait")?;
        Ok(catalog.traits)
    }
}

/// Loader for ancestry catalogs.
pub struct AncestryLoader;

impl AncestryLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<AncestryDefinition>> {
        let catalog: AncestryCatalog = parse(path, "ancestry")?;
        Ok(catalog.ancestries)
    }
}

/// Loader for class catalogs.
pub struct ClassLoader;

impl ClassLoader {
    /// Load class definitions, features included.
    pub fn load(path: &Path) -> LoadResult<Vec<ClassDefinition>> {
        let catalog: ClassCatalog = parse(path, "class")?;
        Ok(catalog.classes)
    }
}

/// Loader for talent catalogs.
pub struct TalentLoader;

impl TalentLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<TalentDefinition>> {
        let catalog: TalentCatalog = parse(path, "talent")?;
        Ok(catalog.talents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use character_core::{EffectKind, EffectValue};

    #[test]
    fn trait_catalog_parses_effect_shapes() {
        let ron = r#"(
            traits: [
                (
                    id: "keen",
                    name: "Keen",
                    cost: 1,
                    effects: [
                        (type: "grant-skill-expertise", value: {"cap_increase": 1, "level_increase": 1},
                         user_choice: Some((id: "skill", prompt: "Pick a skill"))),
                        (type: "grant-sense", target: "Darkvision", value: 10),
                        (type: "grant-resistance", target: "Fire", value: "half",
                         condition: Some("while raging")),
                        (type: "summon-familiar", value: true),
                    ],
                ),
            ],
        )"#;

        let catalog: TraitCatalog = ron::from_str(ron).unwrap();
        let effects = &catalog.traits[0].effects;

        assert_eq!(effects.len(), 4);
        assert_eq!(effects[0].kind, EffectKind::GrantSkillExpertise);
        assert_eq!(effects[0].value.as_expertise(), Some((1, 1)));
        assert!(effects[0].needs_choice());
        assert_eq!(effects[1].value, EffectValue::Number(10));
        assert_eq!(effects[2].value.as_text(), Some("half"));
        assert!(effects[2].is_conditional());
        assert!(!effects[3].kind.is_recognized());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = TraitLoader::load(Path::new("/nonexistent/traits.ron")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/traits.ron"));
    }
}
