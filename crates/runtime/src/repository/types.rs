//! Stored character record and its key.

use std::fmt;

use character_core::{CalculatedCharacterStats, CharacterBuildData, ValidationReport};
use serde::{Deserialize, Serialize};

use super::{RepositoryError, Result};

/// Owner and character id.
///
/// Both parts are restricted to ASCII letters, digits, `-` and `_` so they
/// can be used as path components.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterKey {
    pub owner: String,
    pub id: String,
}

impl CharacterKey {
    pub fn new(owner: impl Into<String>, id: impl Into<String>) -> Result<Self> {
        let key = Self {
            owner: owner.into(),
            id: id.into(),
        };
        check_component("owner", &key.owner)?;
        check_component("character id", &key.id)?;
        Ok(key)
    }

    /// Derives an id from a character name: lowercase, runs of other
    /// characters collapsed to `-`.
    pub fn slug(name: &str) -> String {
        let mut slug = String::with_capacity(name.len());
        for c in name.trim().chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.ends_with('-') && !slug.is_empty() {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        slug
    }
}

impl fmt::Display for CharacterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.id)
    }
}

pub(crate) fn check_component(field: &'static str, value: &str) -> Result<()> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidKey {
            field,
            value: value.to_owned(),
        })
    }
}

/// A build together with what the engine derived from it when saved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub key: CharacterKey,
    pub build: CharacterBuildData,
    pub stats: CalculatedCharacterStats,
    pub report: ValidationReport,
    /// Hex SHA-256 of `stats`, see `CalculatedCharacterStats::digest`.
    pub digest: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(CharacterKey::slug("  Ragna the Red! "), "ragna-the-red");
        assert_eq!(CharacterKey::slug("Brom--Ironfoot"), "brom-ironfoot");
        assert_eq!(CharacterKey::slug("!!!"), "");
    }

    #[test]
    fn key_rejects_path_components() {
        assert!(CharacterKey::new("alice", "ragna").is_ok());
        assert!(matches!(
            CharacterKey::new("alice", "../etc"),
            Err(RepositoryError::InvalidKey { field: "character id", .. })
        ));
        assert!(CharacterKey::new("", "ragna").is_err());
    }
}
