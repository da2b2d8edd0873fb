//! Environment-driven CLI configuration.

use std::env;
use std::path::PathBuf;

use crate::dirs;

/// Settings read from the environment.
///
/// | Variable | Default |
/// |----------|---------|
/// | `CHARSHEET_CONTENT_DIR` | content bundled with `character-content` |
/// | `CHARSHEET_DATA_DIR` | platform data directory |
/// | `CHARSHEET_LOG_DIR` | unset: log to stderr only |
/// | `CHARSHEET_OWNER` | `local` |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    pub content_dir: PathBuf,
    pub data_dir: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub owner: String,
}

impl CliConfig {
    pub const DEFAULT_OWNER: &'static str = "local";

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read_path = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        };

        Self {
            content_dir: read_path("CHARSHEET_CONTENT_DIR")
                .unwrap_or_else(character_content::bundled_data_dir),
            data_dir: read_path("CHARSHEET_DATA_DIR").unwrap_or_else(dirs::data_dir),
            log_dir: read_path("CHARSHEET_LOG_DIR"),
            owner: lookup("CHARSHEET_OWNER")
                .map(|owner| owner.trim().to_owned())
                .filter(|owner| !owner.is_empty())
                .unwrap_or_else(|| Self::DEFAULT_OWNER.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> CliConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]);
        assert_eq!(config.owner, "local");
        assert_eq!(config.content_dir, character_content::bundled_data_dir());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn environment_overrides() {
        let config = config(&[
            ("CHARSHEET_CONTENT_DIR", "/srv/rules"),
            ("CHARSHEET_DATA_DIR", "/srv/characters"),
            ("CHARSHEET_LOG_DIR", "/var/log/charsheet"),
            ("CHARSHEET_OWNER", " alice "),
        ]);
        assert_eq!(config.content_dir, PathBuf::from("/srv/rules"));
        assert_eq!(config.data_dir, PathBuf::from("/srv/characters"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/charsheet")));
        assert_eq!(config.owner, "alice");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = config(&[("CHARSHEET_LOG_DIR", "  "), ("CHARSHEET_OWNER", "")]);
        assert!(config.log_dir.is_none());
        assert_eq!(config.owner, "local");
    }
}
