//! Repository contract for saving and loading characters.

use super::{CharacterKey, CharacterRecord, Result};

/// Repository for character persistence, keyed by owner and character id.
///
/// Records are stored whole: saving an existing key replaces the previous
/// record.
pub trait CharacterRepository: Send + Sync {
    /// Insert or replace a record under its key.
    fn save(&self, record: &CharacterRecord) -> Result<()>;

    /// Load a record by key.
    fn load(&self, key: &CharacterKey) -> Result<Option<CharacterRecord>>;

    /// All records of `owner`, ordered by character id.
    fn list_by_owner(&self, owner: &str) -> Result<Vec<CharacterRecord>>;

    /// Delete a record. Returns true if something was removed.
    fn delete(&self, key: &CharacterKey) -> Result<bool>;

    /// Check if a record exists
    fn exists(&self, key: &CharacterKey) -> Result<bool> {
        Ok(self.load(key)?.is_some())
    }

    /// Records of `owner` whose character name matches, ignoring ASCII case.
    fn find_by_name(&self, owner: &str, name: &str) -> Result<Vec<CharacterRecord>> {
        Ok(self
            .list_by_owner(owner)?
            .into_iter()
            .filter(|record| record.build.name.eq_ignore_ascii_case(name))
            .collect())
    }
}
