//! In-memory CharacterRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{CharacterKey, CharacterRecord, CharacterRepository, RepositoryError, Result};

/// In-memory implementation of CharacterRepository.
#[derive(Debug, Default)]
pub struct InMemoryCharacterRepository {
    records: RwLock<BTreeMap<CharacterKey, CharacterRecord>>,
}

impl InMemoryCharacterRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharacterRepository for InMemoryCharacterRepository {
    fn save(&self, record: &CharacterRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(record.key.clone(), record.clone());
        Ok(())
    }

    fn load(&self, key: &CharacterKey) -> Result<Option<CharacterRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(key).cloned())
    }

    fn list_by_owner(&self, owner: &str) -> Result<Vec<CharacterRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records
            .values()
            .filter(|record| record.key.owner == owner)
            .cloned()
            .collect())
    }

    fn delete(&self, key: &CharacterKey) -> Result<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.remove(key).is_some())
    }
}
