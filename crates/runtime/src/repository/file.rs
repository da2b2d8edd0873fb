//! File-based CharacterRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::types::check_component;
use super::{CharacterKey, CharacterRecord, CharacterRepository, RepositoryError, Result};

/// File-based implementation of CharacterRepository.
///
/// # File Format
///
/// Each record is a pretty-printed JSON file at `<base_dir>/<owner>/<id>.json`.
/// Writes go to `<id>.json.tmp` first and are renamed into place, so a
/// reader never sees a half-written record.
pub struct FileCharacterRepository {
    base_dir: PathBuf,
}

impl FileCharacterRepository {
    /// Create a new file-based character repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn owner_dir(&self, owner: &str) -> PathBuf {
        self.base_dir.join(owner)
    }

    fn record_path(&self, key: &CharacterKey) -> PathBuf {
        self.owner_dir(&key.owner).join(format!("{}.json", key.id))
    }

    fn read_record(path: &Path) -> Result<CharacterRecord> {
        let bytes = fs::read(path)?;
        let record: CharacterRecord = serde_json::from_slice(&bytes)?;
        Ok(record)
    }
}

impl CharacterRepository for FileCharacterRepository {
    fn save(&self, record: &CharacterRecord) -> Result<()> {
        let key = &record.key;
        check_component("owner", &key.owner)?;
        check_component("character id", &key.id)?;

        fs::create_dir_all(self.owner_dir(&key.owner))?;
        let path = self.record_path(key);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(record)?;
        fs::write(&temp_path, bytes)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved character[{}] to {}", key, path.display());

        Ok(())
    }

    fn load(&self, key: &CharacterKey) -> Result<Option<CharacterRecord>> {
        check_component("owner", &key.owner)?;
        check_component("character id", &key.id)?;
        let path = self.record_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let record = Self::read_record(&path)?;
        if record.key != *key {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds record for {}",
                path.display(),
                record.key
            )));
        }

        tracing::debug!("Loaded character[{}] from {}", key, path.display());

        Ok(Some(record))
    }

    fn list_by_owner(&self, owner: &str) -> Result<Vec<CharacterRecord>> {
        check_component("owner", owner)?;
        let dir = self.owner_dir(owner);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                records.push(Self::read_record(&path)?);
            }
        }

        records.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(records)
    }

    fn delete(&self, key: &CharacterKey) -> Result<bool> {
        check_component("owner", &key.owner)?;
        check_component("character id", &key.id)?;
        let path = self.record_path(key);

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path)?;
        tracing::debug!("Deleted character[{}]", key);
        Ok(true)
    }
}
