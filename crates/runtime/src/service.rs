//! Calculate, validate and persist in one place.

use character_core::{
    CalculationError, CharacterBuildData, CharacterCalculator, Evaluation, RuleTables,
    RulesConfig,
};
use thiserror::Error;

use crate::repository::{CharacterKey, CharacterRecord, CharacterRepository, RepositoryError};

/// Errors surfaced by [`CharacterService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Calculation(#[from] CalculationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to digest stats: {0}")]
    Digest(String),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Facade over the engine and a [`CharacterRepository`].
///
/// Invalid builds are still stored; the report travels with the record so
/// a player can save work in progress.
pub struct CharacterService<R> {
    tables: RuleTables,
    config: RulesConfig,
    repository: R,
}

impl<R: CharacterRepository> CharacterService<R> {
    pub fn new(tables: RuleTables, config: RulesConfig, repository: R) -> Self {
        Self {
            tables,
            config,
            repository,
        }
    }

    pub fn calculator(&self) -> CharacterCalculator<'_> {
        CharacterCalculator::new(self.tables.as_env(), &self.config)
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Stats and validation report without touching the repository.
    pub fn evaluate(&self, build: &CharacterBuildData) -> Result<Evaluation> {
        Ok(self.calculator().evaluate(build)?)
    }

    /// Evaluates `build` and stores it under `owner`.
    ///
    /// Without an explicit `id` the key is derived from the character name.
    pub fn save(
        &self,
        owner: &str,
        id: Option<&str>,
        build: CharacterBuildData,
    ) -> Result<CharacterRecord> {
        let id = id.map_or_else(|| CharacterKey::slug(&build.name), str::to_owned);
        let key = CharacterKey::new(owner, id)?;
        let record = self.record(key, build)?;

        if !record.report.valid {
            tracing::warn!(
                character = %record.key,
                issues = record.report.issues.len(),
                "saving character that fails validation"
            );
        }
        self.repository.save(&record)?;
        tracing::info!(character = %record.key, digest = %record.digest, "saved character");
        Ok(record)
    }

    pub fn load(&self, owner: &str, id: &str) -> Result<Option<CharacterRecord>> {
        let key = CharacterKey::new(owner, id)?;
        Ok(self.repository.load(&key)?)
    }

    pub fn list(&self, owner: &str) -> Result<Vec<CharacterRecord>> {
        Ok(self.repository.list_by_owner(owner)?)
    }

    pub fn find_by_name(&self, owner: &str, name: &str) -> Result<Vec<CharacterRecord>> {
        Ok(self.repository.find_by_name(owner, name)?)
    }

    pub fn delete(&self, owner: &str, id: &str) -> Result<bool> {
        let key = CharacterKey::new(owner, id)?;
        Ok(self.repository.delete(&key)?)
    }

    /// Recalculates a stored build against the current rule content.
    ///
    /// Returns the stored record and whether its digest changed, or `None`
    /// if nothing is stored under the key.
    pub fn refresh(&self, owner: &str, id: &str) -> Result<Option<(CharacterRecord, bool)>> {
        let key = CharacterKey::new(owner, id)?;
        let Some(stored) = self.repository.load(&key)? else {
            return Ok(None);
        };

        let record = self.record(key, stored.build)?;
        let changed = record.digest != stored.digest;
        if changed {
            tracing::info!(character = %record.key, "stats changed under current content");
            self.repository.save(&record)?;
        }
        Ok(Some((record, changed)))
    }

    fn record(&self, key: CharacterKey, build: CharacterBuildData) -> Result<CharacterRecord> {
        let Evaluation { stats, report } = self.evaluate(&build)?;
        let digest = stats
            .digest_hex()
            .map_err(|e| ServiceError::Digest(e.to_string()))?;
        Ok(CharacterRecord {
            key,
            build,
            stats,
            report,
            digest,
        })
    }
}
