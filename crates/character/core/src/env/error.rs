//! Oracle access errors.

use crate::error::{ErrorSeverity, RulesError};

/// A rule table the pipeline needs was not wired into the [`Env`](super::Env).
///
/// Lookups of individual ids never error; a missing id is content drift and
/// is reported through diagnostics instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("TraitOracle not available")]
    TraitsNotAvailable,

    #[error("AncestryOracle not available")]
    AncestriesNotAvailable,

    #[error("ClassOracle not available")]
    ClassesNotAvailable,

    #[error("TalentOracle not available")]
    TalentsNotAvailable,
}

impl RulesError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        // Missing oracles are fatal - the pipeline cannot proceed
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            TraitsNotAvailable => "ORACLE_TRAITS_NOT_AVAILABLE",
            AncestriesNotAvailable => "ORACLE_ANCESTRIES_NOT_AVAILABLE",
            ClassesNotAvailable => "ORACLE_CLASSES_NOT_AVAILABLE",
            TalentsNotAvailable => "ORACLE_TALENTS_NOT_AVAILABLE",
        }
    }
}
