//! Common error infrastructure for character-core.
//!
//! This module provides shared types and traits used across all error types in
//! character-core. Only caller contract violations surface as errors; rule
//! content drift (missing ids, unresolved choices, unknown effect kinds) is
//! absorbed into [`crate::Diagnostics`] instead.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failure domain has its own error enum
//! - **Severity Classification**: Bad input is told apart from a broken setup
//! - **Stable Codes**: Every variant exposes a static code for logs and metrics

use crate::env::OracleError;

/// Severity level of an error.
///
/// - **Validation**: the build is malformed; fix the input and retry
/// - **Fatal**: the engine was assembled incorrectly and cannot run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - malformed input, should not retry without changes.
    ///
    /// Examples: missing class id, level 0
    Validation,

    /// Fatal error - engine cannot proceed.
    ///
    /// Examples: a required oracle was not provided
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if no corrected input can help.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all character-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait RulesError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failures surfaced by [`crate::CharacterCalculator`].
///
/// These indicate that the caller broke the input contract. Everything else
/// the pipeline encounters is recoverable and reported through diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CalculationError {
    /// The build has no class id; class base values are structurally required.
    #[error("character build '{name}' has no class id")]
    MissingClassId { name: String },

    /// Character level is outside the supported range.
    #[error("character level must be between 1 and {max}, got {level}")]
    InvalidLevel { level: u32, max: u32 },

    /// A rule table was not wired into the environment.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl RulesError for CalculationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingClassId { .. } | Self::InvalidLevel { .. } => ErrorSeverity::Validation,
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingClassId { .. } => "CALC_MISSING_CLASS_ID",
            Self::InvalidLevel { .. } => "CALC_INVALID_LEVEL",
            Self::Oracle(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input_is_a_validation_error() {
        let err = CalculationError::MissingClassId {
            name: "Ragna".into(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "CALC_MISSING_CLASS_ID");
        assert!(!err.severity().is_fatal());
    }

    #[test]
    fn missing_oracle_is_fatal() {
        let err = CalculationError::from(OracleError::ClassesNotAvailable);
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert!(err.severity().is_fatal());
        assert_eq!(err.error_code(), "ORACLE_CLASSES_NOT_AVAILABLE");
    }
}
