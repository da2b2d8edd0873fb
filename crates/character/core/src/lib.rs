//! Deterministic character stat calculation.
//!
//! `character-core` turns a [`CharacterBuildData`] snapshot plus read-only
//! rule content into [`CalculatedCharacterStats`]. Rule sources (ancestry
//! traits, class features, feature choices, talents) contribute declarative
//! [`Effect`] records; the pipeline aggregates, resolves, processes and
//! reduces them through fixed formulas. The crate performs no I/O, and every
//! entry point is a pure function of its inputs.
//!
//! Start with [`CharacterCalculator`]:
//! [`CharacterCalculator::calculate`] for the stat sheet and
//! [`CharacterCalculator::validate`] for point-budget and mastery checks.
pub mod aggregate;
pub mod build;
pub mod config;
pub mod diagnostics;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod pipeline;
pub mod stats;
pub mod validate;

pub use aggregate::{
    AggregatedEffects, ChoiceKey, ChoiceResolver, EffectAggregator, PendingChoice, Resolution,
};
pub use build::{
    Attribute, AttributeScores, CharacterBuildData, LanguageFluency, ManualOverrides,
    MasteryLevel, PointConversions,
};
pub use config::RulesConfig;
pub use diagnostics::{ContentKind, Diagnostics, MissingContent, UnhandledEffect};
pub use effect::{
    AttributedEffect, Effect, EffectKind, EffectSource, EffectValue, SourceKind, UserChoice,
};
pub use engine::{
    EffectHandler, EffectProcessor, HandlerOutcome, HandlerRegistry, ProcessingResult, StatKind,
    StatModifiers,
};
pub use env::{
    AncestryDefinition, AncestryOracle, ChoiceOption, ClassBaseValues, ClassDefinition,
    ClassFeature, ClassOracle, Env, FeatureBenefit, FeatureChoice, OracleError, RuleTables,
    RulesEnv, TalentDefinition, TalentOracle, TraitDefinition, TraitOracle,
};
pub use error::{CalculationError, ErrorSeverity, RulesError};
pub use pipeline::{CharacterCalculator, Evaluation};
pub use stats::{
    CalculatedCharacterStats, DerivedStat, MasteryLimits, PointPools, PrimeModifier,
    StatBreakdown, StatCalculator,
};
pub use validate::{BudgetValidator, IssueCode, ValidationIssue, ValidationReport};
