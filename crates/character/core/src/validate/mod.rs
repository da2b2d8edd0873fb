//! Budget and mastery validation.
//!
//! The validator inspects a build against the same aggregated inputs the
//! calculator uses and reports every rule violation it finds. It never fails:
//! violations are data in the returned [`ValidationReport`], and the build is
//! never modified.
//!
//! Checks run independently of one another, so a build that breaks several
//! rules reports all of them in a stable order:
//!
//! 1. ancestry points, minor traits, negative trait refunds
//! 2. skill, trade and language point pools
//! 3. mastery ceilings and the level-1 Adept rule
//! 4. attribute scores and attribute points
//! 5. choices still waiting for an answer
mod ancestry;
mod attributes;
mod mastery;
mod points;

use crate::aggregate::AggregatedEffects;
use crate::build::{Attribute, CharacterBuildData};
use crate::config::RulesConfig;
use crate::engine::ProcessingResult;
use crate::stats::{FinalAttributes, MasteryLimits, PointPools, StatLayer};

/// Stable identifier of a validation finding.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    AncestryPointsExceeded,
    AncestryPointsUnspent,
    TooManyMinorTraits,
    NegativeTraitPointsExceeded,
    SkillPointsExceeded,
    TradePointsExceeded,
    LanguagePointsExceeded,
    SkillMasteryAboveCap,
    TradeMasteryAboveCap,
    TooManyAdeptAtLevelOne,
    AttributeBelowFloor,
    AttributeAboveLimit,
    AttributePointsExceeded,
    ChoicePending,
}

impl IssueCode {
    /// Pending choices mark a build incomplete rather than illegal.
    pub const fn is_incomplete(self) -> bool {
        matches!(self, Self::ChoicePending | Self::AncestryPointsUnspent)
    }
}

/// A single finding with a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Outcome of validating one build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationReport {
    pub valid: bool,
    pub messages: Vec<String>,
    pub issues: Vec<ValidationIssue>,
    /// Points available per pool after conversions.
    pub available: PointPools,
    /// Points spent per pool.
    pub spent: PointPools,
}

impl ValidationReport {
    fn from_issues(issues: Vec<ValidationIssue>, available: PointPools, spent: PointPools) -> Self {
        Self {
            valid: issues.is_empty(),
            messages: issues.iter().map(|issue| issue.message.clone()).collect(),
            issues,
            available,
            spent,
        }
    }

    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }

    /// Points left per pool (negative when overspent).
    pub fn remaining(&self) -> PointPools {
        self.available.remaining(&self.spent)
    }
}

/// Checks point budgets and mastery ceilings.
#[derive(Clone, Copy, Debug)]
pub struct BudgetValidator<'c> {
    config: &'c RulesConfig,
}

impl<'c> BudgetValidator<'c> {
    pub fn new(config: &'c RulesConfig) -> Self {
        Self { config }
    }

    pub fn validate(
        &self,
        build: &CharacterBuildData,
        aggregated: &AggregatedEffects<'_>,
        processing: &ProcessingResult,
    ) -> ValidationReport {
        let config = self.config;
        let modifiers = &processing.stat_modifiers;
        let mut issues = Vec::new();

        let final_attributes = FinalAttributes::compute(&build.attributes, modifiers);
        let available = PointPools::compute(
            build,
            final_attributes.get(Attribute::Intelligence),
            modifiers,
            config,
        );
        let spent = points::spent(build, &aggregated.active_traits, config);

        ancestry::check(&aggregated.active_traits, &available, &spent, config, &mut issues);
        points::check(&available, &spent, &mut issues);

        let limits =
            MasteryLimits::compute(build.level, modifiers, &processing.mastery_grants);
        mastery::check(build, &limits, config, &mut issues);

        attributes::check(build, &available, &spent, config, &mut issues);

        for pending in &aggregated.pending {
            issues.push(ValidationIssue::new(
                IssueCode::ChoicePending,
                format!("Choice '{}' has not been made: {}", pending.key, pending.prompt),
            ));
        }

        let report = ValidationReport::from_issues(issues, available, spent);
        tracing::debug!(
            character = %build.name,
            valid = report.valid,
            issues = report.issues.len(),
            "validated build"
        );
        report
    }
}
