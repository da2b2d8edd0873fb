//! Public entry points composing the pipeline.
//!
//! ```text
//! build --> EffectAggregator --> EffectProcessor --> StatCalculator --> stats
//!                  |                    |
//!                  +--------------------+--> BudgetValidator --> report
//! ```
//!
//! Every call starts from scratch: nothing computed for one build is cached
//! or reused for the next.

use crate::aggregate::{AggregatedEffects, EffectAggregator};
use crate::build::CharacterBuildData;
use crate::config::RulesConfig;
use crate::diagnostics::Diagnostics;
use crate::engine::{EffectProcessor, ProcessingResult};
use crate::env::RulesEnv;
use crate::error::CalculationError;
use crate::stats::{CalculatedCharacterStats, CalculationInput, StatCalculator};
use crate::validate::{BudgetValidator, ValidationReport};

/// Stats and validation report for the same build.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    pub stats: CalculatedCharacterStats,
    pub report: ValidationReport,
}

/// Runs aggregation, processing, calculation and validation for builds.
#[derive(Clone)]
pub struct CharacterCalculator<'a> {
    env: RulesEnv<'a>,
    config: &'a RulesConfig,
    processor: EffectProcessor,
}

impl<'a> CharacterCalculator<'a> {
    pub fn new(env: RulesEnv<'a>, config: &'a RulesConfig) -> Self {
        Self::with_processor(env, config, EffectProcessor::default())
    }

    pub fn with_processor(
        env: RulesEnv<'a>,
        config: &'a RulesConfig,
        processor: EffectProcessor,
    ) -> Self {
        Self {
            env,
            config,
            processor,
        }
    }

    pub fn config(&self) -> &RulesConfig {
        self.config
    }

    /// Derives the full stat sheet for `build`.
    ///
    /// # Errors
    ///
    /// Fails only for malformed input (blank class id, level out of range) or
    /// an oracle missing from the environment.
    pub fn calculate(
        &self,
        build: &CharacterBuildData,
    ) -> Result<CalculatedCharacterStats, CalculationError> {
        let (aggregated, processing) = self.prepare(build)?;
        Ok(self.finish(build, &aggregated, processing))
    }

    /// Checks point budgets and mastery ceilings for `build`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::calculate`]. Rule violations are never errors.
    pub fn validate(&self, build: &CharacterBuildData) -> Result<ValidationReport, CalculationError> {
        let (aggregated, processing) = self.prepare(build)?;
        Ok(BudgetValidator::new(self.config).validate(build, &aggregated, &processing))
    }

    /// Calculates and validates from one aggregation pass.
    ///
    /// # Errors
    ///
    /// Same as [`Self::calculate`].
    pub fn evaluate(&self, build: &CharacterBuildData) -> Result<Evaluation, CalculationError> {
        let (aggregated, processing) = self.prepare(build)?;
        let report = BudgetValidator::new(self.config).validate(build, &aggregated, &processing);
        let stats = self.finish(build, &aggregated, processing);
        Ok(Evaluation { stats, report })
    }

    fn prepare(
        &self,
        build: &CharacterBuildData,
    ) -> Result<(AggregatedEffects<'a>, ProcessingResult), CalculationError> {
        build.check_well_formed()?;
        let aggregated = EffectAggregator::new(self.env).aggregate(build)?;
        let processing = self.processor.process(&aggregated.effects);
        Ok((aggregated, processing))
    }

    fn finish(
        &self,
        build: &CharacterBuildData,
        aggregated: &AggregatedEffects<'a>,
        processing: ProcessingResult,
    ) -> CalculatedCharacterStats {
        let diagnostics = Diagnostics {
            missing_content: aggregated.missing.clone(),
            pending_choices: aggregated.pending.clone(),
            unhandled_effects: Vec::new(),
        };
        let stats = StatCalculator::new(self.config).calculate(CalculationInput {
            build,
            class: aggregated.class,
            processing,
            diagnostics,
        });

        tracing::debug!(
            character = %stats.name,
            level = stats.level,
            class = %stats.class_id,
            hp = stats.hp_max,
            diagnostics = stats.diagnostics.messages().len(),
            "calculated character"
        );
        stats
    }
}
