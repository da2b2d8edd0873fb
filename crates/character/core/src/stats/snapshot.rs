//! CalculatedCharacterStats - the complete derived sheet for one build.
//!
//! Created fresh on every calculation and never mutated afterwards. With the
//! `serde` feature the sheet can be hashed ([`CalculatedCharacterStats::digest`])
//! to check that repeated calculations are bit-for-bit identical.

use std::collections::BTreeMap;

use super::StatLayer;
use super::breakdown::StatBreakdown;
use super::budget::{KnownCounts, MasteryLimits, PointPools};
use super::core::{FinalAttributes, PrimeModifier, combat_mastery};
use super::derived::{DerivedStat, FormulaContext};
use crate::build::{Attribute, AttributeScores, CharacterBuildData};
use crate::config::RulesConfig;
use crate::diagnostics::Diagnostics;
use crate::engine::{
    Advantage, ConditionalModifier, DamageTrait, GrantedAbility, GrantedChoice, GrantedSpell,
    MasteryGrant, Movement, ProcessingResult, Sense,
};
use crate::env::{ClassBaseValues, ClassDefinition};

/// Final derived statistics of a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculatedCharacterStats {
    // Identity
    pub name: String,
    pub level: u32,
    pub class_id: String,
    pub class_name: Option<String>,
    pub ancestry_ids: Vec<String>,

    // Core
    pub combat_mastery: i32,
    pub prime: PrimeModifier,
    pub attributes: AttributeScores,
    /// Attribute saves, one per attribute.
    pub saves: AttributeScores,

    // Resources
    pub hp_max: i32,
    pub sp_max: i32,
    pub mp_max: i32,
    pub rest_points: i32,
    pub grit_points: i32,

    // Defenses and checks
    pub pd: i32,
    pub ad: i32,
    pub pdr: i32,
    pub save_dc: i32,
    pub attack_check: i32,
    pub death_threshold: i32,
    pub initiative: i32,

    // Movement
    pub move_speed: i32,
    pub jump_distance: i32,

    // Budgets
    pub pools: PointPools,
    pub known: KnownCounts,
    pub mastery_limits: MasteryLimits,

    // Grants
    pub granted_abilities: Vec<GrantedAbility>,
    pub combat_training: Vec<String>,
    pub resistances: Vec<DamageTrait>,
    pub vulnerabilities: Vec<DamageTrait>,
    pub advantages: Vec<Advantage>,
    pub senses: Vec<Sense>,
    pub movements: Vec<Movement>,
    pub spells: Vec<GrantedSpell>,
    pub mastery_grants: Vec<MasteryGrant>,
    pub granted_choices: Vec<GrantedChoice>,
    pub conditional_modifiers: Vec<ConditionalModifier>,

    pub breakdowns: BTreeMap<DerivedStat, StatBreakdown>,
    pub diagnostics: Diagnostics,
}

impl CalculatedCharacterStats {
    pub fn breakdown(&self, stat: DerivedStat) -> Option<&StatBreakdown> {
        self.breakdowns.get(&stat)
    }

    pub fn save(&self, attribute: Attribute) -> i32 {
        self.saves.get(attribute)
    }

    /// SHA-256 over the bincode encoding of the whole sheet.
    ///
    /// # Errors
    ///
    /// Returns the bincode error if the sheet cannot be encoded.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }

    /// Lowercase hex form of [`Self::digest`].
    #[cfg(feature = "serde")]
    pub fn digest_hex(&self) -> Result<String, bincode::Error> {
        Ok(hex::encode(self.digest()?))
    }
}

/// Everything the calculator consumes for one build.
#[derive(Clone, Debug)]
pub struct CalculationInput<'a> {
    pub build: &'a CharacterBuildData,
    pub class: Option<&'a ClassDefinition>,
    pub processing: ProcessingResult,
    pub diagnostics: Diagnostics,
}

/// Applies the stat formulas to processed effects.
#[derive(Clone, Copy, Debug)]
pub struct StatCalculator<'c> {
    config: &'c RulesConfig,
}

impl<'c> StatCalculator<'c> {
    pub fn new(config: &'c RulesConfig) -> Self {
        Self { config }
    }

    pub fn calculate(&self, input: CalculationInput<'_>) -> CalculatedCharacterStats {
        let CalculationInput {
            build,
            class,
            processing,
            mut diagnostics,
        } = input;

        let default_base = ClassBaseValues::default();
        let class_base = class.map_or(&default_base, |class| &class.base);

        // Layer 1: attributes
        let attributes = FinalAttributes::compute(&build.attributes, &processing.stat_modifiers);
        let prime = PrimeModifier::select(&attributes, build.prime_attribute_choice);
        let combat_mastery = combat_mastery(build.level);

        // Layer 2: derived formulas
        let context = FormulaContext {
            level: build.level,
            combat_mastery,
            prime,
            base_attributes: &build.attributes,
            attributes: &attributes,
            class_base,
            processing: &processing,
            overrides: &build.overrides,
            config: self.config,
        };

        let mut breakdowns = BTreeMap::new();
        let mut saves = AttributeScores::default();
        for attribute in Attribute::all() {
            breakdowns.insert(DerivedStat::attribute(attribute), context.attribute(attribute));
            let save = context.save(attribute);
            saves.set(attribute, save.value);
            breakdowns.insert(DerivedStat::save(attribute), save);
        }

        let hp_max = context.hp_max();
        let rest_points = context.rest_points(hp_max.value);
        let derived = [
            (DerivedStat::HpMax, hp_max),
            (DerivedStat::SpMax, context.sp_max()),
            (DerivedStat::MpMax, context.mp_max()),
            (DerivedStat::RestPoints, rest_points),
            (DerivedStat::Pd, context.precision_defense()),
            (DerivedStat::Ad, context.area_defense()),
            (DerivedStat::Pdr, context.precision_damage_reduction()),
            (DerivedStat::SaveDc, context.save_dc()),
            (DerivedStat::AttackCheck, context.attack_check()),
            (DerivedStat::DeathThreshold, context.death_threshold()),
            (DerivedStat::MoveSpeed, context.move_speed()),
            (DerivedStat::JumpDistance, context.jump_distance()),
            (DerivedStat::GritPoints, context.grit_points()),
            (DerivedStat::Initiative, context.initiative()),
        ];
        breakdowns.extend(derived);
        let value = |stat: DerivedStat| breakdowns.get(&stat).map_or(0, |b| b.value);

        // Layer 3: budgets
        let modifiers = &processing.stat_modifiers;
        let pools = PointPools::compute(
            build,
            attributes.get(Attribute::Intelligence),
            modifiers,
            self.config,
        );
        let known = KnownCounts::from_modifiers(modifiers);
        let mastery_limits =
            MasteryLimits::compute(build.level, modifiers, &processing.mastery_grants);

        let mut combat_training = class_base.combat_training.clone();
        for training in &processing.combat_training {
            if !combat_training.contains(training) {
                combat_training.push(training.clone());
            }
        }

        let ProcessingResult {
            conditional_modifiers,
            granted_abilities,
            resistances,
            vulnerabilities,
            advantages,
            senses,
            movements,
            spells,
            mastery_grants,
            granted_choices,
            unhandled,
            ..
        } = processing;
        diagnostics.unhandled_effects.extend(unhandled);

        CalculatedCharacterStats {
            name: build.name.clone(),
            level: build.level,
            class_id: build.class_id.clone(),
            class_name: class.map(|class| class.name.clone()),
            ancestry_ids: build.ancestry_ids.clone(),
            combat_mastery,
            prime,
            attributes: attributes.scores(),
            saves,
            hp_max: value(DerivedStat::HpMax),
            sp_max: value(DerivedStat::SpMax),
            mp_max: value(DerivedStat::MpMax),
            rest_points: value(DerivedStat::RestPoints),
            grit_points: value(DerivedStat::GritPoints),
            pd: value(DerivedStat::Pd),
            ad: value(DerivedStat::Ad),
            pdr: value(DerivedStat::Pdr),
            save_dc: value(DerivedStat::SaveDc),
            attack_check: value(DerivedStat::AttackCheck),
            death_threshold: value(DerivedStat::DeathThreshold),
            initiative: value(DerivedStat::Initiative),
            move_speed: value(DerivedStat::MoveSpeed),
            jump_distance: value(DerivedStat::JumpDistance),
            pools,
            known,
            mastery_limits,
            granted_abilities,
            combat_training,
            resistances,
            vulnerabilities,
            advantages,
            senses,
            movements,
            spells,
            mastery_grants,
            granted_choices,
            conditional_modifiers,
            breakdowns,
            diagnostics,
        }
    }
}
