//! Derived stats - Layer 2 of the stat pipeline.
//!
//! Fixed formulas over final attributes, Combat Mastery, the Prime Modifier,
//! class base values and effect deltas. Each formula returns a
//! [`StatBreakdown`] whose entries sum to the final value.
//!
//! ```text
//! HP    = class HP + Might + (level - 1) + hpMax
//! PD    = 8 + CM + Agility + Intelligence + pd      (override replaces)
//! AD    = 8 + CM + Might + Charisma + ad            (override replaces)
//! Jump  = max(1, floor(Agility / 2)) + jumpDistance (never below 1)
//! Grit  = class grit + floor(Charisma / 2) + gritPoints
//! ```
//!
//! Floors use Euclidean division so negative values round toward -inf.

use super::breakdown::{StatBreakdown, StatBreakdownBuilder};
use super::core::{FinalAttributes, PrimeModifier};
use crate::build::{Attribute, AttributeScores, ManualOverrides};
use crate::config::RulesConfig;
use crate::engine::{ProcessingResult, StatKind};
use crate::env::ClassBaseValues;

/// Keys of the per-stat breakdown map.
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
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum DerivedStat {
    Might,
    Agility,
    Charisma,
    Intelligence,
    MightSave,
    AgilitySave,
    CharismaSave,
    IntelligenceSave,
    HpMax,
    SpMax,
    MpMax,
    RestPoints,
    Pd,
    Ad,
    Pdr,
    #[strum(to_string = "saveDC")]
    #[cfg_attr(feature = "serde", serde(rename = "saveDC"))]
    SaveDc,
    AttackCheck,
    DeathThreshold,
    MoveSpeed,
    JumpDistance,
    GritPoints,
    Initiative,
}

impl DerivedStat {
    pub const fn attribute(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Might => Self::Might,
            Attribute::Agility => Self::Agility,
            Attribute::Charisma => Self::Charisma,
            Attribute::Intelligence => Self::Intelligence,
        }
    }

    pub const fn save(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Might => Self::MightSave,
            Attribute::Agility => Self::AgilitySave,
            Attribute::Charisma => Self::CharismaSave,
            Attribute::Intelligence => Self::IntelligenceSave,
        }
    }
}

/// Inputs every derived formula may read.
#[derive(Clone, Copy, Debug)]
pub struct FormulaContext<'a> {
    pub level: u32,
    pub combat_mastery: i32,
    pub prime: PrimeModifier,
    pub base_attributes: &'a AttributeScores,
    pub attributes: &'a FinalAttributes,
    pub class_base: &'a ClassBaseValues,
    pub processing: &'a ProcessingResult,
    pub overrides: &'a ManualOverrides,
    pub config: &'a RulesConfig,
}

impl FormulaContext<'_> {
    fn attribute_entry(
        &self,
        builder: StatBreakdownBuilder,
        attribute: Attribute,
    ) -> StatBreakdownBuilder {
        builder.entry(attribute.label(), self.attributes.get(attribute))
    }

    fn effects(&self, builder: StatBreakdownBuilder, stat: StatKind) -> StatBreakdownBuilder {
        builder.contributions(self.processing.contributions_to(stat))
    }

    fn combat_mastery_entry(&self, builder: StatBreakdownBuilder) -> StatBreakdownBuilder {
        builder.entry("Combat Mastery", self.combat_mastery)
    }

    fn prime_entry(&self, builder: StatBreakdownBuilder) -> StatBreakdownBuilder {
        builder.entry(
            format!("Prime ({})", self.prime.attribute.label()),
            self.prime.value,
        )
    }

    pub fn attribute(&self, attribute: Attribute) -> StatBreakdown {
        let builder = StatBreakdown::builder().entry("Base", self.base_attributes.get(attribute));
        self.effects(builder, attribute.into()).build()
    }

    /// CM + the attribute (the Prime value for the prime attribute).
    pub fn save(&self, attribute: Attribute) -> StatBreakdown {
        let builder = self.combat_mastery_entry(StatBreakdown::builder());
        let builder = if attribute == self.prime.attribute {
            self.prime_entry(builder)
        } else {
            self.attribute_entry(builder, attribute)
        };
        builder.build()
    }

    pub fn hp_max(&self) -> StatBreakdown {
        let builder = StatBreakdown::builder().entry("Class base", self.class_base.hp);
        let builder = self
            .attribute_entry(builder, Attribute::Might)
            .entry("Level", self.level as i32 - 1);
        self.effects(builder, StatKind::HpMax).build()
    }

    pub fn sp_max(&self) -> StatBreakdown {
        let builder = StatBreakdown::builder().entry("Class base", self.class_base.sp);
        let builder = self.attribute_entry(builder, Attribute::Agility);
        self.effects(builder, StatKind::SpMax).build()
    }

    pub fn mp_max(&self) -> StatBreakdown {
        let builder = StatBreakdown::builder().entry("Class base", self.class_base.mp);
        let builder = self.attribute_entry(builder, Attribute::Intelligence);
        self.effects(builder, StatKind::MpMax).build()
    }

    pub fn rest_points(&self, hp_max: i32) -> StatBreakdown {
        let builder = StatBreakdown::builder().entry("HP max", hp_max);
        self.effects(builder, StatKind::RestPoints).build()
    }

    pub fn precision_defense(&self) -> StatBreakdown {
        let builder = StatBreakdown::builder().entry("Base", self.config.defense_base);
        let builder = self.combat_mastery_entry(builder);
        let builder = self.attribute_entry(builder, Attribute::Agility);
        let builder = self.attribute_entry(builder, Attribute::Intelligence);
        self.effects(builder, StatKind::Pd)
            .override_with(self.overrides.pd)
            .build()
    }

    pub fn area_defense(&self) -> StatBreakdown {
        let builder = StatBreakdown::builder().entry("Base", self.config.defense_base);
        let builder = self.combat_mastery_entry(builder);
        let builder = self.attribute_entry(builder, Attribute::Might);
        let builder = self.attribute_entry(builder, Attribute::Charisma);
        self.effects(builder, StatKind::Ad)
            .override_with(self.overrides.ad)
            .build()
    }

    pub fn precision_damage_reduction(&self) -> StatBreakdown {
        self.effects(StatBreakdown::builder(), StatKind::Pdr)
            .override_with(self.overrides.pdr)
            .build()
    }

    pub fn save_dc(&self) -> StatBreakdown {
        let builder = StatBreakdown::builder().entry("Class base", self.class_base.save_dc);
        let builder = self.prime_entry(self.combat_mastery_entry(builder));
        self.effects(builder, StatKind::SaveDc).build()
    }

    pub fn attack_check(&self) -> StatBreakdown {
        self.prime_entry(self.combat_mastery_entry(StatBreakdown::builder()))
            .build()
    }

    pub fn death_threshold(&self) -> StatBreakdown {
        let builder = StatBreakdown::builder().entry("Class base", self.class_base.death_threshold);
        self.effects(builder, StatKind::DeathThresholdModifier)
            .build()
    }

    pub fn move_speed(&self) -> StatBreakdown {
        let builder = StatBreakdown::builder().entry("Class base", self.class_base.move_speed);
        self.effects(builder, StatKind::MoveSpeed).build()
    }

    pub fn jump_distance(&self) -> StatBreakdown {
        let half_agility = self.attributes.get(Attribute::Agility).div_euclid(2);
        let builder = StatBreakdown::builder()
            .entry("Agility / 2", half_agility)
            .clamp_min("Minimum base", 1);
        self.effects(builder, StatKind::JumpDistance)
            .clamp_min("Minimum", 1)
            .build()
    }

    pub fn grit_points(&self) -> StatBreakdown {
        let builder = StatBreakdown::builder()
            .entry("Class base", self.class_base.grit)
            .entry(
                "Charisma / 2",
                self.attributes.get(Attribute::Charisma).div_euclid(2),
            );
        self.effects(builder, StatKind::GritPoints).build()
    }

    pub fn initiative(&self) -> StatBreakdown {
        let builder = self.attribute_entry(StatBreakdown::builder(), Attribute::Agility);
        self.effects(builder, StatKind::InitiativeBonus).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectSource, SourceKind};
    use crate::engine::StatContribution;
    use crate::stats::combat_mastery;

    struct Fixture {
        base: AttributeScores,
        attributes: FinalAttributes,
        class_base: ClassBaseValues,
        processing: ProcessingResult,
        overrides: ManualOverrides,
        config: RulesConfig,
    }

    impl Fixture {
        fn new(scores: AttributeScores) -> Self {
            Self {
                base: scores,
                attributes: FinalAttributes(scores),
                class_base: ClassBaseValues::new(8, 1, 0),
                processing: ProcessingResult::new(),
                overrides: ManualOverrides::default(),
                config: RulesConfig::new(),
            }
        }

        fn context(&self, level: u32) -> FormulaContext<'_> {
            FormulaContext {
                level,
                combat_mastery: combat_mastery(level),
                prime: PrimeModifier::select(&self.attributes, None),
                base_attributes: &self.base,
                attributes: &self.attributes,
                class_base: &self.class_base,
                processing: &self.processing,
                overrides: &self.overrides,
                config: &self.config,
            }
        }
    }

    #[test]
    fn jump_distance_never_below_one() {
        let mut fixture = Fixture::new(AttributeScores::new(0, -2, 0, 0));
        let penalty = EffectSource::new(SourceKind::Trait, "heavy", "Heavy");
        fixture.processing.stat_modifiers.add(StatKind::JumpDistance, -3);
        fixture.processing.contributions.push(StatContribution {
            stat: StatKind::JumpDistance,
            source: penalty,
            amount: -3,
        });

        let jump = fixture.context(1).jump_distance();
        assert_eq!(jump.value, 1);
        assert_eq!(jump.entries_total(), 1);
    }

    #[test]
    fn negative_charisma_floors_toward_negative_infinity() {
        let fixture = Fixture::new(AttributeScores::new(0, 0, -1, 0));
        let grit = fixture.context(1).grit_points();
        // 2 + floor(-1 / 2) = 2 - 1
        assert_eq!(grit.value, 1);
    }

    #[test]
    fn override_replaces_defense_but_keeps_formula() {
        let mut fixture = Fixture::new(AttributeScores::new(3, 1, 0, 0));
        fixture.overrides.pd = Some(20);

        let pd = fixture.context(1).precision_defense();
        assert_eq!(pd.value, 20);
        assert_eq!(pd.formula_value, 8 + 1 + 1);
        assert!(pd.overridden);
        assert_eq!(pd.entries_total(), 20);
    }

    #[test]
    fn prime_attribute_save_uses_prime() {
        let fixture = Fixture::new(AttributeScores::new(3, 1, 0, -1));
        let context = fixture.context(1);
        assert_eq!(context.save(Attribute::Might).value, 1 + 3);
        assert_eq!(context.save(Attribute::Intelligence).value, 1 - 1);
    }
}
