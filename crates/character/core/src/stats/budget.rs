//! Point pools, known counts and mastery ceilings.
//!
//! Shared by the calculator (which reports them) and the validator (which
//! checks spending against them).

use std::collections::BTreeMap;

use crate::build::{Attribute, CharacterBuildData, MasteryLevel, PointConversions};
use crate::config::RulesConfig;
use crate::engine::{MasteryDomain, MasteryGrant, StatKind, StatModifiers, saturate};

/// Points available to spend, after conversions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointPools {
    pub skill: i32,
    pub trade: i32,
    pub language: i32,
    pub ancestry: i32,
    pub attribute: i32,
}

impl PointPools {
    /// Pools before any conversion.
    ///
    /// Skill points scale with the build's final Intelligence.
    pub fn base(intelligence: i32, modifiers: &StatModifiers, config: &RulesConfig) -> Self {
        Self {
            skill: config
                .base_skill_points
                .saturating_add(intelligence)
                .saturating_add(modifiers.get(StatKind::SkillPoints)),
            trade: config
                .base_trade_points
                .saturating_add(modifiers.get(StatKind::TradePoints)),
            language: config
                .base_language_points
                .saturating_add(modifiers.get(StatKind::LanguagePoints)),
            ancestry: config
                .ancestry_points
                .saturating_add(modifiers.get(StatKind::AncestryPoints)),
            attribute: config
                .attribute_points
                .saturating_add(modifiers.get(StatKind::AttributePoints)),
        }
    }

    /// Applies the player's exchanges between pools.
    ///
    /// Converting a skill point to trade points and buying it back with the
    /// same trade points leaves every pool unchanged. Pools saturate at the
    /// `i32` bounds, so absurd conversion counts overspend instead of wrapping.
    pub fn convert(self, conversions: &PointConversions, config: &RulesConfig) -> Self {
        let skill_to_trade = i64::from(conversions.skill_to_trade);
        let trade_to_skill = i64::from(conversions.trade_to_skill);
        let trade_to_language = i64::from(conversions.trade_to_language);
        let trade_rate = i64::from(config.trade_points_per_skill_point);
        let language_rate = i64::from(config.language_points_per_trade_point);

        Self {
            skill: saturate(i64::from(self.skill) - skill_to_trade + trade_to_skill),
            trade: saturate(
                i64::from(self.trade)
                    .saturating_add(skill_to_trade.saturating_mul(trade_rate))
                    .saturating_sub(trade_to_skill.saturating_mul(trade_rate))
                    .saturating_sub(trade_to_language),
            ),
            language: saturate(
                i64::from(self.language)
                    .saturating_add(trade_to_language.saturating_mul(language_rate)),
            ),
            ..self
        }
    }

    /// Points left per pool (negative when overspent).
    pub fn remaining(&self, spent: &Self) -> Self {
        Self {
            skill: self.skill.saturating_sub(spent.skill),
            trade: self.trade.saturating_sub(spent.trade),
            language: self.language.saturating_sub(spent.language),
            ancestry: self.ancestry.saturating_sub(spent.ancestry),
            attribute: self.attribute.saturating_sub(spent.attribute),
        }
    }

    pub fn compute(
        build: &CharacterBuildData,
        intelligence: i32,
        modifiers: &StatModifiers,
        config: &RulesConfig,
    ) -> Self {
        Self::base(intelligence, modifiers, config).convert(&build.conversions, config)
    }
}

/// Number of maneuvers, techniques, cantrips and spells the character knows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnownCounts {
    pub maneuvers: i32,
    pub techniques: i32,
    pub cantrips: i32,
    pub spells: i32,
}

impl KnownCounts {
    pub fn from_modifiers(modifiers: &StatModifiers) -> Self {
        Self {
            maneuvers: modifiers.get(StatKind::ManeuversKnown),
            techniques: modifiers.get(StatKind::TechniquesKnown),
            cantrips: modifiers.get(StatKind::CantripsKnown),
            spells: modifiers.get(StatKind::SpellsKnown),
        }
    }
}

/// Highest mastery a skill or trade may reach.
///
/// Base ceiling is Adept plus one tier every five levels, capped at
/// Grandmaster. Expertise naming a skill or trade raises the ceiling for that
/// one entry; expertise without a target raises the whole domain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MasteryLimits {
    pub skill: MasteryLevel,
    pub trade: MasteryLevel,
    /// Ceiling for trades configured as knowledge trades.
    pub knowledge_trade: MasteryLevel,
    /// Extra tiers per named skill, keyed by lowercase name.
    pub skill_expertise: BTreeMap<String, i32>,
    /// Extra tiers per named trade, keyed by lowercase name.
    pub trade_expertise: BTreeMap<String, i32>,
}

impl MasteryLimits {
    pub fn base_tier(level: u32) -> i32 {
        MasteryLevel::Adept.tier() + (level / RulesConfig::LEVELS_PER_TIER) as i32
    }

    pub fn compute(level: u32, modifiers: &StatModifiers, grants: &[MasteryGrant]) -> Self {
        let base = Self::base_tier(level);
        let trade = base.saturating_add(modifiers.get(StatKind::TradeMasteryLimit));

        let mut skill_expertise = BTreeMap::new();
        let mut trade_expertise = BTreeMap::new();
        for grant in grants {
            let target = grant.target.trim();
            if target.is_empty() {
                continue;
            }
            let per_target = match grant.domain {
                MasteryDomain::Skill => &mut skill_expertise,
                MasteryDomain::Trade => &mut trade_expertise,
            };
            let bonus: &mut i32 = per_target.entry(target.to_ascii_lowercase()).or_default();
            *bonus = bonus.saturating_add(grant.cap_increase);
        }

        Self {
            skill: Self::ceiling(base.saturating_add(modifiers.get(StatKind::SkillMasteryLimit))),
            trade: Self::ceiling(trade),
            knowledge_trade: Self::ceiling(
                trade.saturating_add(modifiers.get(StatKind::KnowledgeMasteryLimit)),
            ),
            skill_expertise,
            trade_expertise,
        }
    }

    fn ceiling(tier: i32) -> MasteryLevel {
        MasteryLevel::from_tier_saturating(tier.min(MasteryLevel::MAX.tier()))
    }

    fn raised(domain: MasteryLevel, expertise: &BTreeMap<String, i32>, name: &str) -> MasteryLevel {
        match expertise.get(&name.trim().to_ascii_lowercase()) {
            Some(bonus) => Self::ceiling(domain.tier().saturating_add(*bonus)),
            None => domain,
        }
    }

    /// Ceiling for a named skill.
    pub fn for_skill(&self, skill: &str) -> MasteryLevel {
        Self::raised(self.skill, &self.skill_expertise, skill)
    }

    /// Ceiling for a named trade.
    pub fn for_trade(&self, trade: &str, config: &RulesConfig) -> MasteryLevel {
        let domain = if config.is_knowledge_trade(trade) {
            self.knowledge_trade
        } else {
            self.trade
        };
        Self::raised(domain, &self.trade_expertise, trade)
    }
}

/// Attribute points spent: each score above the floor costs one point.
pub fn attribute_points_spent(build: &CharacterBuildData, config: &RulesConfig) -> i32 {
    let spent: i64 = Attribute::all()
        .into_iter()
        .map(|attribute| {
            i64::from(build.attributes.get(attribute)) - i64::from(config.attribute_floor)
        })
        .sum();
    saturate(spent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectSource, SourceKind};

    #[test]
    fn base_pools_follow_config() {
        let config = RulesConfig::new();
        let pools = PointPools::base(2, &StatModifiers::new(), &config);

        assert_eq!(pools.skill, 7);
        assert_eq!(pools.trade, 3);
        assert_eq!(pools.language, 2);
        assert_eq!(pools.ancestry, 5);
        assert_eq!(pools.attribute, 12);
    }

    #[test]
    fn conversions_round_trip() {
        let config = RulesConfig::new();
        let pools = PointPools::base(0, &StatModifiers::new(), &config);

        let there = pools.convert(
            &PointConversions {
                skill_to_trade: 1,
                ..PointConversions::none()
            },
            &config,
        );
        assert_eq!((there.skill, there.trade), (4, 5));

        let round_trip = pools.convert(
            &PointConversions {
                skill_to_trade: 1,
                trade_to_skill: 1,
                trade_to_language: 0,
            },
            &config,
        );
        assert_eq!(round_trip, pools);
    }

    #[test]
    fn trade_to_language_doubles() {
        let config = RulesConfig::new();
        let pools = PointPools::base(0, &StatModifiers::new(), &config).convert(
            &PointConversions {
                trade_to_language: 1,
                ..PointConversions::none()
            },
            &config,
        );
        assert_eq!((pools.trade, pools.language), (2, 4));
    }

    #[test]
    fn mastery_ceiling_rises_and_caps() {
        let none = StatModifiers::new();
        assert_eq!(MasteryLimits::compute(1, &none, &[]).skill, MasteryLevel::Adept);
        assert_eq!(MasteryLimits::compute(5, &none, &[]).skill, MasteryLevel::Expert);
        assert_eq!(MasteryLimits::compute(20, &none, &[]).skill, MasteryLevel::Grandmaster);

        let boosted = StatModifiers::new()
            .with(StatKind::SkillMasteryLimit, 9)
            .with(StatKind::KnowledgeMasteryLimit, 1);
        let limits = MasteryLimits::compute(1, &boosted, &[]);
        assert_eq!(limits.skill, MasteryLevel::Grandmaster);
        assert_eq!(limits.trade, MasteryLevel::Adept);
        assert_eq!(limits.knowledge_trade, MasteryLevel::Expert);
    }

    fn grant(domain: MasteryDomain, target: &str) -> MasteryGrant {
        MasteryGrant {
            domain,
            target: target.to_owned(),
            cap_increase: 1,
            level_increase: 1,
            source: EffectSource::new(SourceKind::Trait, "expertise", "Expertise"),
        }
    }

    #[test]
    fn named_expertise_raises_only_its_target() {
        let config = RulesConfig::new();
        let grants = [
            grant(MasteryDomain::Skill, "Athletics"),
            grant(MasteryDomain::Trade, "smithing"),
        ];
        let limits = MasteryLimits::compute(1, &StatModifiers::new(), &grants);

        assert_eq!(limits.skill, MasteryLevel::Adept);
        assert_eq!(limits.for_skill("athletics"), MasteryLevel::Expert);
        assert_eq!(limits.for_skill("survival"), MasteryLevel::Adept);
        assert_eq!(limits.for_trade("smithing", &config), MasteryLevel::Expert);
        assert_eq!(limits.for_trade("cooking", &config), MasteryLevel::Adept);
    }

    #[test]
    fn out_of_range_inputs_saturate() {
        let config = RulesConfig::new();
        let pools = PointPools::base(0, &StatModifiers::new(), &config).convert(
            &PointConversions {
                skill_to_trade: 1_500_000_000,
                ..PointConversions::none()
            },
            &config,
        );
        assert_eq!(pools.trade, i32::MAX);
        assert_eq!(pools.skill, 5 - 1_500_000_000);

        let build = CharacterBuildData::new(
            "Overflow",
            "barbarian",
            1,
            crate::build::AttributeScores::new(i32::MAX, i32::MAX, 0, 0),
        );
        assert_eq!(attribute_points_spent(&build, &config), i32::MAX);
    }
}
