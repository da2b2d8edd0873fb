//! Effect processing engine.
//!
//! [`EffectProcessor`] is the single place effects are interpreted. It folds
//! an attributed effect list into a [`ProcessingResult`] by dispatching each
//! effect through the [`HandlerRegistry`]:
//!
//! ```text
//! [ AttributedEffect ] --kind--> [ EffectHandler ] --> ProcessingResult
//!                        \--(no handler)--> unhandled + warn
//! ```
//!
//! Identical input order yields identical output. Numeric totals are sums,
//! so any permutation of the same effects yields identical totals.
mod handlers;
mod modifiers;
mod registry;
mod result;

pub use modifiers::{StatContribution, StatKind, StatModifiers, saturate};
pub use registry::{EffectHandler, HandlerOutcome, HandlerRegistry};
pub use result::{
    Advantage, ConditionalModifier, DamageModifier, DamageTrait, GrantedAbility, GrantedChoice,
    GrantedSpell, MasteryDomain, MasteryGrant, Movement, MovementSpeed, ProcessingResult,
    RollKind, Sense,
};

use crate::diagnostics::UnhandledEffect;
use crate::effect::AttributedEffect;

/// Folds effects into a fresh [`ProcessingResult`].
#[derive(Clone, Debug)]
pub struct EffectProcessor {
    registry: HandlerRegistry,
}

impl EffectProcessor {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn process(&self, effects: &[AttributedEffect]) -> ProcessingResult {
        let mut result = ProcessingResult::new();

        for attributed in effects {
            let effect = &attributed.effect;
            let outcome = match self.registry.handler(&effect.kind) {
                Some(handler) => handler(attributed, &mut result),
                None => HandlerOutcome::rejected("no handler registered for this effect kind"),
            };

            if let HandlerOutcome::Rejected(reason) = outcome {
                tracing::warn!(
                    kind = %effect.kind,
                    target = %effect.target,
                    source = %attributed.source,
                    reason = %reason,
                    "skipping effect"
                );
                result.unhandled.push(UnhandledEffect {
                    kind: effect.kind.clone(),
                    target: effect.target.clone(),
                    source: attributed.source.clone(),
                    reason,
                });
            }
        }

        tracing::trace!(
            contributions = result.contributions.len(),
            conditional = result.conditional_modifiers.len(),
            unhandled = result.unhandled.len(),
            "processed effects"
        );
        result
    }
}

impl Default for EffectProcessor {
    fn default() -> Self {
        Self::new(HandlerRegistry::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{Effect, EffectKind, EffectSource, EffectValue, SourceKind};

    fn attributed(effect: Effect) -> AttributedEffect {
        AttributedEffect::new(
            effect,
            EffectSource::new(SourceKind::Trait, "test_trait", "Test Trait"),
        )
    }

    #[test]
    fn conditional_modifier_stays_out_of_totals() {
        let effects = vec![
            attributed(Effect::new(EffectKind::ModifyStat, "ad", 1)),
            attributed(
                Effect::new(EffectKind::ModifyStat, "ad", 2).with_condition("while raging"),
            ),
        ];
        let result = EffectProcessor::default().process(&effects);

        assert_eq!(result.stat_modifiers.get(StatKind::Ad), 1);
        assert_eq!(result.conditional_modifiers.len(), 1);
        assert_eq!(result.conditional_modifiers[0].amount, 2);
        assert_eq!(result.conditional_modifiers[0].condition, "while raging");
        assert_eq!(result.contributions.len(), 1);
    }

    #[test]
    fn unknown_kinds_and_bad_values_are_recorded() {
        let effects = vec![
            attributed(Effect::new(
                EffectKind::Unrecognized("grant-wings".into()),
                "fly",
                true,
            )),
            attributed(Effect::new(EffectKind::ModifyStat, "luck", 1)),
            attributed(Effect::new(EffectKind::ModifyStat, "hpMax", "lots")),
            attributed(Effect::new(EffectKind::ModifyStat, "hpMax", 2)),
        ];
        let result = EffectProcessor::default().process(&effects);

        assert_eq!(result.unhandled.len(), 3);
        assert_eq!(result.stat_modifiers.get(StatKind::HpMax), 2);
    }

    #[test]
    fn combat_training_is_deduplicated_in_first_seen_order() {
        let effects = vec![
            attributed(Effect::new(EffectKind::GrantCombatTraining, "Heavy Armor", true)),
            attributed(Effect::new(EffectKind::GrantCombatTraining, "Shields", true)),
            attributed(Effect::new(EffectKind::GrantCombatTraining, "Heavy Armor", true)),
        ];
        let result = EffectProcessor::default().process(&effects);
        assert_eq!(result.combat_training, vec!["Heavy Armor", "Shields"]);
    }

    #[test]
    fn expertise_is_recorded_per_target_or_domain_wide() {
        let effects = vec![attributed(Effect::new(
            EffectKind::GrantSkillExpertise,
            "athletics",
            EffectValue::Expertise {
                cap_increase: 1,
                level_increase: 1,
            },
        ))];
        let result = EffectProcessor::default().process(&effects);

        assert_eq!(result.stat_modifiers.get(StatKind::SkillMasteryLimit), 0);
        assert_eq!(result.mastery_grants.len(), 1);
        assert_eq!(result.mastery_grants[0].domain, MasteryDomain::Skill);
        assert_eq!(result.mastery_grants[0].target, "athletics");
        assert_eq!(result.granted_abilities.len(), 1);
        assert!(result.granted_abilities[0].name.contains("athletics"));

        let open = vec![attributed(Effect::new(
            EffectKind::GrantTradeExpertise,
            "",
            EffectValue::Expertise {
                cap_increase: 1,
                level_increase: 0,
            },
        ))];
        let result = EffectProcessor::default().process(&open);
        assert_eq!(result.stat_modifiers.get(StatKind::TradeMasteryLimit), 1);
    }

    #[test]
    fn numeric_spell_grants_count_named_grants_list() {
        let effects = vec![
            attributed(Effect::new(EffectKind::GrantCantrip, "", 2)),
            attributed(Effect::new(EffectKind::GrantSpell, "Fire Bolt", true)),
            attributed(Effect::new(EffectKind::GrantManeuvers, "", 3)),
        ];
        let result = EffectProcessor::default().process(&effects);

        assert_eq!(result.stat_modifiers.get(StatKind::CantripsKnown), 2);
        assert_eq!(result.stat_modifiers.get(StatKind::ManeuversKnown), 3);
        assert_eq!(result.spells.len(), 1);
        assert_eq!(result.spells[0].name, "Fire Bolt");
        assert!(!result.spells[0].cantrip);
    }

    #[test]
    fn resistances_parse_modifiers() {
        let effects = vec![
            attributed(Effect::new(EffectKind::GrantResistance, "Poison", "half")),
            attributed(Effect::new(EffectKind::GrantResistance, "Cold", 1)),
            attributed(Effect::new(EffectKind::GrantVulnerability, "Radiant", true)),
        ];
        let result = EffectProcessor::default().process(&effects);

        assert_eq!(result.resistances[0].modifier, DamageModifier::Half);
        assert_eq!(result.resistances[1].modifier, DamageModifier::Flat(1));
        assert_eq!(result.vulnerabilities[0].modifier, DamageModifier::Double);
    }

    #[test]
    fn empty_registry_leaves_everything_unhandled() {
        let effects = vec![attributed(Effect::new(EffectKind::ModifyStat, "pd", 1))];
        let result = EffectProcessor::new(HandlerRegistry::empty()).process(&effects);
        assert!(result.stat_modifiers.is_zero());
        assert_eq!(result.unhandled.len(), 1);
    }
}
