//! Effect aggregation across every rule source of a build.
//!
//! The aggregator walks the build's selections through the oracles and emits
//! one ordered, source-attributed effect list:
//!
//! 1. default traits of each ancestry,
//! 2. explicitly selected traits,
//! 3. class features unlocked at the build's level (effects, then benefits),
//! 4. chosen feature-choice options (traits, class features, talents),
//! 5. selected talents.
//!
//! Missing ids and unmade choices are recorded and skipped.
mod choice;

pub use choice::{ChoiceKey, ChoiceResolver, ParseChoiceKeyError, PendingChoice, Resolution};

use std::collections::BTreeSet;

use crate::build::CharacterBuildData;
use crate::diagnostics::{ContentKind, MissingContent};
use crate::effect::{AttributedEffect, Effect, EffectSource, SourceKind};
use crate::env::{
    AncestryOracle, ClassDefinition, ClassOracle, FeatureChoice, RulesEnv, TalentDefinition,
    TalentOracle, TraitDefinition, TraitOracle,
};
use crate::error::CalculationError;

/// Ordered effects plus the content that produced them.
#[derive(Clone, Debug, Default)]
pub struct AggregatedEffects<'a> {
    pub effects: Vec<AttributedEffect>,
    /// Traits in effect (defaults and selections), deduplicated, in order.
    pub active_traits: Vec<&'a TraitDefinition>,
    pub class: Option<&'a ClassDefinition>,
    pub talents: Vec<&'a TalentDefinition>,
    pub missing: Vec<MissingContent>,
    pub pending: Vec<PendingChoice>,
}

impl AggregatedEffects<'_> {
    /// Effects only, without provenance.
    pub fn plain_effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter().map(|attributed| &attributed.effect)
    }
}

/// Collects effects for a build from the rule tables.
#[derive(Clone, Copy)]
pub struct EffectAggregator<'a> {
    env: RulesEnv<'a>,
}

impl<'a> EffectAggregator<'a> {
    pub fn new(env: RulesEnv<'a>) -> Self {
        Self { env }
    }

    /// Aggregates every effect the build is entitled to.
    ///
    /// # Errors
    ///
    /// Only fails when an oracle is missing from the environment.
    pub fn aggregate(
        &self,
        build: &CharacterBuildData,
    ) -> Result<AggregatedEffects<'a>, CalculationError> {
        let traits = self.env.traits()?;
        let ancestries = self.env.ancestries()?;
        let classes = self.env.classes()?;
        let talents = self.env.talents()?;

        let resolver = ChoiceResolver::new(&build.feature_choices);
        let mut out = Collector {
            resolver,
            result: AggregatedEffects::default(),
        };

        // 1 + 2: ancestry defaults then selections, first occurrence wins
        let mut seen = BTreeSet::new();
        let mut trait_ids: Vec<&str> = Vec::new();
        for ancestry_id in &build.ancestry_ids {
            match ancestries.ancestry(ancestry_id) {
                Some(ancestry) => {
                    for id in &ancestry.default_trait_ids {
                        if seen.insert(id.as_str()) {
                            trait_ids.push(id);
                        }
                    }
                }
                None => out.missing(ContentKind::Ancestry, ancestry_id),
            }
        }
        for id in &build.selected_trait_ids {
            if seen.insert(id.as_str()) {
                trait_ids.push(id);
            }
        }

        for id in trait_ids {
            let Some(definition) = traits.trait_definition(id) else {
                out.missing(ContentKind::Trait, id);
                continue;
            };
            out.result.active_traits.push(definition);
            let source = EffectSource::new(SourceKind::Trait, &definition.id, &definition.name);
            out.push_effects(&definition.effects, &source);
        }

        // 3: class features up to the build's level
        let class = classes.class(&build.class_id);
        match class {
            Some(class) => {
                out.result.class = Some(class);
                for feature in class.features_up_to(build.level) {
                    let source =
                        EffectSource::new(SourceKind::ClassFeature, &feature.id, &feature.name);
                    out.push_effects(&feature.effects, &source);
                    for benefit in &feature.benefits {
                        let source = EffectSource::new(
                            SourceKind::FeatureBenefit,
                            &feature.id,
                            &benefit.name,
                        );
                        out.push_effects(&benefit.effects, &source);
                    }
                }
            }
            None => out.missing(ContentKind::Class, &build.class_id),
        }

        for id in &build.selected_talent_ids {
            match talents.talent(id) {
                Some(talent) => out.result.talents.push(talent),
                None => out.missing(ContentKind::Talent, id),
            }
        }

        // 4: chosen options, traits then class features then talents
        let active_traits = out.result.active_traits.clone();
        for definition in active_traits {
            out.push_choices(&definition.id, &definition.choices);
        }
        if let Some(class) = class {
            for feature in class.features_up_to(build.level) {
                out.push_choices(&feature.id, &feature.choices);
            }
        }
        let selected_talents = out.result.talents.clone();
        for talent in &selected_talents {
            out.push_choices(&talent.id, &talent.choices);
        }

        // 5: talents
        for talent in selected_talents {
            let source = EffectSource::new(SourceKind::Talent, &talent.id, &talent.name);
            out.push_effects(&talent.effects, &source);
        }

        tracing::debug!(
            character = %build.name,
            effects = out.result.effects.len(),
            missing = out.result.missing.len(),
            pending = out.result.pending.len(),
            "aggregated effects"
        );
        Ok(out.result)
    }
}

struct Collector<'a, 'b> {
    resolver: ChoiceResolver<'b>,
    result: AggregatedEffects<'a>,
}

impl Collector<'_, '_> {
    fn missing(&mut self, kind: ContentKind, id: &str) {
        tracing::warn!(kind = %kind, id = %id, "rule content not found, skipping");
        self.result.missing.push(MissingContent::new(kind, id));
    }

    /// Appends effects, resolving per-effect choices against `source.id`.
    fn push_effects(&mut self, effects: &[Effect], source: &EffectSource) {
        for effect in effects {
            match self.resolver.resolve_effect(&source.id, effect) {
                Resolution::Resolved(effect) => self
                    .result
                    .effects
                    .push(AttributedEffect::new(effect, source.clone())),
                Resolution::Partial(effect, pending) => {
                    self.result
                        .effects
                        .push(AttributedEffect::new(effect, source.clone()));
                    self.result.pending.push(pending);
                }
                Resolution::Deferred(pending) => self.result.pending.push(pending),
            }
        }
    }

    fn push_choices(&mut self, source_id: &str, choices: &[FeatureChoice]) {
        for choice in choices {
            let key = ChoiceKey::for_feature(source_id, choice);
            let resolution = self.resolver.resolve_feature_choice(source_id, choice);
            if let Some(pending) = resolution.pending() {
                self.result.pending.push(pending.clone());
            }
            for option in resolution.resolved().unwrap_or_default() {
                let name = if option.name.is_empty() {
                    option.value.as_str()
                } else {
                    option.name.as_str()
                };
                let source = EffectSource::new(
                    SourceKind::ChoiceOption,
                    format!("{key}.{}", option.value),
                    name,
                );
                self.push_effects(&option.effects, &source);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::AttributeScores;
    use crate::effect::EffectKind;
    use crate::env::{
        AncestryDefinition, ChoiceOption, ClassBaseValues, ClassFeature, RuleTables,
    };

    fn tables() -> RuleTables {
        RuleTables::new()
            .with_trait(
                TraitDefinition::new("sturdy", "Sturdy", 1)
                    .with_effect(Effect::new(EffectKind::ModifyStat, "hpMax", 1)),
            )
            .with_trait(
                TraitDefinition::new("quick", "Quick", 1)
                    .with_effect(Effect::new(EffectKind::ModifyStat, "moveSpeed", 1)),
            )
            .with_ancestry(
                AncestryDefinition::new("dwarf", "Dwarf").with_default_traits(["sturdy"]),
            )
            .with_class(
                ClassDefinition::new("fighter", "Fighter", ClassBaseValues::new(8, 1, 0))
                    .with_feature(
                        ClassFeature::new("stance", "Stance", 1)
                            .with_effect(Effect::new(EffectKind::ModifyStat, "pd", 1))
                            .with_choice(
                                FeatureChoice::new("style", "Pick a style", 1).with_option(
                                    ChoiceOption::new(
                                        "guard",
                                        "Guard",
                                        vec![Effect::new(EffectKind::ModifyStat, "ad", 1)],
                                    ),
                                ),
                            ),
                    )
                    .with_feature(
                        ClassFeature::new("late", "Late", 3)
                            .with_effect(Effect::new(EffectKind::ModifyStat, "pdr", 1)),
                    ),
            )
            .with_talent(
                TalentDefinition::new("tough", "Tough")
                    .with_effect(Effect::new(EffectKind::ModifyStat, "hpMax", 2)),
            )
    }

    fn build() -> CharacterBuildData {
        CharacterBuildData::new("Bruni", "fighter", 1, AttributeScores::default())
            .with_ancestry("dwarf")
            .with_trait("sturdy")
            .with_trait("quick")
            .with_talent("tough")
            .with_choice(ChoiceKey::new("stance", "style"), ["guard"])
    }

    #[test]
    fn follows_source_order_and_deduplicates_traits() {
        let tables = tables();
        let aggregated = EffectAggregator::new(tables.as_env())
            .aggregate(&build())
            .unwrap();

        let targets: Vec<_> = aggregated
            .plain_effects()
            .map(|effect| effect.target.as_str())
            .collect();
        assert_eq!(targets, vec!["hpMax", "moveSpeed", "pd", "ad", "hpMax"]);

        let trait_ids: Vec<_> = aggregated
            .active_traits
            .iter()
            .map(|definition| definition.id.as_str())
            .collect();
        assert_eq!(trait_ids, vec!["sturdy", "quick"]);
        assert_eq!(aggregated.effects[3].source.kind, SourceKind::ChoiceOption);
        assert_eq!(aggregated.effects[3].source.id, "stance::style.guard");
    }

    #[test]
    fn missing_ids_and_unmade_choices_are_recorded() {
        let tables = tables();
        let mut build = build().with_trait("ghost").with_talent("phantom");
        build.feature_choices.clear();

        let aggregated = EffectAggregator::new(tables.as_env())
            .aggregate(&build)
            .unwrap();

        assert_eq!(
            aggregated.missing,
            vec![
                MissingContent::new(ContentKind::Trait, "ghost"),
                MissingContent::new(ContentKind::Talent, "phantom"),
            ]
        );
        assert_eq!(aggregated.pending.len(), 1);
        assert_eq!(aggregated.pending[0].key, ChoiceKey::new("stance", "style"));
    }

    #[test]
    fn missing_oracle_is_an_error() {
        let env = RulesEnv::empty();
        assert!(EffectAggregator::new(env).aggregate(&build()).is_err());
    }
}
