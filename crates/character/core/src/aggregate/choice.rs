//! Runtime choice resolution.
//!
//! Every choice a player answers is stored in the build under a
//! [`ChoiceKey`]. Keys are derived in exactly two places
//! ([`ChoiceKey::for_effect`] and [`ChoiceKey::for_feature`]) so the writer and
//! the reader of a recorded answer can never disagree on its spelling.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::effect::{Effect, UserChoice};
use crate::env::{ChoiceOption, FeatureChoice};

/// Structural identity of a player choice: which content offered it and which
/// of its choices it is. Rendered as `source::choice`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoiceKey {
    pub source: String,
    pub choice: String,
}

impl ChoiceKey {
    pub const SEPARATOR: &'static str = "::";

    pub fn new(source: impl Into<String>, choice: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            choice: choice.into(),
        }
    }

    /// Key for an effect-level choice offered by `source_id`.
    pub fn for_effect(source_id: &str, choice: &UserChoice) -> Self {
        Self::new(source_id, choice.id.as_str())
    }

    /// Key for a feature choice menu offered by `source_id`.
    pub fn for_feature(source_id: &str, choice: &FeatureChoice) -> Self {
        Self::new(source_id, choice.id.as_str())
    }
}

impl core::fmt::Display for ChoiceKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}{}", self.source, Self::SEPARATOR, self.choice)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("choice key '{0}' is not of the form source::choice")]
pub struct ParseChoiceKeyError(pub String);

impl FromStr for ChoiceKey {
    type Err = ParseChoiceKeyError;

    /// Splits on the last separator; source ids may themselves contain `::`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once(Self::SEPARATOR) {
            Some((source, choice)) if !source.is_empty() && !choice.is_empty() => {
                Ok(Self::new(source, choice))
            }
            _ => Err(ParseChoiceKeyError(s.to_owned())),
        }
    }
}

/// A choice the player has not (validly) made yet.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingChoice {
    pub key: ChoiceKey,
    pub prompt: String,
}

/// Outcome of resolving something that may depend on a player choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<T> {
    Resolved(T),
    /// Some picks were made and apply, but the choice still wants more.
    Partial(T, PendingChoice),
    /// Left out of this pass; never an error.
    Deferred(PendingChoice),
}

impl<T> Resolution<T> {
    /// True only when nothing is left to answer.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The usable part of the resolution, complete or not.
    pub fn resolved(self) -> Option<T> {
        match self {
            Self::Resolved(value) | Self::Partial(value, _) => Some(value),
            Self::Deferred(_) => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingChoice> {
        match self {
            Self::Resolved(_) => None,
            Self::Partial(_, pending) | Self::Deferred(pending) => Some(pending),
        }
    }
}

/// Maps choice-bearing content to concrete effects using recorded answers.
#[derive(Clone, Copy, Debug)]
pub struct ChoiceResolver<'b> {
    choices: &'b BTreeMap<String, Vec<String>>,
}

impl<'b> ChoiceResolver<'b> {
    pub fn new(choices: &'b BTreeMap<String, Vec<String>>) -> Self {
        Self { choices }
    }

    fn recorded(&self, key: &ChoiceKey) -> &'b [String] {
        self.choices
            .get(&key.to_string())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolves an effect whose target is up to the player.
    ///
    /// Effects without a `user_choice` pass through unchanged, so resolving an
    /// already resolved effect is a no-op.
    pub fn resolve_effect(&self, source_id: &str, effect: &Effect) -> Resolution<Effect> {
        let Some(choice) = &effect.user_choice else {
            return Resolution::Resolved(effect.clone());
        };

        let key = ChoiceKey::for_effect(source_id, choice);
        let pending = || PendingChoice {
            key: key.clone(),
            prompt: choice.prompt.clone(),
        };

        match self.recorded(&key).first() {
            None => {
                tracing::debug!(choice = %key, "choice not made, deferring effect");
                Resolution::Deferred(pending())
            }
            Some(value) if !choice.allows(value) => {
                tracing::warn!(
                    choice = %key,
                    value = %value,
                    "recorded value is not one of the offered options, deferring effect"
                );
                Resolution::Deferred(pending())
            }
            Some(value) => Resolution::Resolved(effect.resolved_to(value.as_str())),
        }
    }

    /// Returns the options picked for a feature choice menu.
    ///
    /// At most `count` options are taken; extra and unknown values are
    /// ignored with a warning. Nothing usable recorded defers the menu, and
    /// fewer than `count` usable picks resolve partially.
    pub fn resolve_feature_choice<'c>(
        &self,
        source_id: &str,
        choice: &'c FeatureChoice,
    ) -> Resolution<Vec<&'c ChoiceOption>> {
        let key = ChoiceKey::for_feature(source_id, choice);
        let recorded = self.recorded(&key);

        if recorded.len() > choice.count {
            tracing::warn!(
                choice = %key,
                recorded = recorded.len(),
                allowed = choice.count,
                "more values recorded than the choice allows, ignoring the rest"
            );
        }

        let mut picked: Vec<&'c ChoiceOption> = Vec::with_capacity(choice.count);
        for value in recorded {
            if picked.len() == choice.count {
                break;
            }
            match choice.option(value) {
                Some(option) if picked.iter().any(|p| p.value == option.value) => {
                    tracing::warn!(choice = %key, value = %value, "duplicate option ignored");
                }
                Some(option) => picked.push(option),
                None => {
                    tracing::warn!(choice = %key, value = %value, "unknown option ignored");
                }
            }
        }

        if picked.is_empty() {
            tracing::debug!(choice = %key, "feature choice not made, deferring");
            return Resolution::Deferred(PendingChoice {
                key,
                prompt: choice.prompt.clone(),
            });
        }
        if picked.len() < choice.count {
            tracing::debug!(
                choice = %key,
                picked = picked.len(),
                wanted = choice.count,
                "feature choice partially made"
            );
            let prompt = format!(
                "{} ({} of {} chosen)",
                choice.prompt,
                picked.len(),
                choice.count
            );
            return Resolution::Partial(picked, PendingChoice { key, prompt });
        }
        Resolution::Resolved(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectKind;

    fn attribute_effect() -> Effect {
        Effect::new(EffectKind::ModifyAttribute, "", 1).with_user_choice(
            UserChoice::new("attribute", "Choose an attribute")
                .with_options(["might", "agility", "charisma", "intelligence"]),
        )
    }

    fn recorded(key: &ChoiceKey, values: &[&str]) -> BTreeMap<String, Vec<String>> {
        let mut choices = BTreeMap::new();
        choices.insert(
            key.to_string(),
            values.iter().map(|value| value.to_string()).collect(),
        );
        choices
    }

    #[test]
    fn key_round_trips_through_display() {
        let key = ChoiceKey::new("ancestry::human_resolve", "attribute");
        assert_eq!(key.to_string(), "ancestry::human_resolve::attribute");
        assert_eq!(key.to_string().parse::<ChoiceKey>(), Ok(key));
        assert!("no-separator".parse::<ChoiceKey>().is_err());
        assert!("trailing::".parse::<ChoiceKey>().is_err());
    }

    #[test]
    fn resolves_effect_with_recorded_value() {
        let effect = attribute_effect();
        let key = ChoiceKey::for_effect("attribute_increase", effect.user_choice.as_ref().unwrap());
        let choices = recorded(&key, &["might"]);
        let resolver = ChoiceResolver::new(&choices);

        let resolved = resolver
            .resolve_effect("attribute_increase", &effect)
            .resolved()
            .unwrap();
        assert_eq!(resolved.target, "might");
        assert!(resolved.user_choice.is_none());
    }

    #[test]
    fn resolution_is_idempotent() {
        let effect = attribute_effect();
        let key = ChoiceKey::for_effect("attribute_increase", effect.user_choice.as_ref().unwrap());
        let choices = recorded(&key, &["agility"]);
        let resolver = ChoiceResolver::new(&choices);

        let once = resolver
            .resolve_effect("attribute_increase", &effect)
            .resolved()
            .unwrap();
        let twice = resolver
            .resolve_effect("attribute_increase", &once)
            .resolved()
            .unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_or_invalid_answers_defer() {
        let effect = attribute_effect();
        let empty = BTreeMap::new();
        let deferred = ChoiceResolver::new(&empty).resolve_effect("attribute_increase", &effect);
        match deferred {
            Resolution::Deferred(pending) => {
                assert_eq!(pending.key.to_string(), "attribute_increase::attribute");
                assert_eq!(pending.prompt, "Choose an attribute");
            }
            other => panic!("expected deferral, got {other:?}"),
        }

        let key = ChoiceKey::new("attribute_increase", "attribute");
        let choices = recorded(&key, &["wisdom"]);
        assert!(
            !ChoiceResolver::new(&choices)
                .resolve_effect("attribute_increase", &effect)
                .is_resolved()
        );
    }

    #[test]
    fn feature_choice_respects_count_and_skips_unknown() {
        let menu = FeatureChoice::new("path", "Pick a path", 1)
            .with_option(ChoiceOption::new("fury", "Fury", Vec::new()))
            .with_option(ChoiceOption::new("calm", "Calm", Vec::new()));
        let key = ChoiceKey::for_feature("rage", &menu);

        let choices = recorded(&key, &["bogus", "calm", "fury"]);
        let picked = ChoiceResolver::new(&choices)
            .resolve_feature_choice("rage", &menu)
            .resolved()
            .unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].value, "calm");

        let only_bogus = recorded(&key, &["bogus"]);
        assert!(
            !ChoiceResolver::new(&only_bogus)
                .resolve_feature_choice("rage", &menu)
                .is_resolved()
        );
    }

    #[test]
    fn short_feature_choice_applies_picks_and_stays_pending() {
        let menu = FeatureChoice::new("pick", "Pick two", 2)
            .with_option(ChoiceOption::new("a", "A", Vec::new()))
            .with_option(ChoiceOption::new("b", "B", Vec::new()));
        let key = ChoiceKey::for_feature("training", &menu);
        let choices = recorded(&key, &["a"]);

        let resolution = ChoiceResolver::new(&choices).resolve_feature_choice("training", &menu);
        assert!(!resolution.is_resolved());
        let pending = resolution.pending().cloned().unwrap();
        assert_eq!(pending.key, key);
        assert_eq!(pending.prompt, "Pick two (1 of 2 chosen)");

        let picked = resolution.resolved().unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].value, "a");

        let both = recorded(&key, &["a", "b"]);
        assert!(
            ChoiceResolver::new(&both)
                .resolve_feature_choice("training", &menu)
                .is_resolved()
        );
    }
}
