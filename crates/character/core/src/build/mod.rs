//! Character build snapshot - the engine's sole input.
//!
//! [`CharacterBuildData`] is owned by the surrounding application and mutated
//! only between invocations. The engine borrows it read-only for the duration
//! of one calculation and never retains it.

mod attributes;
mod mastery;

pub use attributes::{Attribute, AttributeScores};
pub use mastery::{LanguageFluency, MasteryLevel};

use std::collections::BTreeMap;

use crate::aggregate::ChoiceKey;
use crate::config::RulesConfig;
use crate::error::CalculationError;

/// Everything a player has decided about a character.
///
/// Maps are ordered (`BTreeMap`) so that every traversal is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterBuildData {
    pub name: String,
    pub level: u32,
    /// Base attribute scores assigned by the player.
    pub attributes: AttributeScores,
    pub class_id: String,
    pub ancestry_ids: Vec<String>,
    pub selected_trait_ids: Vec<String>,
    pub selected_talent_ids: Vec<String>,
    /// Recorded answers keyed by [`ChoiceKey`] display form (`source::choice`).
    pub feature_choices: BTreeMap<String, Vec<String>>,
    /// Explicit Prime Modifier tie-break.
    pub prime_attribute_choice: Option<Attribute>,
    pub skills: BTreeMap<String, MasteryLevel>,
    pub trades: BTreeMap<String, MasteryLevel>,
    pub languages: BTreeMap<String, LanguageFluency>,
    pub conversions: PointConversions,
    pub overrides: ManualOverrides,
}

impl CharacterBuildData {
    /// Creates a build with the required identity fields.
    pub fn new(
        name: impl Into<String>,
        class_id: impl Into<String>,
        level: u32,
        attributes: AttributeScores,
    ) -> Self {
        Self {
            name: name.into(),
            class_id: class_id.into(),
            level,
            attributes,
            ..Self::default()
        }
    }

    /// Checks the structural contract the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::MissingClassId`] for a blank class id and
    /// [`CalculationError::InvalidLevel`] for a level outside `1..=MAX_LEVEL`.
    pub fn check_well_formed(&self) -> Result<(), CalculationError> {
        if self.class_id.trim().is_empty() {
            return Err(CalculationError::MissingClassId {
                name: self.name.clone(),
            });
        }
        if self.level == 0 || self.level > RulesConfig::MAX_LEVEL {
            return Err(CalculationError::InvalidLevel {
                level: self.level,
                max: RulesConfig::MAX_LEVEL,
            });
        }
        Ok(())
    }

    /// Recorded values for a choice, if any.
    pub fn recorded_choice(&self, key: &ChoiceKey) -> Option<&[String]> {
        self.feature_choices
            .get(&key.to_string())
            .map(Vec::as_slice)
    }
}

/// Builder-style setters used by tests and tooling.
impl CharacterBuildData {
    pub fn with_ancestry(mut self, ancestry_id: impl Into<String>) -> Self {
        self.ancestry_ids.push(ancestry_id.into());
        self
    }

    pub fn with_trait(mut self, trait_id: impl Into<String>) -> Self {
        self.selected_trait_ids.push(trait_id.into());
        self
    }

    pub fn with_talent(mut self, talent_id: impl Into<String>) -> Self {
        self.selected_talent_ids.push(talent_id.into());
        self
    }

    pub fn with_choice<I, S>(mut self, key: ChoiceKey, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_choices
            .insert(key.to_string(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_prime_choice(mut self, attribute: Attribute) -> Self {
        self.prime_attribute_choice = Some(attribute);
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>, level: MasteryLevel) -> Self {
        self.skills.insert(skill.into(), level);
        self
    }

    pub fn with_trade(mut self, trade: impl Into<String>, level: MasteryLevel) -> Self {
        self.trades.insert(trade.into(), level);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>, fluency: LanguageFluency) -> Self {
        self.languages.insert(language.into(), fluency);
        self
    }

    pub fn with_conversions(mut self, conversions: PointConversions) -> Self {
        self.conversions = conversions;
        self
    }

    pub fn with_overrides(mut self, overrides: ManualOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Point exchanges the player has made between pools.
///
/// Each field counts conversion *units*:
/// - `skill_to_trade`: skill points given up, each yielding trade points
/// - `trade_to_skill`: skill points bought back with trade points
/// - `trade_to_language`: trade points given up, each yielding language points
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PointConversions {
    pub skill_to_trade: u32,
    pub trade_to_skill: u32,
    pub trade_to_language: u32,
}

impl PointConversions {
    pub const fn none() -> Self {
        Self {
            skill_to_trade: 0,
            trade_to_skill: 0,
            trade_to_language: 0,
        }
    }
}

/// Values the player typed in directly on the sheet.
///
/// An override replaces the formula result wholesale; it is never added to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManualOverrides {
    pub pd: Option<i32>,
    pub ad: Option<i32>,
    pub pdr: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_class_id_is_malformed() {
        let build = CharacterBuildData::new("Ragna", "  ", 1, AttributeScores::default());
        assert!(matches!(
            build.check_well_formed(),
            Err(CalculationError::MissingClassId { .. })
        ));
    }

    #[test]
    fn level_must_be_in_range() {
        let zero = CharacterBuildData::new("Ragna", "barbarian", 0, AttributeScores::default());
        assert!(matches!(
            zero.check_well_formed(),
            Err(CalculationError::InvalidLevel { level: 0, .. })
        ));

        let ok = CharacterBuildData::new("Ragna", "barbarian", 20, AttributeScores::default());
        assert!(ok.check_well_formed().is_ok());
    }

    #[test]
    fn recorded_choice_uses_structural_key() {
        let key = ChoiceKey::new("human_attribute_increase", "attribute");
        let build = CharacterBuildData::new("Ragna", "barbarian", 1, AttributeScores::default())
            .with_choice(key.clone(), ["might"]);

        assert_eq!(
            build.recorded_choice(&key),
            Some(["might".to_string()].as_slice())
        );
        assert!(
            build
                .recorded_choice(&ChoiceKey::new("other", "attribute"))
                .is_none()
        );
    }
}
