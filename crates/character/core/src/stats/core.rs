//! Attributes - Layer 1 of the stat pipeline.
//!
//! Final attribute = base score + effect delta. Every other formula reads the
//! final attributes, the Prime Modifier, and Combat Mastery derived here.

use super::StatLayer;
use crate::build::{Attribute, AttributeScores};
use crate::engine::{StatModifiers, saturate};

/// Final attribute scores after effect modifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinalAttributes(pub AttributeScores);

impl FinalAttributes {
    #[inline]
    pub fn get(&self, attribute: Attribute) -> i32 {
        self.0.get(attribute)
    }

    pub fn scores(&self) -> AttributeScores {
        self.0
    }
}

impl StatLayer for FinalAttributes {
    type Base = AttributeScores;
    type Bonuses = StatModifiers;
    type Final = Self;

    fn compute(base: &Self::Base, bonuses: &Self::Bonuses) -> Self::Final {
        let mut scores = *base;
        for attribute in Attribute::all() {
            let total = i64::from(base.get(attribute)) + bonuses.total(attribute.into());
            scores.set(attribute, saturate(total));
        }
        Self(scores)
    }
}

/// The highest final attribute and which attribute supplied it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimeModifier {
    pub attribute: Attribute,
    pub value: i32,
}

impl PrimeModifier {
    /// Picks the highest attribute.
    ///
    /// Ties go to `preferred` when it is among the tied attributes, otherwise
    /// to the first in canonical order (Might, Agility, Charisma, Intelligence).
    pub fn select(attributes: &FinalAttributes, preferred: Option<Attribute>) -> Self {
        let value = Attribute::all()
            .into_iter()
            .map(|attribute| attributes.get(attribute))
            .max()
            .unwrap_or_default();

        let tied = |attribute: &Attribute| attributes.get(*attribute) == value;
        let attribute = preferred
            .filter(tied)
            .or_else(|| Attribute::all().into_iter().find(tied))
            .unwrap_or(Attribute::Might);

        Self { attribute, value }
    }
}

/// Combat Mastery: half the level, rounded up.
#[inline]
pub const fn combat_mastery(level: u32) -> i32 {
    level.div_ceil(2) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StatKind;

    #[test]
    fn final_attributes_add_modifiers() {
        let base = AttributeScores::new(3, 1, 0, -1);
        let bonuses = StatModifiers::new()
            .with(StatKind::Might, 1)
            .with(StatKind::Intelligence, 2);
        let final_attributes = FinalAttributes::compute(&base, &bonuses);

        assert_eq!(final_attributes.scores(), AttributeScores::new(4, 1, 0, 1));
    }

    #[test]
    fn prime_prefers_choice_only_among_ties() {
        let attributes = FinalAttributes(AttributeScores::new(3, 3, 1, 0));

        let canonical = PrimeModifier::select(&attributes, None);
        assert_eq!(canonical.attribute, Attribute::Might);
        assert_eq!(canonical.value, 3);

        let chosen = PrimeModifier::select(&attributes, Some(Attribute::Agility));
        assert_eq!(chosen.attribute, Attribute::Agility);

        let not_tied = PrimeModifier::select(&attributes, Some(Attribute::Charisma));
        assert_eq!(not_tied.attribute, Attribute::Might);
    }

    #[test]
    fn combat_mastery_rounds_up() {
        assert_eq!(combat_mastery(1), 1);
        assert_eq!(combat_mastery(2), 1);
        assert_eq!(combat_mastery(3), 2);
        assert_eq!(combat_mastery(20), 10);
    }
}
