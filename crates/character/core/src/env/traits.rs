//! Ancestry trait definitions and oracle interface.

use super::FeatureChoice;
use crate::effect::Effect;

/// Provides ancestry trait definitions by id.
pub trait TraitOracle: Send + Sync {
    fn trait_definition(&self, id: &str) -> Option<&TraitDefinition>;
}

/// A purchasable ancestry trait.
///
/// `cost` is in ancestry points and may be negative; negative traits refund
/// points up to a configured cap.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitDefinition {
    pub id: String,
    pub name: String,
    pub cost: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub minor: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub choices: Vec<FeatureChoice>,
}

impl TraitDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            minor: false,
            effects: Vec::new(),
            choices: Vec::new(),
        }
    }

    pub fn minor(mut self) -> Self {
        self.minor = true;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_choice(mut self, choice: FeatureChoice) -> Self {
        self.choices.push(choice);
        self
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.cost < 0
    }
}
