//! Talent definitions and oracle interface.

use super::FeatureChoice;
use crate::effect::Effect;

/// Provides talent definitions by id.
pub trait TalentOracle: Send + Sync {
    fn talent(&self, id: &str) -> Option<&TalentDefinition>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TalentDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub choices: Vec<FeatureChoice>,
}

impl TalentDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effects: Vec::new(),
            choices: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_choice(mut self, choice: FeatureChoice) -> Self {
        self.choices.push(choice);
        self
    }
}
