//! Feature choices offered by traits, class features and talents.

use crate::effect::Effect;

/// A menu the player picks `count` options from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureChoice {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prompt: String,
    /// How many options must be picked.
    #[cfg_attr(feature = "serde", serde(default = "FeatureChoice::default_count"))]
    pub count: usize,
    pub options: Vec<ChoiceOption>,
}

impl FeatureChoice {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>, count: usize) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            count: count.max(1),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: ChoiceOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn option(&self, value: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|option| option.value == value)
    }

    #[cfg(feature = "serde")]
    fn default_count() -> usize {
        1
    }
}

/// One entry of a [`FeatureChoice`] menu.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoiceOption {
    /// Value recorded in the build when this option is picked.
    pub value: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, name: impl Into<String>, effects: Vec<Effect>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
            effects,
        }
    }
}
