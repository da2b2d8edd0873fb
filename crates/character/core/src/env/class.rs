//! Class definitions and oracle interface.

use super::FeatureChoice;
use crate::effect::Effect;

/// Provides class definitions by id.
pub trait ClassOracle: Send + Sync {
    fn class(&self, id: &str) -> Option<&ClassDefinition>;
}

/// A class: its base numbers and the features it unlocks by level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base: ClassBaseValues,
    #[cfg_attr(feature = "serde", serde(default))]
    pub features: Vec<ClassFeature>,
}

impl ClassDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base: ClassBaseValues) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base,
            features: Vec::new(),
        }
    }

    pub fn with_feature(mut self, feature: ClassFeature) -> Self {
        self.features.push(feature);
        self
    }

    /// Features unlocked at or below `level`, in content order.
    pub fn features_up_to(&self, level: u32) -> impl Iterator<Item = &ClassFeature> {
        self.features
            .iter()
            .filter(move |feature| feature.level <= level)
    }
}

/// Starting numbers a class contributes to the derived stats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassBaseValues {
    pub hp: i32,
    pub sp: i32,
    pub mp: i32,
    pub grit: i32,
    pub move_speed: i32,
    pub save_dc: i32,
    pub death_threshold: i32,
    pub combat_training: Vec<String>,
}

impl ClassBaseValues {
    pub const DEFAULT_GRIT: i32 = 2;
    pub const DEFAULT_MOVE_SPEED: i32 = 5;
    pub const DEFAULT_SAVE_DC: i32 = 8;
    pub const DEFAULT_DEATH_THRESHOLD: i32 = 10;

    pub fn new(hp: i32, sp: i32, mp: i32) -> Self {
        Self {
            hp,
            sp,
            mp,
            ..Self::default()
        }
    }
}

impl Default for ClassBaseValues {
    fn default() -> Self {
        Self {
            hp: 0,
            sp: 0,
            mp: 0,
            grit: Self::DEFAULT_GRIT,
            move_speed: Self::DEFAULT_MOVE_SPEED,
            save_dc: Self::DEFAULT_SAVE_DC,
            death_threshold: Self::DEFAULT_DEATH_THRESHOLD,
            combat_training: Vec::new(),
        }
    }
}

/// A class feature unlocked at `level`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassFeature {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "ClassFeature::default_level"))]
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub benefits: Vec<FeatureBenefit>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub choices: Vec<FeatureChoice>,
}

impl ClassFeature {
    pub fn new(id: impl Into<String>, name: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            effects: Vec::new(),
            benefits: Vec::new(),
            choices: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_benefit(mut self, benefit: FeatureBenefit) -> Self {
        self.benefits.push(benefit);
        self
    }

    pub fn with_choice(mut self, choice: FeatureChoice) -> Self {
        self.choices.push(choice);
        self
    }

    #[cfg(feature = "serde")]
    fn default_level() -> u32 {
        1
    }
}

/// A named bundle of effects inside a feature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureBenefit {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

impl FeatureBenefit {
    pub fn new(name: impl Into<String>, effects: Vec<Effect>) -> Self {
        Self {
            name: name.into(),
            effects,
        }
    }
}
