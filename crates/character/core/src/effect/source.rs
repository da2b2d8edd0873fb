//! Provenance attached to every aggregated effect.

use super::Effect;

/// Which kind of rule content an effect came from.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum SourceKind {
    Trait,
    ClassFeature,
    FeatureBenefit,
    ChoiceOption,
    Talent,
}

/// Identifies the rule content that produced an effect.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSource {
    pub kind: SourceKind,
    pub id: String,
    /// Display name used in breakdowns.
    pub name: String,
}

impl EffectSource {
    pub fn new(kind: SourceKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
        }
    }
}

impl core::fmt::Display for EffectSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} '{}'", self.kind, self.id)
    }
}

/// An effect paired with where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributedEffect {
    pub effect: Effect,
    pub source: EffectSource,
}

impl AttributedEffect {
    pub fn new(effect: Effect, source: EffectSource) -> Self {
        Self { effect, source }
    }
}
