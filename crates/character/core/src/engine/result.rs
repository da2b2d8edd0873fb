//! Output of one processing pass.

use super::{StatContribution, StatModifiers};
use crate::diagnostics::UnhandledEffect;
use crate::effect::EffectSource;

/// Everything the processing engine folded out of an effect list.
///
/// Built fresh on every pass; never merged with an earlier result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessingResult {
    pub stat_modifiers: StatModifiers,
    /// The ordered deltas that sum to `stat_modifiers`.
    pub contributions: Vec<StatContribution>,
    pub conditional_modifiers: Vec<ConditionalModifier>,
    pub granted_abilities: Vec<GrantedAbility>,
    /// Deduplicated, first-seen order.
    pub combat_training: Vec<String>,
    pub resistances: Vec<DamageTrait>,
    pub vulnerabilities: Vec<DamageTrait>,
    pub advantages: Vec<Advantage>,
    pub senses: Vec<Sense>,
    pub movements: Vec<Movement>,
    pub spells: Vec<GrantedSpell>,
    pub mastery_grants: Vec<MasteryGrant>,
    pub granted_choices: Vec<GrantedChoice>,
    pub unhandled: Vec<UnhandledEffect>,
}

impl ProcessingResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contributions feeding `stat`, in application order.
    pub fn contributions_to(
        &self,
        stat: super::StatKind,
    ) -> impl Iterator<Item = &StatContribution> + '_ {
        self.contributions
            .iter()
            .filter(move |contribution| contribution.stat == stat)
    }
}

/// A numeric delta that only applies in some situations.
///
/// Never folded into [`StatModifiers`]; surfaced for display instead.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalModifier {
    pub target: String,
    pub amount: i32,
    pub condition: String,
    pub source: EffectSource,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrantedAbility {
    pub name: String,
    pub condition: Option<String>,
    pub source: EffectSource,
}

/// How a resistance or vulnerability scales damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum DamageModifier {
    Half,
    Double,
    Immunity,
    /// Damage reduced (resistance) or increased (vulnerability) by a flat amount.
    Flat(i32),
}

/// A resistance or vulnerability to a damage type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageTrait {
    pub damage_type: String,
    pub modifier: DamageModifier,
    pub condition: Option<String>,
    pub source: EffectSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum RollKind {
    Save,
    Check,
}

/// Advantage on a class of rolls.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Advantage {
    pub roll: RollKind,
    pub target: String,
    pub condition: Option<String>,
    pub source: EffectSource,
}

/// A special sense such as darkvision, with its range in spaces if any.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sense {
    pub kind: String,
    pub range: Option<i32>,
    pub source: EffectSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum MovementSpeed {
    EqualToSpeed,
    HalfSpeed,
    Fixed(i32),
}

/// An additional movement mode such as climb or swim.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movement {
    pub kind: String,
    pub speed: MovementSpeed,
    pub source: EffectSource,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrantedSpell {
    pub name: String,
    pub cantrip: bool,
    pub source: EffectSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum MasteryDomain {
    Skill,
    Trade,
}

/// Expertise in one skill or trade.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MasteryGrant {
    pub domain: MasteryDomain,
    pub target: String,
    pub cap_increase: i32,
    pub level_increase: i32,
    pub source: EffectSource,
}

/// An extra pick the player gets (e.g. one additional skill).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrantedChoice {
    pub target: String,
    pub count: i32,
    pub source: EffectSource,
}
