//! Additive stat accumulator.

use crate::build::Attribute;
use crate::effect::EffectSource;

/// Every stat an effect may modify numerically.
///
/// Names follow the camelCase spelling rule content uses for `target`.
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
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[repr(u8)]
pub enum StatKind {
    Might = 0,
    Agility,
    Charisma,
    Intelligence,
    HpMax,
    SpMax,
    MpMax,
    Pd,
    Ad,
    Pdr,
    MoveSpeed,
    JumpDistance,
    DeathThresholdModifier,
    #[strum(to_string = "saveDC")]
    #[cfg_attr(feature = "serde", serde(rename = "saveDC"))]
    SaveDc,
    InitiativeBonus,
    SkillPoints,
    TradePoints,
    LanguagePoints,
    AncestryPoints,
    AttributePoints,
    RestPoints,
    GritPoints,
    ManeuversKnown,
    TechniquesKnown,
    CantripsKnown,
    SpellsKnown,
    SkillMasteryLimit,
    TradeMasteryLimit,
    KnowledgeMasteryLimit,
}

impl StatKind {
    pub const COUNT: usize = 29;

    /// Returns all stat kinds in declaration order.
    pub const fn all() -> [StatKind; Self::COUNT] {
        use StatKind::*;
        [
            Might,
            Agility,
            Charisma,
            Intelligence,
            HpMax,
            SpMax,
            MpMax,
            Pd,
            Ad,
            Pdr,
            MoveSpeed,
            JumpDistance,
            DeathThresholdModifier,
            SaveDc,
            InitiativeBonus,
            SkillPoints,
            TradePoints,
            LanguagePoints,
            AncestryPoints,
            AttributePoints,
            RestPoints,
            GritPoints,
            ManeuversKnown,
            TechniquesKnown,
            CantripsKnown,
            SpellsKnown,
            SkillMasteryLimit,
            TradeMasteryLimit,
            KnowledgeMasteryLimit,
        ]
    }

    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }
}

impl From<Attribute> for StatKind {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Might => Self::Might,
            Attribute::Agility => Self::Agility,
            Attribute::Charisma => Self::Charisma,
            Attribute::Intelligence => Self::Intelligence,
        }
    }
}

/// Clamps a wide intermediate into the `i32` range stats are reported in.
#[inline]
pub fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// One delta per [`StatKind`], starting at zero and only ever summed.
///
/// Deltas accumulate exactly in `i64` and saturate only when read, so any
/// permutation of the same effects produces identical totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifiers {
    values: [i64; StatKind::COUNT],
}

impl StatModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total for `stat`, saturated to `i32`.
    #[inline]
    pub fn get(&self, stat: StatKind) -> i32 {
        saturate(self.total(stat))
    }

    /// Exact total for `stat`.
    #[inline]
    pub fn total(&self, stat: StatKind) -> i64 {
        self.values[stat.as_index()]
    }

    pub fn add(&mut self, stat: StatKind, delta: i32) {
        self.values[stat.as_index()] += i64::from(delta);
    }

    pub fn with(mut self, stat: StatKind, delta: i32) -> Self {
        self.add(stat, delta);
        self
    }

    /// Non-zero entries in declaration order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (StatKind, i32)> + '_ {
        StatKind::all()
            .into_iter()
            .filter(|stat| self.total(*stat) != 0)
            .map(|stat| (stat, self.get(stat)))
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|value| *value == 0)
    }
}

/// A single numeric delta and the content it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatContribution {
    pub stat: StatKind,
    pub source: EffectSource,
    pub amount: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn indices_match_declaration_order() {
        for (index, stat) in StatKind::all().into_iter().enumerate() {
            assert_eq!(stat.as_index(), index);
        }
    }

    #[test]
    fn parses_content_spellings() {
        assert_eq!(StatKind::from_str("hpMax").unwrap(), StatKind::HpMax);
        assert_eq!(StatKind::from_str("saveDC").unwrap(), StatKind::SaveDc);
        assert_eq!(
            StatKind::from_str("deathThresholdModifier").unwrap(),
            StatKind::DeathThresholdModifier
        );
        assert_eq!(StatKind::SaveDc.to_string(), "saveDC");
        assert!(StatKind::from_str("luck").is_err());
    }

    #[test]
    fn sums_are_order_independent() {
        let deltas = [
            (StatKind::HpMax, 2),
            (StatKind::Ad, -1),
            (StatKind::HpMax, 3),
            (StatKind::Ad, 4),
        ];
        let forward = deltas
            .iter()
            .fold(StatModifiers::new(), |acc, (stat, delta)| acc.with(*stat, *delta));
        let backward = deltas
            .iter()
            .rev()
            .fold(StatModifiers::new(), |acc, (stat, delta)| acc.with(*stat, *delta));

        assert_eq!(forward, backward);
        assert_eq!(forward.get(StatKind::HpMax), 5);
        assert_eq!(
            forward.iter_nonzero().collect::<Vec<_>>(),
            vec![(StatKind::HpMax, 5), (StatKind::Ad, 3)]
        );
    }

    #[test]
    fn extreme_deltas_are_order_independent() {
        let deltas = [i32::MAX, 1, -1];
        let forward = deltas
            .iter()
            .fold(StatModifiers::new(), |acc, delta| acc.with(StatKind::HpMax, *delta));
        let shuffled = [-1, i32::MAX, 1]
            .iter()
            .fold(StatModifiers::new(), |acc, delta| acc.with(StatKind::HpMax, *delta));

        assert_eq!(forward, shuffled);
        assert_eq!(forward.get(StatKind::HpMax), i32::MAX);

        let over = StatModifiers::new()
            .with(StatKind::Ad, i32::MAX)
            .with(StatKind::Ad, i32::MAX);
        assert_eq!(over.get(StatKind::Ad), i32::MAX);
        assert_eq!(over.total(StatKind::Ad), 2 * i64::from(i32::MAX));
        assert_eq!(saturate(i64::MIN), i32::MIN);
    }
}
