//! Closed vocabulary of effect kinds.

use std::str::FromStr;

/// Discriminates what an [`Effect`](super::Effect) does.
///
/// The set is closed: the processing engine dispatches on it through a
/// registry built at compile time. Content authored ahead of the engine still
/// loads, landing in [`EffectKind::Unrecognized`] so the engine can log and
/// skip it instead of failing the load.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum EffectKind {
    ModifyAttribute,
    ModifyStat,
    GrantAbility,
    GrantResistance,
    GrantVulnerability,
    GrantAdvantageOnSave,
    GrantAdvantageOnCheck,
    GrantCombatTraining,
    GrantMovement,
    GrantSense,
    GrantChoice,
    GrantSkillExpertise,
    GrantTradeExpertise,
    GrantSpell,
    GrantCantrip,
    GrantManeuvers,
    GrantTechniques,
    /// Any kind name this engine version does not know.
    #[strum(default)]
    Unrecognized(String),
}

impl EffectKind {
    /// Every kind the engine knows, in declaration order.
    pub const KNOWN: [EffectKind; 17] = [
        EffectKind::ModifyAttribute,
        EffectKind::ModifyStat,
        EffectKind::GrantAbility,
        EffectKind::GrantResistance,
        EffectKind::GrantVulnerability,
        EffectKind::GrantAdvantageOnSave,
        EffectKind::GrantAdvantageOnCheck,
        EffectKind::GrantCombatTraining,
        EffectKind::GrantMovement,
        EffectKind::GrantSense,
        EffectKind::GrantChoice,
        EffectKind::GrantSkillExpertise,
        EffectKind::GrantTradeExpertise,
        EffectKind::GrantSpell,
        EffectKind::GrantCantrip,
        EffectKind::GrantManeuvers,
        EffectKind::GrantTechniques,
    ];

    /// Parses a kind name. Never fails; unknown names become `Unrecognized`.
    pub fn parse(name: &str) -> Self {
        match Self::from_str(name) {
            Ok(kind) => kind,
            Err(_) => Self::Unrecognized(name.to_owned()),
        }
    }

    /// Canonical kebab-case name, as written in rule content.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ModifyAttribute => "modify-attribute",
            Self::ModifyStat => "modify-stat",
            Self::GrantAbility => "grant-ability",
            Self::GrantResistance => "grant-resistance",
            Self::GrantVulnerability => "grant-vulnerability",
            Self::GrantAdvantageOnSave => "grant-advantage-on-save",
            Self::GrantAdvantageOnCheck => "grant-advantage-on-check",
            Self::GrantCombatTraining => "grant-combat-training",
            Self::GrantMovement => "grant-movement",
            Self::GrantSense => "grant-sense",
            Self::GrantChoice => "grant-choice",
            Self::GrantSkillExpertise => "grant-skill-expertise",
            Self::GrantTradeExpertise => "grant-trade-expertise",
            Self::GrantSpell => "grant-spell",
            Self::GrantCantrip => "grant-cantrip",
            Self::GrantManeuvers => "grant-maneuvers",
            Self::GrantTechniques => "grant-techniques",
            Self::Unrecognized(name) => name,
        }
    }

    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl core::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for EffectKind {
    fn from(name: String) -> Self {
        match Self::from_str(&name) {
            Ok(kind) => kind,
            Err(_) => Self::Unrecognized(name),
        }
    }
}

impl From<EffectKind> for String {
    fn from(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Unrecognized(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EffectKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EffectKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(EffectKind::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_round_trip() {
        for kind in EffectKind::KNOWN {
            assert_eq!(EffectKind::parse(kind.as_str()), kind);
            assert!(kind.is_recognized());
        }
    }

    #[test]
    fn unknown_names_are_captured() {
        let kind = EffectKind::parse("grant-flight-of-fancy");
        assert_eq!(
            kind,
            EffectKind::Unrecognized("grant-flight-of-fancy".into())
        );
        assert!(!kind.is_recognized());
        assert_eq!(kind.to_string(), "grant-flight-of-fancy");
    }
}
