//! Mastery ladder for skills/trades and language fluency tiers.

/// Proficiency tier of a skill or trade.
///
/// Each tier above Untrained costs one skill (or trade) point.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum MasteryLevel {
    #[default]
    Untrained = 0,
    Novice = 1,
    Adept = 2,
    Expert = 3,
    Master = 4,
    Grandmaster = 5,
}

impl MasteryLevel {
    /// Top of the mastery ladder.
    pub const MAX: MasteryLevel = MasteryLevel::Grandmaster;

    /// Numeric tier (0 = Untrained, 5 = Grandmaster).
    #[inline]
    pub const fn tier(self) -> i32 {
        self as i32
    }

    /// Converts a tier back into a level, clamping to the ladder.
    pub const fn from_tier_saturating(tier: i32) -> Self {
        match tier {
            i32::MIN..=0 => Self::Untrained,
            1 => Self::Novice,
            2 => Self::Adept,
            3 => Self::Expert,
            4 => Self::Master,
            _ => Self::Grandmaster,
        }
    }

    /// Points spent to reach this tier.
    #[inline]
    pub const fn point_cost(self) -> i32 {
        self.tier()
    }
}

/// How well a character speaks a language.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum LanguageFluency {
    /// Basic understanding, one language point.
    #[default]
    Limited,
    /// Full command of the language, two language points.
    Fluent,
}

impl LanguageFluency {
    pub const fn point_cost(self) -> i32 {
        match self {
            Self::Limited => 1,
            Self::Fluent => 2,
        }
    }
}
