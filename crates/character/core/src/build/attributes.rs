//! The four core attributes and a score container keyed by them.

/// The four core attributes that define a character.
///
/// Declaration order is the canonical order used for every deterministic
/// tie-break (Prime Modifier selection, breakdown ordering).
/// - **Might**: Physical power, HP, Area Defense
/// - **Agility**: Speed and finesse, SP, Precision Defense, initiative
/// - **Charisma**: Force of personality, grit, Area Defense
/// - **Intelligence**: Learning and magic, MP, skill points, Precision Defense
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
pub enum Attribute {
    Might = 0,
    Agility = 1,
    Charisma = 2,
    Intelligence = 3,
}

impl Attribute {
    /// Total number of attributes.
    pub const COUNT: usize = 4;

    /// Returns all attributes in canonical order.
    pub const fn all() -> [Attribute; Self::COUNT] {
        [
            Attribute::Might,
            Attribute::Agility,
            Attribute::Charisma,
            Attribute::Intelligence,
        ]
    }

    /// Returns the attribute as an array index.
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Display label used in breakdowns.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Might => "Might",
            Self::Agility => "Agility",
            Self::Charisma => "Charisma",
            Self::Intelligence => "Intelligence",
        }
    }
}

/// One score per attribute.
///
/// Used both for the base scores a player assigns and for the final scores
/// after effect modifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeScores {
    pub might: i32,
    pub agility: i32,
    pub charisma: i32,
    pub intelligence: i32,
}

impl AttributeScores {
    pub const fn new(might: i32, agility: i32, charisma: i32, intelligence: i32) -> Self {
        Self {
            might,
            agility,
            charisma,
            intelligence,
        }
    }

    /// All scores set to the same value.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    #[inline]
    pub const fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Might => self.might,
            Attribute::Agility => self.agility,
            Attribute::Charisma => self.charisma,
            Attribute::Intelligence => self.intelligence,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: i32) {
        match attribute {
            Attribute::Might => self.might = value,
            Attribute::Agility => self.agility = value,
            Attribute::Charisma => self.charisma = value,
            Attribute::Intelligence => self.intelligence = value,
        }
    }

    /// Iterates `(attribute, score)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::all()
            .into_iter()
            .map(move |attribute| (attribute, self.get(attribute)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Attribute::from_str("might").unwrap(), Attribute::Might);
        assert_eq!(
            Attribute::from_str("INTELLIGENCE").unwrap(),
            Attribute::Intelligence
        );
        assert!(Attribute::from_str("wisdom").is_err());
    }

    #[test]
    fn iterates_in_canonical_order() {
        let scores = AttributeScores::new(3, 1, 0, -2);
        let collected: Vec<_> = scores.iter().collect();
        assert_eq!(
            collected,
            vec![
                (Attribute::Might, 3),
                (Attribute::Agility, 1),
                (Attribute::Charisma, 0),
                (Attribute::Intelligence, -2),
            ]
        );
    }
}
