//! Declarative effect records emitted by every rule source.
//!
//! An [`Effect`] is plain data: what it does ([`EffectKind`]), what it acts on
//! (`target`), by how much ([`EffectValue`]), when it applies (`condition`),
//! and whether the player still has to pick the target ([`UserChoice`]).
//! Effects are immutable; choice resolution produces a new effect.
mod kinds;
mod source;

pub use kinds::EffectKind;
pub use source::{AttributedEffect, EffectSource, SourceKind};

/// A single declarative rule effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: EffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: EffectValue,
    /// Situational qualifier. Gated effects never enter the flat totals.
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<String>,
    /// Present while the target is still up to the player.
    #[cfg_attr(feature = "serde", serde(default))]
    pub user_choice: Option<UserChoice>,
}

impl Effect {
    pub fn new(kind: EffectKind, target: impl Into<String>, value: impl Into<EffectValue>) -> Self {
        Self {
            kind,
            target: target.into(),
            value: value.into(),
            condition: None,
            user_choice: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_user_choice(mut self, choice: UserChoice) -> Self {
        self.user_choice = Some(choice);
        self
    }

    /// Returns true if the effect only applies in some situations.
    #[inline]
    pub fn is_conditional(&self) -> bool {
        self.condition
            .as_deref()
            .is_some_and(|condition| !condition.trim().is_empty())
    }

    /// Returns true if the player still has to pick the target.
    #[inline]
    pub fn needs_choice(&self) -> bool {
        self.user_choice.is_some()
    }

    /// Copy of this effect with the target fixed and the choice cleared.
    pub fn resolved_to(&self, target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            user_choice: None,
            ..self.clone()
        }
    }
}

/// Payload of an effect.
///
/// Content writes these untagged: `2`, `true`, `"Fire"`, or a map with
/// `cap_increase`/`level_increase` keys for expertise grants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum EffectValue {
    Number(i32),
    Flag(bool),
    Text(String),
    Expertise {
        #[cfg_attr(feature = "serde", serde(default))]
        cap_increase: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        level_increase: i32,
    },
}

impl EffectValue {
    pub fn as_number(&self) -> Option<i32> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Cap and level increase for expertise grants.
    ///
    /// A bare number `n` is shorthand for raising both by `n`.
    pub fn as_expertise(&self) -> Option<(i32, i32)> {
        match self {
            Self::Expertise {
                cap_increase,
                level_increase,
            } => Some((*cap_increase, *level_increase)),
            Self::Number(value) => Some((*value, *value)),
            _ => None,
        }
    }
}

impl Default for EffectValue {
    fn default() -> Self {
        Self::Flag(true)
    }
}

impl From<i32> for EffectValue {
    fn from(value: i32) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for EffectValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for EffectValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for EffectValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Marks an effect whose target the player picks at build time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserChoice {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prompt: String,
    /// Allowed values. `None` accepts anything the player recorded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Option<Vec<String>>,
}

impl UserChoice {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            options: None,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if `value` is an acceptable answer.
    pub fn allows(&self, value: &str) -> bool {
        match &self.options {
            Some(options) => options.iter().any(|option| option == value),
            None => true,
        }
    }
}
