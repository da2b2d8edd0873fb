//! Non-fatal findings collected during a calculation.
//!
//! Content drift never aborts the pipeline. Each skipped id, deferred choice,
//! or effect the engine could not apply is recorded here and logged.

use crate::aggregate::PendingChoice;
use crate::effect::{EffectKind, EffectSource};

/// Category of a missing rule-content lookup.
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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum ContentKind {
    Ancestry,
    Trait,
    Class,
    Talent,
}

/// An id the build references but the rule tables do not contain.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissingContent {
    pub kind: ContentKind,
    pub id: String,
}

impl MissingContent {
    pub fn new(kind: ContentKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl core::fmt::Display for MissingContent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown {} id '{}'", self.kind, self.id)
    }
}

/// An effect the processing engine skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnhandledEffect {
    pub kind: EffectKind,
    pub target: String,
    pub source: EffectSource,
    pub reason: String,
}

/// Everything a calculation noticed but tolerated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    pub missing_content: Vec<MissingContent>,
    pub pending_choices: Vec<PendingChoice>,
    pub unhandled_effects: Vec<UnhandledEffect>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.missing_content.is_empty()
            && self.pending_choices.is_empty()
            && self.unhandled_effects.is_empty()
    }

    pub fn is_missing(&self, kind: ContentKind, id: &str) -> bool {
        self.missing_content
            .iter()
            .any(|missing| missing.kind == kind && missing.id == id)
    }

    /// Human-readable lines, one per finding.
    pub fn messages(&self) -> Vec<String> {
        let missing = self.missing_content.iter().map(ToString::to_string);
        let pending = self
            .pending_choices
            .iter()
            .map(|pending| format!("choice '{}' has not been made", pending.key));
        let unhandled = self.unhandled_effects.iter().map(|effect| {
            format!(
                "effect '{}' from {} skipped: {}",
                effect.kind, effect.source, effect.reason
            )
        });
        missing.chain(pending).chain(unhandled).collect()
    }
}
