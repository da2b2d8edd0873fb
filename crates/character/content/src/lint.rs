//! Integrity checks over loaded rule content.
//!
//! The engine tolerates broken references (it skips them and reports a
//! diagnostic per calculation). Linting catches the same problems once, when
//! content is loaded.

use std::collections::BTreeSet;
use std::fmt;

use character_core::{Effect, FeatureChoice, RuleTables, RulesConfig, TraitOracle};

/// Category of a content problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentIssueKind {
    /// An ancestry lists a trait id no trait definition has.
    DanglingTraitId,
    /// A trait is both a default and an expanded trait of one ancestry.
    TraitListedTwice,
    /// An effect kind no handler knows.
    UnrecognizedEffect,
    /// A user choice whose option list is present but empty.
    EmptyUserChoice,
    /// A feature choice that cannot be completed with its options.
    UnsatisfiableChoice,
    /// A feature choice asking for zero picks, which can never be answered.
    ZeroCountChoice,
    /// Two options of one feature choice share a value.
    DuplicateOption,
    /// A class feature unlocking outside 1..=MAX_LEVEL.
    FeatureLevelOutOfRange,
}

impl fmt::Display for ContentIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DanglingTraitId => "dangling trait id",
            Self::TraitListedTwice => "trait listed twice",
            Self::UnrecognizedEffect => "unrecognized effect",
            Self::EmptyUserChoice => "empty user choice",
            Self::UnsatisfiableChoice => "unsatisfiable choice",
            Self::ZeroCountChoice => "zero-count choice",
            Self::DuplicateOption => "duplicate option",
            Self::FeatureLevelOutOfRange => "feature level out of range",
        };
        f.write_str(label)
    }
}

/// One problem found in the content, located by `owner` (e.g. `ancestry human`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContentIssue {
    pub kind: ContentIssueKind,
    pub owner: String,
    pub detail: String,
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.owner, self.kind, self.detail)
    }
}

#[derive(Default)]
struct Linter {
    issues: Vec<ContentIssue>,
}

impl Linter {
    fn push(&mut self, kind: ContentIssueKind, owner: &str, detail: String) {
        self.issues.push(ContentIssue {
            kind,
            owner: owner.to_owned(),
            detail,
        });
    }

    fn effects(&mut self, owner: &str, effects: &[Effect]) {
        for effect in effects {
            if !effect.kind.is_recognized() {
                self.push(
                    ContentIssueKind::UnrecognizedEffect,
                    owner,
                    format!("effect type '{}'", effect.kind),
                );
            }
            let empty_choice = effect
                .user_choice
                .as_ref()
                .filter(|choice| choice.options.as_ref().is_some_and(Vec::is_empty));
            if let Some(choice) = empty_choice {
                self.push(
                    ContentIssueKind::EmptyUserChoice,
                    owner,
                    format!("choice '{}' offers no options", choice.id),
                );
            }
        }
    }

    fn choices(&mut self, owner: &str, choices: &[FeatureChoice]) {
        for choice in choices {
            if choice.count == 0 {
                self.push(
                    ContentIssueKind::ZeroCountChoice,
                    owner,
                    format!("choice '{}' asks for 0 picks", choice.id),
                );
            } else if choice.options.len() < choice.count {
                self.push(
                    ContentIssueKind::UnsatisfiableChoice,
                    owner,
                    format!(
                        "choice '{}' needs {} picks but offers {}",
                        choice.id,
                        choice.count,
                        choice.options.len()
                    ),
                );
            }

            let mut seen = BTreeSet::new();
            for option in &choice.options {
                if !seen.insert(option.value.as_str()) {
                    self.push(
                        ContentIssueKind::DuplicateOption,
                        owner,
                        format!("choice '{}' repeats option '{}'", choice.id, option.value),
                    );
                }
                self.effects(&format!("{owner} option {}", option.value), &option.effects);
            }
        }
    }
}

/// Every integrity problem in `tables`, sorted for stable output.
pub fn lint(tables: &RuleTables) -> Vec<ContentIssue> {
    let mut linter = Linter::default();

    for ancestry in tables.ancestries() {
        let owner = format!("ancestry {}", ancestry.id);
        for id in ancestry
            .default_trait_ids
            .iter()
            .chain(&ancestry.expanded_trait_ids)
        {
            if tables.trait_definition(id).is_none() {
                linter.push(
                    ContentIssueKind::DanglingTraitId,
                    &owner,
                    format!("unknown trait '{id}'"),
                );
            }
        }
        for id in &ancestry.default_trait_ids {
            if ancestry.expanded_trait_ids.contains(id) {
                linter.push(
                    ContentIssueKind::TraitListedTwice,
                    &owner,
                    format!("'{id}' is both default and expanded"),
                );
            }
        }
    }

    for definition in tables.traits() {
        let owner = format!("trait {}", definition.id);
        linter.effects(&owner, &definition.effects);
        linter.choices(&owner, &definition.choices);
    }

    for class in tables.classes() {
        for feature in &class.features {
            let owner = format!("class {} feature {}", class.id, feature.id);
            if feature.level == 0 || feature.level > RulesConfig::MAX_LEVEL {
                linter.push(
                    ContentIssueKind::FeatureLevelOutOfRange,
                    &owner,
                    format!("unlocks at level {}", feature.level),
                );
            }
            linter.effects(&owner, &feature.effects);
            for benefit in &feature.benefits {
                linter.effects(&format!("{owner} benefit {}", benefit.name), &benefit.effects);
            }
            linter.choices(&owner, &feature.choices);
        }
    }

    for talent in tables.talents() {
        let owner = format!("talent {}", talent.id);
        linter.effects(&owner, &talent.effects);
        linter.choices(&owner, &talent.choices);
    }

    let mut issues = linter.issues;
    issues.sort();
    for issue in &issues {
        tracing::warn!(%issue, "content lint");
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use character_core::{
        AncestryDefinition, ChoiceOption, ClassBaseValues, ClassDefinition, ClassFeature,
        EffectKind, TraitDefinition,
    };

    #[test]
    fn reports_dangling_and_duplicate_trait_ids() {
        let tables = RuleTables::new()
            .with_trait(TraitDefinition::new("tough", "Tough", 1))
            .with_ancestry(
                AncestryDefinition::new("dwarf", "Dwarf")
                    .with_default_traits(["tough", "stonecunning"])
                    .with_expanded_traits(["tough"]),
            );

        let issues = lint(&tables);
        let kinds: Vec<_> = issues.iter().map(|issue| issue.kind).collect();

        assert_eq!(
            kinds,
            vec![
                ContentIssueKind::DanglingTraitId,
                ContentIssueKind::TraitListedTwice
            ]
        );
        assert!(issues[0].detail.contains("stonecunning"));
    }

    #[test]
    fn reports_choice_and_feature_problems() {
        let feature = ClassFeature::new("path", "Path", 21).with_choice(
            FeatureChoice::new("style", "Pick two styles", 2)
                .with_option(ChoiceOption::new("a", "A", vec![]))
                .with_option(ChoiceOption::new(
                    "a",
                    "A again",
                    vec![Effect::new(EffectKind::parse("teleport"), "", true)],
                )),
        );
        let tables = RuleTables::new().with_class(
            ClassDefinition::new("x", "X", ClassBaseValues::default()).with_feature(feature),
        );

        let kinds: BTreeSet<_> = lint(&tables).into_iter().map(|issue| issue.kind).collect();
        assert!(kinds.contains(&ContentIssueKind::FeatureLevelOutOfRange));
        assert!(kinds.contains(&ContentIssueKind::DuplicateOption));
        assert!(kinds.contains(&ContentIssueKind::UnrecognizedEffect));
        assert!(!kinds.contains(&ContentIssueKind::UnsatisfiableChoice));
    }

    #[test]
    fn reports_zero_count_choice() {
        let mut choice = FeatureChoice::new("focus", "Pick a focus", 1)
            .with_option(ChoiceOption::new("body", "Body", vec![]));
        // Content files bypass the constructor's clamp.
        choice.count = 0;
        let tables = RuleTables::new().with_talent(
            character_core::TalentDefinition::new("focused", "Focused").with_choice(choice),
        );

        let issues = lint(&tables);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ContentIssueKind::ZeroCountChoice);
        assert_eq!(issues[0].owner, "talent focused");
    }

    #[test]
    fn clean_tables_have_no_issues() {
        assert!(lint(&RuleTables::new()).is_empty());
    }
}
