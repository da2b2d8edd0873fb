//! Spent points and pool checks for skills, trades and languages.

use super::{IssueCode, ValidationIssue};
use crate::build::CharacterBuildData;
use crate::config::RulesConfig;
use crate::env::TraitDefinition;
use crate::stats::{PointPools, attribute_points_spent};

/// Points the build spends in every pool.
pub(super) fn spent(
    build: &CharacterBuildData,
    active_traits: &[&TraitDefinition],
    config: &RulesConfig,
) -> PointPools {
    PointPools {
        skill: build.skills.values().map(|level| level.point_cost()).sum(),
        trade: build.trades.values().map(|level| level.point_cost()).sum(),
        language: build
            .languages
            .values()
            .map(|fluency| fluency.point_cost())
            .sum(),
        ancestry: active_traits
            .iter()
            .fold(0, |total: i32, definition| total.saturating_add(definition.cost)),
        attribute: attribute_points_spent(build, config),
    }
}

pub(super) fn check(available: &PointPools, spent: &PointPools, issues: &mut Vec<ValidationIssue>) {
    let pools = [
        ("Skill", available.skill, spent.skill, IssueCode::SkillPointsExceeded),
        ("Trade", available.trade, spent.trade, IssueCode::TradePointsExceeded),
        (
            "Language",
            available.language,
            spent.language,
            IssueCode::LanguagePointsExceeded,
        ),
    ];

    for (label, available, spent, code) in pools {
        if available < 0 {
            issues.push(ValidationIssue::new(
                code,
                format!("{label} points exceeded: conversions leave {available} available"),
            ));
        } else if spent > available {
            issues.push(ValidationIssue::new(
                code,
                format!("{label} points exceeded: spent {spent} of {available}"),
            ));
        }
    }
}
