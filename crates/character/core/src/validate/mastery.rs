//! Mastery ceilings and the level-1 Adept rule.

use super::{IssueCode, ValidationIssue};
use crate::build::{CharacterBuildData, MasteryLevel};
use crate::config::RulesConfig;
use crate::stats::MasteryLimits;

pub(super) fn check(
    build: &CharacterBuildData,
    limits: &MasteryLimits,
    config: &RulesConfig,
    issues: &mut Vec<ValidationIssue>,
) {
    for (skill, level) in &build.skills {
        let cap = limits.for_skill(skill);
        if *level > cap {
            issues.push(ValidationIssue::new(
                IssueCode::SkillMasteryAboveCap,
                format!("Skill '{skill}' at {level} exceeds mastery cap {cap}"),
            ));
        }
    }

    for (trade, level) in &build.trades {
        let cap = limits.for_trade(trade, config);
        if *level > cap {
            issues.push(ValidationIssue::new(
                IssueCode::TradeMasteryAboveCap,
                format!("Trade '{trade}' at {level} exceeds mastery cap {cap}"),
            ));
        }
    }

    if build.level == 1 {
        let adept = build
            .skills
            .values()
            .chain(build.trades.values())
            .filter(|level| **level >= MasteryLevel::Adept)
            .count();
        if adept > 1 {
            issues.push(ValidationIssue::new(
                IssueCode::TooManyAdeptAtLevelOne,
                format!("At level 1 only one skill or trade may be Adept, found {adept}"),
            ));
        }
    }
}
