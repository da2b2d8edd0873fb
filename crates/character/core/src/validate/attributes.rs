//! Base attribute bounds and attribute point budget.

use super::{IssueCode, ValidationIssue};
use crate::build::CharacterBuildData;
use crate::config::RulesConfig;
use crate::stats::PointPools;

pub(super) fn check(
    build: &CharacterBuildData,
    available: &PointPools,
    spent: &PointPools,
    config: &RulesConfig,
    issues: &mut Vec<ValidationIssue>,
) {
    let limit = config.attribute_limit(build.level);

    for (attribute, score) in build.attributes.iter() {
        if score < config.attribute_floor {
            issues.push(ValidationIssue::new(
                IssueCode::AttributeBelowFloor,
                format!(
                    "{} {score} is below the minimum of {}",
                    attribute.label(),
                    config.attribute_floor
                ),
            ));
        } else if score > limit {
            issues.push(ValidationIssue::new(
                IssueCode::AttributeAboveLimit,
                format!(
                    "{} {score} is above the level {} limit of {limit}",
                    attribute.label(),
                    build.level
                ),
            ));
        }
    }

    if spent.attribute > available.attribute {
        issues.push(ValidationIssue::new(
            IssueCode::AttributePointsExceeded,
            format!(
                "Attribute points exceeded: spent {} of {}",
                spent.attribute, available.attribute
            ),
        ));
    }
}
