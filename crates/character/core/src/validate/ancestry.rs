//! Ancestry point budget, minor trait limit and negative trait refund cap.
//!
//! The minor-trait limit and the negative-trait cap are checked
//! independently; neither short-circuits the other.

use super::{IssueCode, ValidationIssue};
use crate::config::RulesConfig;
use crate::env::TraitDefinition;
use crate::stats::PointPools;

pub(super) fn check(
    active_traits: &[&TraitDefinition],
    available: &PointPools,
    spent: &PointPools,
    config: &RulesConfig,
    issues: &mut Vec<ValidationIssue>,
) {
    if spent.ancestry > available.ancestry {
        issues.push(ValidationIssue::new(
            IssueCode::AncestryPointsExceeded,
            format!(
                "Ancestry points exceeded: spent {} of {}",
                spent.ancestry, available.ancestry
            ),
        ));
    } else if spent.ancestry < available.ancestry {
        issues.push(ValidationIssue::new(
            IssueCode::AncestryPointsUnspent,
            format!(
                "Ancestry points unspent: spent {} of {}",
                spent.ancestry, available.ancestry
            ),
        ));
    }

    let minor = active_traits.iter().filter(|definition| definition.minor).count();
    if minor > config.max_minor_traits {
        issues.push(ValidationIssue::new(
            IssueCode::TooManyMinorTraits,
            format!(
                "Too many minor traits: {minor} selected, at most {} allowed",
                config.max_minor_traits
            ),
        ));
    }

    let refunded = active_traits
        .iter()
        .filter(|definition| definition.is_negative())
        .fold(0, |total: i32, definition| {
            total.saturating_add(definition.cost.saturating_neg())
        });
    if refunded > config.max_negative_trait_points {
        issues.push(ValidationIssue::new(
            IssueCode::NegativeTraitPointsExceeded,
            format!(
                "Negative trait points exceeded: {refunded} gained, at most {} allowed",
                config.max_negative_trait_points
            ),
        ));
    }
}
