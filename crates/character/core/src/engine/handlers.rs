//! One handler per effect kind.
//!
//! Handlers never fail. A value of the wrong shape is reported back as
//! [`HandlerOutcome::Rejected`] and the processor records it as unhandled.

use std::str::FromStr;

use super::registry::HandlerOutcome;
use super::{
    Advantage, ConditionalModifier, DamageModifier, DamageTrait, GrantedAbility, GrantedChoice,
    GrantedSpell, MasteryDomain, MasteryGrant, Movement, MovementSpeed, ProcessingResult,
    RollKind, Sense, StatContribution, StatKind,
};
use crate::build::Attribute;
use crate::effect::{AttributedEffect, EffectValue};

pub(super) fn modify_attribute(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    match Attribute::from_str(attributed.effect.target.trim()) {
        Ok(attribute) => apply_numeric(attributed, StatKind::from(attribute), result),
        Err(_) => HandlerOutcome::rejected(format!(
            "unknown attribute '{}'",
            attributed.effect.target
        )),
    }
}

pub(super) fn modify_stat(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    match StatKind::from_str(attributed.effect.target.trim()) {
        Ok(stat) => apply_numeric(attributed, stat, result),
        Err(_) => HandlerOutcome::rejected(format!(
            "unknown stat '{}'",
            attributed.effect.target
        )),
    }
}

/// Sums an unconditional delta, or parks a conditional one.
fn apply_numeric(
    attributed: &AttributedEffect,
    stat: StatKind,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    let effect = &attributed.effect;
    let Some(amount) = effect.value.as_number() else {
        return HandlerOutcome::rejected(format!("expected a number, got {:?}", effect.value));
    };

    if effect.is_conditional() {
        result.conditional_modifiers.push(ConditionalModifier {
            target: stat.to_string(),
            amount,
            condition: effect.condition.clone().unwrap_or_default(),
            source: attributed.source.clone(),
        });
        return HandlerOutcome::Conditional;
    }

    add_stat(attributed, stat, amount, result);
    HandlerOutcome::Applied
}

fn add_stat(attributed: &AttributedEffect, stat: StatKind, amount: i32, result: &mut ProcessingResult) {
    result.stat_modifiers.add(stat, amount);
    result.contributions.push(StatContribution {
        stat,
        source: attributed.source.clone(),
        amount,
    });
}

/// Non-empty target, falling back to a text value.
fn name_of(attributed: &AttributedEffect) -> Option<String> {
    let effect = &attributed.effect;
    let target = effect.target.trim();
    if !target.is_empty() {
        return Some(target.to_owned());
    }
    effect
        .value
        .as_text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

pub(super) fn grant_ability(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    let Some(name) = name_of(attributed) else {
        return HandlerOutcome::rejected("ability has no name");
    };
    result.granted_abilities.push(GrantedAbility {
        name,
        condition: attributed.effect.condition.clone(),
        source: attributed.source.clone(),
    });
    HandlerOutcome::Applied
}

fn damage_modifier(value: &EffectValue, flag_default: DamageModifier) -> Option<DamageModifier> {
    match value {
        EffectValue::Flag(true) => Some(flag_default),
        EffectValue::Number(amount) => Some(DamageModifier::Flat(*amount)),
        EffectValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "half" => Some(DamageModifier::Half),
            "double" => Some(DamageModifier::Double),
            "immune" | "immunity" => Some(DamageModifier::Immunity),
            _ => None,
        },
        _ => None,
    }
}

fn damage_trait(
    attributed: &AttributedEffect,
    flag_default: DamageModifier,
) -> Result<DamageTrait, HandlerOutcome> {
    let effect = &attributed.effect;
    let damage_type = effect.target.trim();
    if damage_type.is_empty() {
        return Err(HandlerOutcome::rejected("damage type missing"));
    }
    let modifier = damage_modifier(&effect.value, flag_default).ok_or_else(|| {
        HandlerOutcome::rejected(format!("unsupported damage modifier {:?}", effect.value))
    })?;
    Ok(DamageTrait {
        damage_type: damage_type.to_owned(),
        modifier,
        condition: effect.condition.clone(),
        source: attributed.source.clone(),
    })
}

pub(super) fn grant_resistance(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    match damage_trait(attributed, DamageModifier::Half) {
        Ok(resistance) => {
            result.resistances.push(resistance);
            HandlerOutcome::Applied
        }
        Err(outcome) => outcome,
    }
}

pub(super) fn grant_vulnerability(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    match damage_trait(attributed, DamageModifier::Double) {
        Ok(vulnerability) => {
            result.vulnerabilities.push(vulnerability);
            HandlerOutcome::Applied
        }
        Err(outcome) => outcome,
    }
}

fn grant_advantage(
    attributed: &AttributedEffect,
    roll: RollKind,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    let target = attributed.effect.target.trim();
    if target.is_empty() {
        return HandlerOutcome::rejected("advantage has no target");
    }
    result.advantages.push(Advantage {
        roll,
        target: target.to_owned(),
        condition: attributed.effect.condition.clone(),
        source: attributed.source.clone(),
    });
    HandlerOutcome::Applied
}

pub(super) fn grant_advantage_on_save(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    grant_advantage(attributed, RollKind::Save, result)
}

pub(super) fn grant_advantage_on_check(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    grant_advantage(attributed, RollKind::Check, result)
}

pub(super) fn grant_combat_training(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    let Some(training) = name_of(attributed) else {
        return HandlerOutcome::rejected("combat training has no target");
    };
    if !result.combat_training.contains(&training) {
        result.combat_training.push(training);
    }
    HandlerOutcome::Applied
}

pub(super) fn grant_movement(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    let effect = &attributed.effect;
    let kind = effect.target.trim();
    if kind.is_empty() {
        return HandlerOutcome::rejected("movement has no kind");
    }
    let speed = match &effect.value {
        EffectValue::Flag(true) => MovementSpeed::EqualToSpeed,
        EffectValue::Number(speed) => MovementSpeed::Fixed(*speed),
        EffectValue::Text(text) => {
            match text.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
                "equaltospeed" | "full" => MovementSpeed::EqualToSpeed,
                "halfspeed" | "half" => MovementSpeed::HalfSpeed,
                _ => {
                    return HandlerOutcome::rejected(format!("unsupported movement speed '{text}'"));
                }
            }
        }
        other => return HandlerOutcome::rejected(format!("unsupported movement speed {other:?}")),
    };
    result.movements.push(Movement {
        kind: kind.to_owned(),
        speed,
        source: attributed.source.clone(),
    });
    HandlerOutcome::Applied
}

pub(super) fn grant_sense(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    let effect = &attributed.effect;
    let kind = effect.target.trim();
    if kind.is_empty() {
        return HandlerOutcome::rejected("sense has no kind");
    }
    result.senses.push(Sense {
        kind: kind.to_owned(),
        range: effect.value.as_number(),
        source: attributed.source.clone(),
    });
    HandlerOutcome::Applied
}

pub(super) fn grant_choice(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    let effect = &attributed.effect;
    let target = effect.target.trim();
    if target.is_empty() {
        return HandlerOutcome::rejected("choice has no target");
    }
    let count = match effect.value {
        EffectValue::Number(count) if count > 0 => count,
        EffectValue::Flag(true) => 1,
        ref other => return HandlerOutcome::rejected(format!("unsupported choice count {other:?}")),
    };
    result.granted_choices.push(GrantedChoice {
        target: target.to_owned(),
        count,
        source: attributed.source.clone(),
    });
    HandlerOutcome::Applied
}

fn grant_expertise(
    attributed: &AttributedEffect,
    domain: MasteryDomain,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    let effect = &attributed.effect;
    let Some((cap_increase, level_increase)) = effect.value.as_expertise() else {
        return HandlerOutcome::rejected(format!("expected expertise value, got {:?}", effect.value));
    };
    let target = effect.target.trim();
    let limit = match domain {
        MasteryDomain::Skill => StatKind::SkillMasteryLimit,
        MasteryDomain::Trade => StatKind::TradeMasteryLimit,
    };

    // Named expertise is applied per target from `mastery_grants`.
    if target.is_empty() {
        add_stat(attributed, limit, cap_increase, result);
    }

    let subject = if target.is_empty() { "any" } else { target };
    let label = match domain {
        MasteryDomain::Skill => "Skill",
        MasteryDomain::Trade => "Trade",
    };
    result.granted_abilities.push(GrantedAbility {
        name: format!(
            "{label} Expertise ({subject}): mastery cap +{cap_increase}, mastery level +{level_increase}"
        ),
        condition: effect.condition.clone(),
        source: attributed.source.clone(),
    });
    result.mastery_grants.push(MasteryGrant {
        domain,
        target: target.to_owned(),
        cap_increase,
        level_increase,
        source: attributed.source.clone(),
    });
    HandlerOutcome::Applied
}

pub(super) fn grant_skill_expertise(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    grant_expertise(attributed, MasteryDomain::Skill, result)
}

pub(super) fn grant_trade_expertise(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    grant_expertise(attributed, MasteryDomain::Trade, result)
}

/// A number grants that many picks; anything else names a specific spell.
fn grant_spell_like(
    attributed: &AttributedEffect,
    cantrip: bool,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    if let Some(count) = attributed.effect.value.as_number() {
        let stat = if cantrip {
            StatKind::CantripsKnown
        } else {
            StatKind::SpellsKnown
        };
        add_stat(attributed, stat, count, result);
        return HandlerOutcome::Applied;
    }
    let Some(name) = name_of(attributed) else {
        return HandlerOutcome::rejected("spell has no name");
    };
    result.spells.push(GrantedSpell {
        name,
        cantrip,
        source: attributed.source.clone(),
    });
    HandlerOutcome::Applied
}

pub(super) fn grant_spell(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    grant_spell_like(attributed, false, result)
}

pub(super) fn grant_cantrip(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    grant_spell_like(attributed, true, result)
}

fn grant_known(
    attributed: &AttributedEffect,
    stat: StatKind,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    match attributed.effect.value.as_number() {
        Some(count) => {
            add_stat(attributed, stat, count, result);
            HandlerOutcome::Applied
        }
        None => HandlerOutcome::rejected(format!(
            "expected a count, got {:?}",
            attributed.effect.value
        )),
    }
}

pub(super) fn grant_maneuvers(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    grant_known(attributed, StatKind::ManeuversKnown, result)
}

pub(super) fn grant_techniques(
    attributed: &AttributedEffect,
    result: &mut ProcessingResult,
) -> HandlerOutcome {
    grant_known(attributed, StatKind::TechniquesKnown, result)
}
