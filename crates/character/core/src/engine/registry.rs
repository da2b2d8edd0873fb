//! Closed dispatch table from effect kind to handler.

use std::collections::BTreeMap;

use super::{ProcessingResult, handlers};
use crate::effect::{AttributedEffect, EffectKind};

/// What a handler did with an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Folded into the flat totals or a grant list.
    Applied,
    /// Recorded as situational only.
    Conditional,
    /// Malformed for this kind; skipped.
    Rejected(String),
}

impl HandlerOutcome {
    pub(crate) fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}

/// Applies one effect to the accumulating result.
pub type EffectHandler = fn(&AttributedEffect, &mut ProcessingResult) -> HandlerOutcome;

/// Maps each [`EffectKind`] to the function that applies it.
#[derive(Clone, Debug, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<EffectKind, EffectHandler>,
}

impl HandlerRegistry {
    /// An empty registry. Every effect processed through it is unhandled.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry covering every known effect kind.
    pub fn standard() -> Self {
        use EffectKind::*;

        let mut registry = Self::empty();
        registry.register(ModifyAttribute, handlers::modify_attribute);
        registry.register(ModifyStat, handlers::modify_stat);
        registry.register(GrantAbility, handlers::grant_ability);
        registry.register(GrantResistance, handlers::grant_resistance);
        registry.register(GrantVulnerability, handlers::grant_vulnerability);
        registry.register(GrantAdvantageOnSave, handlers::grant_advantage_on_save);
        registry.register(GrantAdvantageOnCheck, handlers::grant_advantage_on_check);
        registry.register(GrantCombatTraining, handlers::grant_combat_training);
        registry.register(GrantMovement, handlers::grant_movement);
        registry.register(GrantSense, handlers::grant_sense);
        registry.register(GrantChoice, handlers::grant_choice);
        registry.register(GrantSkillExpertise, handlers::grant_skill_expertise);
        registry.register(GrantTradeExpertise, handlers::grant_trade_expertise);
        registry.register(GrantSpell, handlers::grant_spell);
        registry.register(GrantCantrip, handlers::grant_cantrip);
        registry.register(GrantManeuvers, handlers::grant_maneuvers);
        registry.register(GrantTechniques, handlers::grant_techniques);
        registry
    }

    /// Installs `handler` for `kind`, returning the one it replaced.
    pub fn register(&mut self, kind: EffectKind, handler: EffectHandler) -> Option<EffectHandler> {
        self.handlers.insert(kind, handler)
    }

    pub fn handler(&self, kind: &EffectKind) -> Option<EffectHandler> {
        self.handlers.get(kind).copied()
    }

    pub fn handles(&self, kind: &EffectKind) -> bool {
        self.handlers.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_known_kinds() {
        let registry = HandlerRegistry::standard();
        assert_eq!(registry.len(), EffectKind::KNOWN.len());
        for kind in EffectKind::KNOWN {
            assert!(registry.handles(&kind), "no handler for {kind}");
        }
        assert!(!registry.handles(&EffectKind::Unrecognized("grant-wings".into())));
    }
}
