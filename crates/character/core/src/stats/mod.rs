//! Stat Calculator - layered formulas over processed effects.
//!
//! # Architecture
//!
//! ```text
//! [ Attributes (Layer 1) ]     base + effect delta, Prime, Combat Mastery
//!      ↓
//! [ Derived Stats (Layer 2) ]  HP/SP/MP, defenses, saves, movement, grit
//!      ↓
//! [ Budgets (Layer 3) ]        point pools, known counts, mastery ceilings
//!      ↓
//! [ CalculatedCharacterStats ] with per-stat breakdowns
//! ```
//!
//! ## Principles
//!
//! 1. **Unidirectional Flow**: a layer only reads the layers above it
//! 2. **Explainable**: every derived value carries a breakdown summing to it
//! 3. **Overrides Last**: manual values replace formula results wholesale
//! 4. **Deterministic**: pure functions, ordered maps, no I/O

pub mod breakdown;
pub mod budget;
pub mod core;
pub mod derived;
pub mod snapshot;

pub use breakdown::{BreakdownEntry, StatBreakdown, StatBreakdownBuilder};
pub use budget::{KnownCounts, MasteryLimits, PointPools, attribute_points_spent};
pub use core::{FinalAttributes, PrimeModifier, combat_mastery};
pub use derived::{DerivedStat, FormulaContext};
pub use snapshot::{CalculatedCharacterStats, CalculationInput, StatCalculator};

/// One step of the stat pipeline: a base plus bonuses yields a final value.
pub trait StatLayer {
    type Base;
    type Bonuses;
    type Final;

    fn compute(base: &Self::Base, bonuses: &Self::Bonuses) -> Self::Final;
}
