//! Traits describing read-only rule content.
//!
//! Oracles expose ancestry traits, ancestries, classes and talents by id. The
//! [`Env`] aggregate bundles them so the pipeline can reach everything it
//! needs without hard coupling to concrete implementations. [`RuleTables`] is
//! the in-memory implementation the content loaders produce.
mod ancestry;
mod choice;
mod class;
mod error;
mod tables;
mod talents;
mod traits;

pub use ancestry::{AncestryDefinition, AncestryOracle};
pub use choice::{ChoiceOption, FeatureChoice};
pub use class::{ClassBaseValues, ClassDefinition, ClassFeature, ClassOracle, FeatureBenefit};
pub use error::OracleError;
pub use tables::RuleTables;
pub use talents::{TalentDefinition, TalentOracle};
pub use traits::{TraitDefinition, TraitOracle};

/// Aggregates the read-only oracles required by the aggregator and calculator.
#[derive(Debug)]
pub struct Env<'a, T, A, C, K>
where
    T: TraitOracle + ?Sized,
    A: AncestryOracle + ?Sized,
    C: ClassOracle + ?Sized,
    K: TalentOracle + ?Sized,
{
    traits: Option<&'a T>,
    ancestries: Option<&'a A>,
    classes: Option<&'a C>,
    talents: Option<&'a K>,
}

pub type RulesEnv<'a> =
    Env<'a, dyn TraitOracle + 'a, dyn AncestryOracle + 'a, dyn ClassOracle + 'a, dyn TalentOracle + 'a>;

impl<'a, T, A, C, K> Env<'a, T, A, C, K>
where
    T: TraitOracle + ?Sized,
    A: AncestryOracle + ?Sized,
    C: ClassOracle + ?Sized,
    K: TalentOracle + ?Sized,
{
    pub fn new(
        traits: Option<&'a T>,
        ancestries: Option<&'a A>,
        classes: Option<&'a C>,
        talents: Option<&'a K>,
    ) -> Self {
        Self {
            traits,
            ancestries,
            classes,
            talents,
        }
    }

    pub fn with_all(traits: &'a T, ancestries: &'a A, classes: &'a C, talents: &'a K) -> Self {
        Self::new(Some(traits), Some(ancestries), Some(classes), Some(talents))
    }

    pub fn empty() -> Self {
        Self {
            traits: None,
            ancestries: None,
            classes: None,
            talents: None,
        }
    }

    /// Returns the TraitOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TraitsNotAvailable` if no trait oracle was provided.
    pub fn traits(&self) -> Result<&'a T, OracleError> {
        self.traits.ok_or(OracleError::TraitsNotAvailable)
    }

    /// Returns the AncestryOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::AncestriesNotAvailable` if no ancestry oracle was provided.
    pub fn ancestries(&self) -> Result<&'a A, OracleError> {
        self.ancestries.ok_or(OracleError::AncestriesNotAvailable)
    }

    /// Returns the ClassOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ClassesNotAvailable` if no class oracle was provided.
    pub fn classes(&self) -> Result<&'a C, OracleError> {
        self.classes.ok_or(OracleError::ClassesNotAvailable)
    }

    /// Returns the TalentOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TalentsNotAvailable` if no talent oracle was provided.
    pub fn talents(&self) -> Result<&'a K, OracleError> {
        self.talents.ok_or(OracleError::TalentsNotAvailable)
    }
}

impl<T, A, C, K> Clone for Env<'_, T, A, C, K>
where
    T: TraitOracle + ?Sized,
    A: AncestryOracle + ?Sized,
    C: ClassOracle + ?Sized,
    K: TalentOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A, C, K> Copy for Env<'_, T, A, C, K>
where
    T: TraitOracle + ?Sized,
    A: AncestryOracle + ?Sized,
    C: ClassOracle + ?Sized,
    K: TalentOracle + ?Sized,
{
}

impl<'a, T, A, C, K> Env<'a, T, A, C, K>
where
    T: TraitOracle + 'a,
    A: AncestryOracle + 'a,
    C: ClassOracle + 'a,
    K: TalentOracle + 'a,
{
    /// Erases the concrete oracle types.
    pub fn into_rules_env(self) -> RulesEnv<'a> {
        Env {
            traits: self.traits.map(|oracle| oracle as &'a dyn TraitOracle),
            ancestries: self.ancestries.map(|oracle| oracle as &'a dyn AncestryOracle),
            classes: self.classes.map(|oracle| oracle as &'a dyn ClassOracle),
            talents: self.talents.map(|oracle| oracle as &'a dyn TalentOracle),
        }
    }
}
