//! In-memory rule tables implementing every oracle.

use std::collections::BTreeMap;

use super::{
    AncestryDefinition, AncestryOracle, ClassDefinition, ClassOracle, RulesEnv, TalentDefinition,
    TalentOracle, TraitDefinition, TraitOracle,
};

/// Static rule content keyed by id.
///
/// Built once (usually by the content loaders) and shared read-only across
/// any number of calculations. Inserting an id twice keeps the later entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleTables {
    traits: BTreeMap<String, TraitDefinition>,
    ancestries: BTreeMap<String, AncestryDefinition>,
    classes: BTreeMap<String, ClassDefinition>,
    talents: BTreeMap<String, TalentDefinition>,
}

impl RuleTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_trait(&mut self, definition: TraitDefinition) -> Option<TraitDefinition> {
        self.traits.insert(definition.id.clone(), definition)
    }

    pub fn insert_ancestry(
        &mut self,
        definition: AncestryDefinition,
    ) -> Option<AncestryDefinition> {
        self.ancestries.insert(definition.id.clone(), definition)
    }

    pub fn insert_class(&mut self, definition: ClassDefinition) -> Option<ClassDefinition> {
        self.classes.insert(definition.id.clone(), definition)
    }

    pub fn insert_talent(&mut self, definition: TalentDefinition) -> Option<TalentDefinition> {
        self.talents.insert(definition.id.clone(), definition)
    }

    pub fn with_trait(mut self, definition: TraitDefinition) -> Self {
        self.insert_trait(definition);
        self
    }

    pub fn with_ancestry(mut self, definition: AncestryDefinition) -> Self {
        self.insert_ancestry(definition);
        self
    }

    pub fn with_class(mut self, definition: ClassDefinition) -> Self {
        self.insert_class(definition);
        self
    }

    pub fn with_talent(mut self, definition: TalentDefinition) -> Self {
        self.insert_talent(definition);
        self
    }

    pub fn traits(&self) -> impl Iterator<Item = &TraitDefinition> {
        self.traits.values()
    }

    pub fn ancestries(&self) -> impl Iterator<Item = &AncestryDefinition> {
        self.ancestries.values()
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.values()
    }

    pub fn talents(&self) -> impl Iterator<Item = &TalentDefinition> {
        self.talents.values()
    }

    /// Number of definitions across all tables.
    pub fn len(&self) -> usize {
        self.traits.len() + self.ancestries.len() + self.classes.len() + self.talents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows every table as a fully populated [`RulesEnv`].
    pub fn as_env(&self) -> RulesEnv<'_> {
        RulesEnv::with_all(self, self, self, self)
    }
}

impl TraitOracle for RuleTables {
    fn trait_definition(&self, id: &str) -> Option<&TraitDefinition> {
        self.traits.get(id)
    }
}

impl AncestryOracle for RuleTables {
    fn ancestry(&self, id: &str) -> Option<&AncestryDefinition> {
        self.ancestries.get(id)
    }
}

impl ClassOracle for RuleTables {
    fn class(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.get(id)
    }
}

impl TalentOracle for RuleTables {
    fn talent(&self, id: &str) -> Option<&TalentDefinition> {
        self.talents.get(id)
    }
}
