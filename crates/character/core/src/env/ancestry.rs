//! Ancestry definitions and oracle interface.

/// Provides ancestry definitions by id.
pub trait AncestryOracle: Send + Sync {
    fn ancestry(&self, id: &str) -> Option<&AncestryDefinition>;
}

/// An ancestry and the traits it offers.
///
/// Default traits are granted automatically; expanded traits are only the
/// catalogue a player may buy from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AncestryDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_trait_ids: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub expanded_trait_ids: Vec<String>,
}

impl AncestryDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_trait_ids: Vec::new(),
            expanded_trait_ids: Vec::new(),
        }
    }

    pub fn with_default_traits<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_trait_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_expanded_traits<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expanded_trait_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Returns true if the ancestry lists `trait_id` at all.
    pub fn offers(&self, trait_id: &str) -> bool {
        self.default_trait_ids
            .iter()
            .chain(&self.expanded_trait_ids)
            .any(|id| id == trait_id)
    }
}
