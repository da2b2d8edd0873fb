//! Data-driven rule content and loaders.
//!
//! This crate houses the bundled rule data and the loaders that read it:
//! - Ancestry traits (RON)
//! - Ancestries (RON)
//! - Classes and their level features (RON)
//! - Talents (RON)
//! - Rule constants and budgets (TOML)
//!
//! Everything is loaded into [`character_core::RuleTables`] and
//! [`character_core::RulesConfig`]; the engine itself never touches the
//! filesystem. [`lint`] checks cross references the engine would otherwise
//! only report at calculation time.

pub mod lint;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use lint::{ContentIssue, ContentIssueKind, lint};

#[cfg(feature = "loaders")]
pub use loaders::{
    AncestryLoader, ClassLoader, ConfigLoader, ContentFactory, LoadResult, TalentLoader,
    TraitLoader, bundled_data_dir,
};
