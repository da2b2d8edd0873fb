//! Repository layer for calculated characters.
//!
//! Repositories handle data that CHANGES as players edit their sheets:
//! - Builds and the stats calculated from them
//! - Validation outcome at save time
//!
//! Rule content (traits, classes, talents) is read through the oracles in
//! `character-core`, never through a repository.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::FileCharacterRepository;
pub use memory::InMemoryCharacterRepository;
pub use traits::CharacterRepository;
pub use types::{CharacterKey, CharacterRecord};
