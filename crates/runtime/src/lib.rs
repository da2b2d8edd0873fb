//! Application services around the character engine.
//!
//! The engine in `character-core` is a pure function. This crate owns what
//! surrounds it:
//! - [`repository`] persists calculated characters per owner
//! - [`service`] runs calculate and validate, then hands the result to a
//!   repository
//!
//! Nothing here is called by the engine itself.
pub mod repository;
pub mod service;

pub use repository::{
    CharacterKey, CharacterRecord, CharacterRepository, FileCharacterRepository,
    InMemoryCharacterRepository, RepositoryError,
};
pub use service::{CharacterService, ServiceError};
