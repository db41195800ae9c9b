//! # Roster Registry Crate
//!
//! The validation-and-persistence workflow for student records. `validation`
//! enforces field and uniqueness rules against the store; `workflow` composes
//! it with the store into the list, register, view, update and delete
//! operations that the web layer exposes.

pub mod error;
pub mod validation;
pub mod workflow;

pub use error::RegistryError;
pub use validation::validate;
pub use workflow::Registry;
