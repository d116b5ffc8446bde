//! Immutable Type Schema Definitions
//!
//! This crate contains the data model describing types that take part in
//! immutable generation: their identity, base type, declared properties and
//! the declarative markers driving the generator. It provides pure data
//! structures without any file I/O or synthesis logic.

pub mod options;
pub mod types;

// Re-export commonly used types at the crate root
pub use options::*;
pub use types::*;
