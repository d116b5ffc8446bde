//! Schema File Loading and Import Resolution
//!
//! This crate is the type/property provider of the generator: it loads
//! schema files from disk, follows their imports, and hands back the
//! ordered list of type schemas a generation pass works on. Types reached
//! only through imports are treated as artifacts of an earlier pass.

pub mod error;
pub mod file;
pub mod resolver;

// Re-export commonly used types at the crate root
pub use error::LoadError;
pub use file::{SchemaFile, SchemaMetadata};
pub use resolver::ImportResolver;

// Re-export immutable_types for convenience
pub use immutable_types;
