pub mod cmds;
pub mod codegen;
pub mod driver;
pub mod flatten;
pub mod resolve;
pub mod schema;
pub mod synth;
pub mod validate;

pub use driver::{GenerationPass, TypeOutput};
pub use schema::catalog::{CatalogError, TypeCatalog};
