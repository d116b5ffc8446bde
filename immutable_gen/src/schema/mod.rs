pub mod catalog;

// Re-export from immutable_types so synthesis code has one import root
pub use immutable_types::{
    Accessibility, Declaration, GeneratorOptions, OptionOverrides, Origin, PropertyCategory,
    PropertyDescriptor, Semantics, TypeMarkers, TypeRef, TypeSchema,
};
