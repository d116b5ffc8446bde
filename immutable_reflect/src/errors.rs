use thiserror::Error;

/// Result alias used across the runtime crate.
pub type ReflectResult<T> = Result<T, ReflectError>;

/// Errors produced by the immutable type runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReflectError {
    /// Type is neither generated in the pass nor known to the catalog.
    #[error("type '{type_name}' is not known")]
    UnknownType { type_name: String },

    /// Type exists but its output carries fatal diagnostics, or it is not generated at all.
    #[error("type '{type_name}' has no usable generated output: {reason}")]
    NotGenerated { type_name: String, reason: String },

    /// Property is not declared on the type or any of its ancestors.
    #[error("type '{type_name}' has no property '{property}'")]
    UnknownProperty { type_name: String, property: String },

    /// A type used as a view is not part of the instance's inheritance chain.
    #[error("type '{type_name}' is not '{view}' and does not derive from it")]
    NotAnAncestor { type_name: String, view: String },

    /// A written value does not fit the property's declared type.
    #[error("property '{property}' of '{type_name}' is declared '{declared}' and cannot hold a {found} value")]
    TypeMismatch {
        type_name: String,
        property: String,
        declared: String,
        found: &'static str,
    },

    /// Construction from a builder was called without one.
    #[error("constructing '{type_name}' requires a builder")]
    MissingBuilder { type_name: String },

    /// A builder was asked to start from an instance of another type.
    #[error("a builder of '{expected}' cannot start from an instance of '{found}'")]
    OriginalMismatch { expected: String, found: String },

    /// Construction was given a builder of another type.
    #[error("constructing '{expected}' requires its own builder, got a builder of '{found}'")]
    BuilderMismatch { expected: String, found: String },
}
