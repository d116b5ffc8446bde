/* Base-type resolution: classifies a type as root or derived and locates the
   builder its own builder must extend. Pure function of the schema and catalog. */

use crate::schema::catalog::TypeCatalog;
use crate::schema::{GeneratorOptions, TypeRef, TypeSchema};
use serde_derive::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BaseTypeInfo {
    /* No declared base, or the universal root object */
    Root,

    /* Base is generated in this pass; its builder is named locally */
    Resolved {
        base_value_type: String,
        base_builder_type: String,
        ancestor_marked_immutable: bool,
    },

    /* Base was generated by an earlier pass and carries a builder marker.
       Only the base reference is kept; the emitter finds the builder from it. */
    External { base_type: String },

    /* Base is neither generated here nor marked: nothing to extend */
    Unresolved { base_type: String },
}

impl BaseTypeInfo {
    pub fn is_derived(&self) -> bool {
        !matches!(self, BaseTypeInfo::Root)
    }

    pub fn base_value_type_name(&self) -> Option<&str> {
        match self {
            BaseTypeInfo::Resolved {
                base_value_type, ..
            } => Some(base_value_type),
            _ => None,
        }
    }

    pub fn base_builder_type_name(&self) -> Option<&str> {
        match self {
            BaseTypeInfo::Resolved {
                base_builder_type, ..
            } => Some(base_builder_type),
            _ => None,
        }
    }

    pub fn ancestor_already_marked_immutable(&self) -> bool {
        match self {
            BaseTypeInfo::Resolved {
                ancestor_marked_immutable,
                ..
            } => *ancestor_marked_immutable,
            BaseTypeInfo::External { .. } => true,
            BaseTypeInfo::Root | BaseTypeInfo::Unresolved { .. } => false,
        }
    }

    /* Derived, yet no builder can be named to extend */
    pub fn is_unresolved(&self) -> bool {
        matches!(self, BaseTypeInfo::Unresolved { .. })
    }
}

pub fn resolve_base(
    schema: &TypeSchema,
    catalog: &TypeCatalog,
    options: &GeneratorOptions,
) -> BaseTypeInfo {
    let Some(base_ref) = schema.declared_base(catalog.root_object()) else {
        return BaseTypeInfo::Root;
    };

    let Some(base) = catalog.resolve_ref(schema, base_ref) else {
        debug!(type_name = %schema.qualified_name(), base = %base_ref, "base type not in catalog");
        return BaseTypeInfo::Unresolved {
            base_type: base_ref.to_string(),
        };
    };

    /* Builder compiled elsewhere (earlier pass / other unit) */
    if base.markers.builder.is_some() {
        debug!(type_name = %schema.qualified_name(), base = %base_ref, "base builder is external");
        return BaseTypeInfo::External {
            base_type: concrete_name(base, base_ref),
        };
    }

    if catalog.is_eligible(&base.qualified_name()) {
        let base_value_type = if base.namespace == schema.namespace {
            with_args(&base.name, &base_ref.generic_args)
        } else {
            concrete_name(base, base_ref)
        };
        let base_builder_type = format!("{}.{}", base_value_type, options.builder_name);
        let ancestor_marked_immutable = std::iter::once(base)
            .chain(catalog.ancestors(base))
            .any(|t| t.markers.immutable);

        debug!(
            type_name = %schema.qualified_name(),
            base_builder = %base_builder_type,
            "base generated in this pass"
        );
        return BaseTypeInfo::Resolved {
            base_value_type,
            base_builder_type,
            ancestor_marked_immutable,
        };
    }

    debug!(type_name = %schema.qualified_name(), base = %base_ref, "base has no builder to extend");
    BaseTypeInfo::Unresolved {
        base_type: concrete_name(base, base_ref),
    }
}

/* Qualified base name with the reference's concrete generic arguments */
fn concrete_name(base: &TypeSchema, reference: &TypeRef) -> String {
    with_args(&base.qualified_name(), &reference.generic_args)
}

fn with_args(name: &str, args: &[String]) -> String {
    if args.is_empty() {
        name.to_string()
    } else {
        format!("{}<{}>", name, args.join(", "))
    }
}
