/* Value-type synthesis: the shared default instance, construction from a
   builder, conversions to and from the builder and fluent setters that return
   a new value instead of mutating. */

use super::builder::BuilderPlan;
use super::names::SymbolNames;
use super::{fluent_setters, FluentSetter};
use crate::flatten::FlattenedProperty;
use crate::resolve::BaseTypeInfo;
use crate::schema::{Accessibility, GeneratorOptions, TypeSchema};
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerStatus {
    Emit,
    /* Declared by the type itself or inherited from an ancestor */
    AlreadyPresent,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ValueMarkers {
    pub immutable: MarkerStatus,
    pub equality: bool,
    /* Open builder definition, e.g. `Box<>.Builder` */
    pub builder: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct DefaultInstance {
    pub member: String,
    pub type_name: String,
    /* Derived types hide the base's default member */
    pub hides_inherited: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct GuardConstructor {
    pub accessibility: Accessibility,
    pub chains_to_base: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Assignment {
    pub property: String,
    pub source: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FromBuilderConstructor {
    pub parameter: String,
    pub builder_type: String,
    /* Base-level properties are assigned by the chained base constructor */
    pub chains_to_base: bool,
    /* An absent builder fails with a missing-argument error */
    pub rejects_absent: bool,
    pub assignments: Vec<Assignment>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Conversion {
    /* value -> builder: `new Builder(value)` */
    ValueToBuilder { builder_type: String },
    /* builder -> value: invokes the materialize method */
    BuilderToValue { via_method: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ValuePlan {
    pub type_name: String,
    pub accessibility: Accessibility,
    pub markers: ValueMarkers,
    pub default_instance: DefaultInstance,
    pub guard_constructor: GuardConstructor,
    pub builder_constructor: FromBuilderConstructor,
    pub conversions: Vec<Conversion>,
    pub setters: Vec<FluentSetter>,
}

pub fn synthesize_value(
    schema: &TypeSchema,
    names: &SymbolNames,
    base_info: &BaseTypeInfo,
    properties: &[FlattenedProperty],
    builder: &BuilderPlan,
    options: &GeneratorOptions,
) -> ValuePlan {
    let derived = base_info.is_derived();
    let value_type = &names.name_with_generics;

    let immutable = if schema.markers.immutable || base_info.ancestor_already_marked_immutable() {
        MarkerStatus::AlreadyPresent
    } else {
        MarkerStatus::Emit
    };

    let parameter = "builder".to_string();
    let assignments = properties
        .iter()
        .map(|p| Assignment {
            property: p.name().to_string(),
            source: format!("{}.{}", parameter, p.name()),
        })
        .collect();

    ValuePlan {
        type_name: value_type.clone(),
        accessibility: schema.declaration.accessibility,
        markers: ValueMarkers {
            immutable,
            equality: schema.generate_equality,
            builder: format!("{}.{}", names.definition, options.builder_name),
        },
        default_instance: DefaultInstance {
            member: options.default_member.clone(),
            type_name: value_type.clone(),
            hides_inherited: derived,
        },
        guard_constructor: GuardConstructor {
            accessibility: Accessibility::Protected,
            chains_to_base: derived,
        },
        builder_constructor: FromBuilderConstructor {
            parameter,
            builder_type: builder.full_name.clone(),
            chains_to_base: derived,
            rejects_absent: true,
            assignments,
        },
        conversions: vec![
            Conversion::ValueToBuilder {
                builder_type: builder.full_name.clone(),
            },
            Conversion::BuilderToValue {
                via_method: builder.materialize.method.clone(),
            },
        ],
        setters: fluent_setters(properties, options, value_type, true),
    }
}
