/* Synthesis of the immutable value type and its builder companion.
   The plans produced here are structured member descriptions for a code
   emitter; `builder` prescribes the mutable side, `value` the immutable one. */

pub mod builder;
pub mod names;
pub mod value;

pub use builder::{synthesize_builder, BuilderPlan};
pub use names::SymbolNames;
pub use value::{synthesize_value, ValuePlan};

use crate::flatten::FlattenedProperty;
use crate::schema::GeneratorOptions;
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SetterKind {
    /* `WithX(value)` */
    Literal,
    /* `WithX(previous => next)`; the projection runs immediately */
    Projection,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FluentSetter {
    pub method: String,
    pub property: String,
    pub property_type: String,
    pub kind: SetterKind,
    /* Builder setters return the builder itself; value setters the new value */
    pub returns: String,
    /* Value setters go through a transient builder created from `this` */
    pub via_transient_builder: bool,
    pub hides_inherited: bool,
}

/* Both setter forms for every property, in property order */
pub(crate) fn fluent_setters(
    properties: &[FlattenedProperty],
    options: &GeneratorOptions,
    returns: &str,
    via_transient_builder: bool,
) -> Vec<FluentSetter> {
    properties
        .iter()
        .flat_map(|p| {
            [SetterKind::Literal, SetterKind::Projection].map(|kind| FluentSetter {
                method: options.setter_name(p.name()),
                property: p.name().to_string(),
                property_type: p.type_name().to_string(),
                kind,
                returns: returns.to_string(),
                via_transient_builder,
                hides_inherited: p.is_shadow,
            })
        })
        .collect()
}
