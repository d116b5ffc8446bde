/* Property flattening: own generated properties, each tagged with whether it
   hides a same-named property of the immediate base. */

use crate::resolve::BaseTypeInfo;
use crate::schema::catalog::TypeCatalog;
use crate::schema::{PropertyDescriptor, TypeSchema};
use serde_derive::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FlattenedProperty {
    #[serde(flatten)]
    pub descriptor: PropertyDescriptor,
    /* Same name exists on the immediate base; stored independently and
       emitted with a hides-inherited marker */
    pub is_shadow: bool,
}

impl FlattenedProperty {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn type_name(&self) -> &str {
        &self.descriptor.type_name
    }
}

pub fn flatten_properties(
    schema: &TypeSchema,
    base_info: &BaseTypeInfo,
    catalog: &TypeCatalog,
) -> Vec<FlattenedProperty> {
    let base_names: HashSet<&str> = if base_info.is_derived() {
        catalog
            .base_of(schema)
            .map(|base| base.generated_properties().map(|p| p.name.as_str()).collect())
            .unwrap_or_default()
    } else {
        HashSet::new()
    };

    for skipped in schema.properties.iter().filter(|p| !p.is_generated()) {
        debug!(
            type_name = %schema.qualified_name(),
            property = %skipped.name,
            category = ?skipped.category,
            "property left out of generation"
        );
    }

    schema
        .generated_properties()
        .map(|p| FlattenedProperty {
            descriptor: p.clone(),
            is_shadow: base_names.contains(p.name.as_str()),
        })
        .collect()
}
