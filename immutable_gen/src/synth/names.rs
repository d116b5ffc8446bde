use crate::schema::TypeSchema;
use serde_derive::{Deserialize, Serialize};

/* The spellings of a type's name the plans and emitters need */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SymbolNames {
    pub namespace: String,
    /* `Box` */
    pub name: String,
    /* `Box<T>` */
    pub name_with_generics: String,
    /* Open definition, as used by type markers: `Box<>` / `Pair<,>` */
    pub definition: String,
    /* `Ns.Box`, the catalog key */
    pub qualified: String,
    /* Output file stem, unique per generic arity: `Ns.Box_1` */
    pub file_stem: String,
}

impl SymbolNames {
    pub fn of(schema: &TypeSchema) -> Self {
        let arity = schema.generic_params.len();
        let name_with_generics = if arity == 0 {
            schema.name.clone()
        } else {
            format!("{}<{}>", schema.name, schema.generic_params.join(", "))
        };
        let definition = schema.open_definition();
        let qualified = schema.qualified_name();
        let file_stem = if arity == 0 {
            qualified.clone()
        } else {
            format!("{qualified}_{arity}")
        };

        Self {
            namespace: schema.namespace.clone(),
            name: schema.name.clone(),
            name_with_generics,
            definition,
            qualified,
            file_stem,
        }
    }
}
