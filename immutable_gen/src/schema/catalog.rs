use crate::schema::{GeneratorOptions, TypeRef, TypeSchema};
use indexmap::IndexMap;
use std::collections::HashSet;
use thiserror::Error;

/* Malformed provider data. These abort the pass before any synthesis. */
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("type '{0}' is declared more than once")]
    DuplicateType(String),

    #[error("type '{type_name}' declares property '{property}' more than once")]
    DuplicateProperty { type_name: String, property: String },

    #[error("type '{type_name}' derives from '{base}', which is not a known type")]
    UnknownBase { type_name: String, base: String },

    #[error("inheritance cycle: {}", .0.join(" -> "))]
    InheritanceCycle(Vec<String>),
}

/* Read-only index of every type the provider knows about, computed once per pass */
#[derive(Debug)]
pub struct TypeCatalog {
    types: IndexMap<String, TypeSchema>,
    eligible: Vec<String>,
    root_object: String,
}

impl TypeCatalog {
    pub fn new(schemas: Vec<TypeSchema>, options: &GeneratorOptions) -> Result<Self, CatalogError> {
        let mut types = IndexMap::with_capacity(schemas.len());
        for schema in schemas {
            let qualified = schema.qualified_name();
            check_unique_properties(&schema)?;
            if types.insert(qualified.clone(), schema).is_some() {
                return Err(CatalogError::DuplicateType(qualified));
            }
        }

        let eligible = types
            .values()
            .filter(|t| t.is_local() && t.markers.generated_immutable)
            .map(TypeSchema::qualified_name)
            .collect();

        let catalog = Self {
            types,
            eligible,
            root_object: options.root_object_type.clone(),
        };
        catalog.check_bases()?;
        Ok(catalog)
    }

    fn check_bases(&self) -> Result<(), CatalogError> {
        for schema in self.types.values() {
            if let Some(base) = schema.declared_base(&self.root_object) {
                if self.resolve_ref(schema, base).is_none() {
                    return Err(CatalogError::UnknownBase {
                        type_name: schema.qualified_name(),
                        base: base.to_string(),
                    });
                }
            }

            let mut seen = HashSet::new();
            let mut chain = vec![schema.qualified_name()];
            seen.insert(schema.qualified_name());
            let mut current = schema;
            while let Some(base) = self.base_of(current) {
                let name = base.qualified_name();
                chain.push(name.clone());
                if !seen.insert(name) {
                    return Err(CatalogError::InheritanceCycle(chain));
                }
                current = base;
            }
        }
        Ok(())
    }

    /* Look a reference up by qualified name, then relative to the referencing type's namespace */
    pub fn resolve_ref(&self, from: &TypeSchema, reference: &TypeRef) -> Option<&TypeSchema> {
        self.types.get(&reference.name).or_else(|| {
            if from.namespace.is_empty() {
                None
            } else {
                self.types
                    .get(&format!("{}.{}", from.namespace, reference.name))
            }
        })
    }

    pub fn get(&self, qualified_name: &str) -> Option<&TypeSchema> {
        self.types.get(qualified_name)
    }

    /* Immediate base schema; None for root types */
    pub fn base_of(&self, schema: &TypeSchema) -> Option<&TypeSchema> {
        schema
            .declared_base(&self.root_object)
            .and_then(|base| self.resolve_ref(schema, base))
    }

    /* Ancestors of a type, immediate base first */
    pub fn ancestors<'a>(&'a self, schema: &'a TypeSchema) -> Vec<&'a TypeSchema> {
        let mut out = Vec::new();
        let mut current = schema;
        while let Some(base) = self.base_of(current) {
            out.push(base);
            current = base;
        }
        out
    }

    /* Types eligible for generation in this pass, in provider order */
    pub fn eligible(&self) -> impl Iterator<Item = &TypeSchema> {
        self.eligible.iter().filter_map(|name| self.types.get(name))
    }

    pub fn is_eligible(&self, qualified_name: &str) -> bool {
        self.eligible.iter().any(|name| name == qualified_name)
    }

    pub fn root_object(&self) -> &str {
        &self.root_object
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeSchema> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn check_unique_properties(schema: &TypeSchema) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for property in &schema.properties {
        if !seen.insert(property.name.as_str()) {
            return Err(CatalogError::DuplicateProperty {
                type_name: schema.qualified_name(),
                property: property.name.clone(),
            });
        }
    }
    Ok(())
}
