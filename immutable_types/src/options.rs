use serde_derive::{Deserialize, Serialize};

use crate::types::ROOT_OBJECT_TYPE;

/* Well-known member names used by synthesized types. Every field is optional in
   schema files; missing ones keep their default. */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case", default)]
pub struct GeneratorOptions {
    /* Static member exposing the singleton default instance */
    pub default_member: String,
    /* Nested builder type name */
    pub builder_name: String,
    /* Builder method converting its state into an immutable instance */
    pub materialize_method: String,
    /* Prefix of fluent setters (`WithId`) */
    pub setter_prefix: String,
    /* Universal root object type; a base of this name means "no base" */
    pub root_object_type: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            default_member: "Default".to_string(),
            builder_name: "Builder".to_string(),
            materialize_method: "ToImmutable".to_string(),
            setter_prefix: "With".to_string(),
            root_object_type: ROOT_OBJECT_TYPE.to_string(),
        }
    }
}

/* Partial overrides, as written in a schema file or collected from CLI flags */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OptionOverrides {
    #[serde(default)]
    pub default_member: Option<String>,
    #[serde(default)]
    pub builder_name: Option<String>,
    #[serde(default)]
    pub materialize_method: Option<String>,
    #[serde(default)]
    pub setter_prefix: Option<String>,
    #[serde(default)]
    pub root_object_type: Option<String>,
}

impl GeneratorOptions {
    /* Apply overrides on top of the current values; later layers win */
    pub fn apply(&mut self, overrides: &OptionOverrides) {
        if let Some(v) = &overrides.default_member {
            self.default_member = v.clone();
        }
        if let Some(v) = &overrides.builder_name {
            self.builder_name = v.clone();
        }
        if let Some(v) = &overrides.materialize_method {
            self.materialize_method = v.clone();
        }
        if let Some(v) = &overrides.setter_prefix {
            self.setter_prefix = v.clone();
        }
        if let Some(v) = &overrides.root_object_type {
            self.root_object_type = v.clone();
        }
    }

    pub fn setter_name(&self, property: &str) -> String {
        format!("{}{}", self.setter_prefix, property)
    }
}
