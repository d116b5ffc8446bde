use immutable_types::{OptionOverrides, TypeSchema};
use serde_derive::{Deserialize, Serialize};

/* Metadata for a schema file */
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaMetadata {
    /* Package identifier (e.g., "sample.people"); default namespace of the file's types */
    pub package: String,

    /* File description */
    #[serde(default)]
    pub description: String,

    /* Schema files this one depends on, relative to this file or an include directory */
    #[serde(default)]
    pub imports: Vec<String>,

    /* Generator option overrides; only honored on root files */
    #[serde(default)]
    pub options: OptionOverrides,
}

/* Complete schema file structure with metadata and type declarations */
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaFile {
    /* Schema file metadata */
    pub schema: SchemaMetadata,

    /* Type declarations */
    #[serde(default)]
    pub types: Vec<TypeSchema>,
}

impl SchemaFile {
    /* Get the package identifier */
    pub fn package(&self) -> &str {
        &self.schema.package
    }

    /* Get the imports */
    pub fn imports(&self) -> &[String] {
        &self.schema.imports
    }

    /* Get the option overrides */
    pub fn options(&self) -> &OptionOverrides {
        &self.schema.options
    }

    /* Fill in namespaces left empty with the file's package */
    pub fn apply_default_namespace(&mut self) {
        let package = self.schema.package.clone();
        for schema in &mut self.types {
            if schema.namespace.is_empty() {
                schema.namespace = package.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_and_defaults_namespace() {
        let yaml = r#"
schema:
  package: sample.people
  imports: [shared.yaml]
  options:
    default-member: Empty
types:
  - name: Person
    generated-immutable: true
    properties:
      - { name: Id, type: string }
  - name: Address
    namespace: sample.geo
"#;
        let mut file: SchemaFile = serde_yml::from_str(yaml).unwrap();
        file.apply_default_namespace();

        assert_eq!(file.package(), "sample.people");
        assert_eq!(file.imports(), ["shared.yaml".to_string()]);
        assert_eq!(file.options().default_member.as_deref(), Some("Empty"));
        assert_eq!(file.types[0].namespace, "sample.people");
        assert_eq!(file.types[1].namespace, "sample.geo");
    }
}
