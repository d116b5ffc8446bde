use super::{CodeEmitter, EmitError};
use crate::driver::TypeOutput;

/// Serializes the full plan as pretty JSON, for an external target-language emitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl CodeEmitter for JsonEmitter {
    fn file_name(&self, output: &TypeOutput) -> String {
        format!("{}.plan.json", output.names.file_stem)
    }

    fn emit(&self, output: &TypeOutput) -> Result<String, EmitError> {
        let mut text = serde_json::to_string_pretty(output)?;
        text.push('\n');
        Ok(text)
    }
}

/// Same plan as YAML.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEmitter;

impl CodeEmitter for YamlEmitter {
    fn file_name(&self, output: &TypeOutput) -> String {
        format!("{}.plan.yaml", output.names.file_stem)
    }

    fn emit(&self, output: &TypeOutput) -> Result<String, EmitError> {
        Ok(serde_yml::to_string(output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::GenerationPass;
    use crate::schema::catalog::TypeCatalog;
    use crate::schema::{GeneratorOptions, PropertyDescriptor, TypeSchema};

    fn person() -> TypeOutput {
        let options = GeneratorOptions::default();
        let catalog = TypeCatalog::new(
            vec![TypeSchema::new("App", "Person").with_property(PropertyDescriptor::new("Id", "string"))],
            &options,
        )
        .unwrap();
        GenerationPass::run(&catalog, &options).outputs()[0].clone()
    }

    #[test]
    fn json_plan_is_kebab_case_and_reloadable() {
        let output = person();
        let text = JsonEmitter.emit(&output).unwrap();
        assert!(text.contains("\"shared-state\""));
        assert!(text.contains("\"kind\": \"root\""));

        let reloaded: TypeOutput = serde_json::from_str(&text).unwrap();
        assert_eq!(reloaded, output);
        assert_eq!(JsonEmitter.file_name(&output), "App.Person.plan.json");
    }

    #[test]
    fn yaml_plan_mentions_write_steps() {
        let text = YamlEmitter.emit(&person()).unwrap();
        assert!(text.contains("invalidate-cache"));
        assert!(text.contains("when-dirty-build-new"));
    }
}
