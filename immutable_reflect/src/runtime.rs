/* Runtime over the outputs of one generation pass */

use crate::builder::Builder;
use crate::errors::{ReflectError, ReflectResult};
use crate::instance::Instance;
use crate::model::{LevelModel, SlotModel, TypeModel};
use crate::value::Value;
use immutable_gen::synth::builder::standard_write_rule;
use immutable_gen::{GenerationPass, TypeCatalog, TypeOutput};
use immutable_types::TypeSchema;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub struct Runtime {
    models: HashMap<String, Arc<TypeModel>>,
    /* One default instance per generated type */
    defaults: HashMap<String, Instance>,
    /* Known types that cannot be instantiated, with the reason */
    unavailable: HashMap<String, String>,
}

impl Runtime {
    pub fn new(catalog: &TypeCatalog, pass: &GenerationPass) -> Self {
        let mut models = HashMap::new();
        let mut defaults = HashMap::new();
        let mut unavailable = HashMap::new();

        for output in pass.outputs() {
            let qualified = output.qualified_name().to_string();
            if output.has_fatal() {
                unavailable.insert(qualified, fatal_reason(output));
                continue;
            }
            let Some(schema) = catalog.get(&qualified) else {
                continue;
            };

            let mut chain = catalog.ancestors(schema);
            chain.reverse();

            /* Every ancestor generated in this pass must be usable as well */
            let failing_base = chain
                .iter()
                .find_map(|ancestor| pass.get(&ancestor.qualified_name()).filter(|o| o.has_fatal()));
            if let Some(base) = failing_base {
                let reason = format!(
                    "base type '{}' is not generated: {}",
                    base.qualified_name(),
                    fatal_reason(base)
                );
                unavailable.insert(qualified, reason);
                continue;
            }
            chain.push(schema);

            let model = Arc::new(TypeModel {
                qualified: qualified.clone(),
                levels: chain.iter().map(|t| level_model(t, pass)).collect(),
                structural_equality: output.generate_equality,
                materialize: output.builder.materialize.steps.clone(),
            });
            debug!(type_name = %qualified, levels = model.levels.len(), "runtime model built");

            let default = Instance::new(Arc::clone(&model), model.zero_values());
            defaults.insert(qualified.clone(), default);
            models.insert(qualified, model);
        }

        for schema in catalog.iter() {
            let qualified = schema.qualified_name();
            if !models.contains_key(&qualified) && !unavailable.contains_key(&qualified) {
                unavailable.insert(qualified, "not generated in this pass".to_string());
            }
        }

        Self {
            models,
            defaults,
            unavailable,
        }
    }

    fn model(&self, type_name: &str) -> ReflectResult<&Arc<TypeModel>> {
        if let Some(model) = self.models.get(type_name) {
            return Ok(model);
        }
        Err(match self.unavailable.get(type_name) {
            Some(reason) => ReflectError::NotGenerated {
                type_name: type_name.to_string(),
                reason: reason.clone(),
            },
            None => ReflectError::UnknownType {
                type_name: type_name.to_string(),
            },
        })
    }

    /// Instantiable types, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The singleton default instance; every call returns the same instance.
    pub fn default_instance(&self, type_name: &str) -> ReflectResult<Instance> {
        self.model(type_name)?;
        self.defaults
            .get(type_name)
            .cloned()
            .ok_or_else(|| ReflectError::UnknownType {
                type_name: type_name.to_string(),
            })
    }

    /// Builder starting from the default instance.
    pub fn builder(&self, type_name: &str) -> ReflectResult<Builder> {
        self.builder_from(type_name, None)
    }

    /// Builder starting from `original`, or from the default instance when absent.
    pub fn builder_from(&self, type_name: &str, original: Option<&Instance>) -> ReflectResult<Builder> {
        let original = match original {
            Some(instance) => {
                self.model(type_name)?;
                if instance.type_name() != type_name {
                    return Err(ReflectError::OriginalMismatch {
                        expected: type_name.to_string(),
                        found: instance.type_name().to_string(),
                    });
                }
                instance.clone()
            }
            None => self.default_instance(type_name)?,
        };
        Ok(Builder::from_original(original))
    }

    /// Construction from a builder: always a new instance holding the builder's current values.
    pub fn construct(&self, type_name: &str, builder: Option<&Builder>) -> ReflectResult<Instance> {
        self.model(type_name)?;
        let builder = builder.ok_or_else(|| ReflectError::MissingBuilder {
            type_name: type_name.to_string(),
        })?;
        if builder.type_name() != type_name {
            return Err(ReflectError::BuilderMismatch {
                expected: type_name.to_string(),
                found: builder.type_name().to_string(),
            });
        }
        Ok(builder.build())
    }
}

fn fatal_reason(output: &TypeOutput) -> String {
    output
        .diagnostics
        .iter()
        .filter(|d| d.is_fatal())
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/* Own generated properties of one chain level. Levels generated in this pass
   take the write rule from their builder plan; levels from an earlier pass use
   the standard one. */
fn level_model(schema: &TypeSchema, pass: &GenerationPass) -> LevelModel {
    let qualified = schema.qualified_name();
    let accessors = pass.get(&qualified).map(|o| &o.builder.accessors);

    let slots = schema
        .generated_properties()
        .map(|p| {
            let write = accessors
                .and_then(|all| all.iter().find(|a| a.property == p.name))
                .map(|a| a.write.clone())
                .unwrap_or_else(|| standard_write_rule(&p.name));
            SlotModel {
                property: p.name.clone(),
                declared: p.type_name.clone(),
                zero: Value::zero_for(&p.type_name),
                write,
            }
        })
        .collect();

    LevelModel {
        type_name: qualified,
        slots,
    }
}
