/* Generation pass: runs resolution, flattening, validation and synthesis for
   every eligible type. Types are independent of one another; diagnostics of
   one type never affect another. */

use crate::flatten::{flatten_properties, FlattenedProperty};
use crate::resolve::{resolve_base, BaseTypeInfo};
use crate::schema::catalog::TypeCatalog;
use crate::schema::{GeneratorOptions, TypeSchema};
use crate::synth::{synthesize_builder, synthesize_value, BuilderPlan, SymbolNames, ValuePlan};
use crate::validate::{validate, Diagnostic};
use rayon::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TypeOutput {
    pub names: SymbolNames,
    pub base: BaseTypeInfo,
    pub properties: Vec<FlattenedProperty>,
    pub diagnostics: Vec<Diagnostic>,
    pub generate_equality: bool,
    pub value: ValuePlan,
    pub builder: BuilderPlan,
}

impl TypeOutput {
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    pub fn qualified_name(&self) -> &str {
        &self.names.qualified
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerationPass {
    outputs: Vec<TypeOutput>,
}

impl GenerationPass {
    pub fn run(catalog: &TypeCatalog, options: &GeneratorOptions) -> Self {
        let mut eligible: Vec<&TypeSchema> = catalog.eligible().collect();
        eligible.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.qualified_name().cmp(&b.qualified_name()))
        });

        info!(types = eligible.len(), "starting generation pass");

        /* par_iter over a Vec keeps the input order in collect() */
        let outputs: Vec<TypeOutput> = eligible
            .par_iter()
            .map(|schema| generate_type(schema, catalog, options))
            .collect();

        for output in &outputs {
            for diagnostic in &output.diagnostics {
                if diagnostic.is_fatal() {
                    warn!(type_name = %output.qualified_name(), "{}", diagnostic);
                } else {
                    info!(type_name = %output.qualified_name(), "{}", diagnostic);
                }
            }
        }

        Self { outputs }
    }

    pub fn outputs(&self) -> &[TypeOutput] {
        &self.outputs
    }

    pub fn get(&self, qualified_name: &str) -> Option<&TypeOutput> {
        self.outputs.iter().find(|o| o.names.qualified == qualified_name)
    }

    pub fn has_fatal(&self) -> bool {
        self.outputs.iter().any(TypeOutput::has_fatal)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = (&TypeOutput, &Diagnostic)> {
        self.outputs
            .iter()
            .flat_map(|o| o.diagnostics.iter().map(move |d| (o, d)))
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

pub fn generate_type(
    schema: &TypeSchema,
    catalog: &TypeCatalog,
    options: &GeneratorOptions,
) -> TypeOutput {
    let names = SymbolNames::of(schema);
    let base = resolve_base(schema, catalog, options);
    let properties = flatten_properties(schema, &base, catalog);
    let diagnostics = validate(schema, &base, &names.name_with_generics);
    let builder = synthesize_builder(schema, &names, &base, &properties, options);
    let value = synthesize_value(schema, &names, &base, &properties, &builder, options);

    debug!(
        type_name = %names.qualified,
        properties = properties.len(),
        diagnostics = diagnostics.len(),
        "type synthesized"
    );

    TypeOutput {
        names,
        base,
        properties,
        diagnostics,
        generate_equality: schema.generate_equality,
        value,
        builder,
    }
}
