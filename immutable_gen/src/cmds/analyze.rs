/* Analyze command - report base resolution, flattened properties and
   diagnostics without writing any output */

use super::common::load_schemas;
use crate::codegen::{CodeEmitter, OutlineEmitter};
use crate::driver::{GenerationPass, TypeOutput};
use crate::resolve::BaseTypeInfo;
use crate::schema::OptionOverrides;
use anyhow::anyhow;
use std::path::PathBuf;

/* Execute the analyze command */
pub fn run(
    files: Vec<PathBuf>,
    include_dirs: Vec<PathBuf>,
    print_plan: Option<String>,
) -> anyhow::Result<()> {
    println!("Immutable Generator - Type Analysis Tool");
    println!("========================================\n");

    let loaded = load_schemas(&files, &include_dirs, &OptionOverrides::default(), true)?;
    println!(
        "[~] Catalog: {} type(s), {} eligible for generation\n",
        loaded.catalog.len(),
        loaded.catalog.eligible().count()
    );

    let pass = GenerationPass::run(&loaded.catalog, &loaded.options);
    for output in pass.outputs() {
        print_type(output);
    }

    let fatal = pass.diagnostics().filter(|(_, d)| d.is_fatal()).count();
    if fatal == 0 {
        println!("[✓] No fatal diagnostics");
    } else {
        println!("[✗] {} fatal diagnostic(s)", fatal);
    }

    if let Some(type_name) = print_plan.as_deref() {
        let output = find_output(&pass, type_name)
            .ok_or_else(|| anyhow!("type '{}' is not generated in this pass", type_name))?;
        println!("\n[~] Outline for {}:\n", output.qualified_name());
        print!("{}", OutlineEmitter::default().emit(output)?);
    }

    Ok(())
}

/* Accepts a qualified name, or a simple name when it is unambiguous */
fn find_output<'a>(pass: &'a GenerationPass, type_name: &str) -> Option<&'a TypeOutput> {
    pass.get(type_name).or_else(|| {
        let mut matches = pass.outputs().iter().filter(|o| o.names.name == type_name);
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    })
}

fn print_type(output: &TypeOutput) {
    println!("[~] {}", output.qualified_name());
    let base = match &output.base {
        BaseTypeInfo::Root => "root".to_string(),
        BaseTypeInfo::Resolved {
            base_builder_type, ..
        } => format!("derived, extends {}", base_builder_type),
        BaseTypeInfo::External { base_type } => {
            format!("derived, extends builder of external {}", base_type)
        }
        BaseTypeInfo::Unresolved { base_type } => format!("derived, {} has no builder", base_type),
    };
    println!("    Base: {}", base);

    if output.properties.is_empty() {
        println!("    Properties: none");
    } else {
        println!("    Properties:");
        for property in &output.properties {
            println!(
                "      - {}: {}{}",
                property.name(),
                property.type_name(),
                if property.is_shadow { " (shadows base)" } else { "" }
            );
        }
    }

    for diagnostic in &output.diagnostics {
        let prefix = if diagnostic.is_fatal() { "[✗]" } else { "[!]" };
        println!("    {} {}", prefix, diagnostic);
    }
    println!();
}
