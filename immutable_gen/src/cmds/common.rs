/* Common utilities shared between analyze and generate commands */

use crate::schema::catalog::TypeCatalog;
use crate::schema::{GeneratorOptions, OptionOverrides};
use anyhow::Context;
use immutable_loader::ImportResolver;
use std::path::PathBuf;

/* Everything a command needs after loading: the resolver (for reporting),
   the layered options and the catalog built from every loaded type */
pub struct LoadedSchemas {
    pub resolver: ImportResolver,
    pub options: GeneratorOptions,
    pub catalog: TypeCatalog,
}

/* Load root files with their imports, layer options and build the catalog.
   Option layers, later wins: built-in defaults, root schema files, CLI flags. */
pub fn load_schemas(
    files: &[PathBuf],
    include_dirs: &[PathBuf],
    cli_overrides: &OptionOverrides,
    verbose: bool,
) -> anyhow::Result<LoadedSchemas> {
    let mut resolver = ImportResolver::new(include_dirs.to_vec());

    if verbose {
        println!("[~] Loading schema files and resolving imports...");
        if !include_dirs.is_empty() {
            println!("    Include directories:");
            for dir in include_dirs {
                println!("      - {}", dir.display());
            }
        }
    }

    for file in files {
        resolver
            .load_file_with_imports(file)
            .with_context(|| format!("failed to load schema file {}", file.display()))?;
    }

    if verbose {
        println!(
            "[~] Loaded {} file(s) total (including imports)",
            resolver.loaded_file_count()
        );
        println!("[~] Packages loaded:");
        for package in resolver.packages() {
            println!("    - {}", package);
        }
        println!(
            "[~] {} local type(s), {} imported type(s)",
            resolver.local_types().len(),
            resolver.imported_types().len()
        );
    }

    let mut options = GeneratorOptions::default();
    for overrides in resolver.option_overrides() {
        options.apply(overrides);
    }
    options.apply(cli_overrides);

    let catalog = TypeCatalog::new(resolver.all_types(), &options)
        .context("schema files describe an invalid type catalog")?;

    Ok(LoadedSchemas {
        resolver,
        options,
        catalog,
    })
}
