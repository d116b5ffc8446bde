/* Generate command - synthesize every eligible type and write one file per type */

use super::common::load_schemas;
use crate::codegen::{write_pass, CodeEmitter, JsonEmitter, OutlineEmitter, YamlEmitter};
use crate::driver::GenerationPass;
use crate::schema::OptionOverrides;
use crate::validate::Severity;
use std::path::PathBuf;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Format {
    Outline,
    Json,
    Yaml,
}

impl Format {
    fn emitter(self) -> Box<dyn CodeEmitter> {
        match self {
            Format::Outline => Box::new(OutlineEmitter::default()),
            Format::Json => Box::new(JsonEmitter),
            Format::Yaml => Box::new(YamlEmitter),
        }
    }
}

/* Execute the generate command */
pub fn run(
    files: Vec<PathBuf>,
    include_dirs: Vec<PathBuf>,
    output_dir: PathBuf,
    format: Format,
    overrides: OptionOverrides,
    verbose: bool,
) -> anyhow::Result<GenerationPass> {
    if verbose {
        println!("Immutable Generator - Code Generation Tool");
        println!("==========================================\n");
        println!("[~] Configuration:");
        println!("  Format: {:?}", format);
        println!("  Output directory: {}", output_dir.display());
        println!("  Input files: {}", files.len());
        for file in &files {
            println!("    - {}", file.display());
        }
        println!();
    }

    let loaded = load_schemas(&files, &include_dirs, &overrides, verbose)?;
    let pass = GenerationPass::run(&loaded.catalog, &loaded.options);

    let emitter = format.emitter();
    let written = write_pass(&pass, &*emitter, &output_dir)?;

    for (output, path) in pass.outputs().iter().zip(&written) {
        let marker = if output.has_fatal() { "[✗]" } else { "[✓]" };
        println!("{} {} -> {}", marker, output.qualified_name(), path.display());
        for diagnostic in &output.diagnostics {
            let prefix = match diagnostic.severity {
                Severity::Fatal => "[✗]",
                Severity::Advisory => "[!]",
            };
            println!("    {} {}", prefix, diagnostic);
        }
    }

    println!(
        "\n[~] Generated {} type(s) into {}",
        pass.len(),
        output_dir.display()
    );

    if pass.has_fatal() {
        let failing = pass.outputs().iter().filter(|o| o.has_fatal()).count();
        anyhow::bail!(
            "{} type(s) carry fatal diagnostics; their output will not build",
            failing
        );
    }

    Ok(pass)
}
