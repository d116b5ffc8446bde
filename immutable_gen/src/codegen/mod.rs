pub mod outline;
pub mod serialization;

pub use outline::OutlineEmitter;
pub use serialization::{JsonEmitter, YamlEmitter};

use crate::driver::{GenerationPass, TypeOutput};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to format output: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("failed to serialize plan as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize plan as YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/* Turns one type's plan into the text of one output file */
pub trait CodeEmitter {
    fn file_name(&self, output: &TypeOutput) -> String;

    fn emit(&self, output: &TypeOutput) -> Result<String, EmitError>;
}

/* Writes one file per type. Every type is written, including those with fatal
   diagnostics. Returns the written paths in pass order. */
pub fn write_pass(
    pass: &GenerationPass,
    emitter: &dyn CodeEmitter,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, EmitError> {
    std::fs::create_dir_all(out_dir).map_err(|source| EmitError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(pass.len());
    for output in pass.outputs() {
        let text = emitter.emit(output)?;
        let path = out_dir.join(emitter.file_name(output));
        std::fs::write(&path, text).map_err(|source| EmitError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(type_name = %output.qualified_name(), path = %path.display(), "wrote type output");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{GeneratorOptions, PropertyDescriptor, TypeSchema};
    use crate::schema::catalog::TypeCatalog;

    #[test]
    fn writes_one_file_per_type() {
        let options = GeneratorOptions::default();
        let catalog = TypeCatalog::new(
            vec![
                TypeSchema::new("App", "Person").with_property(PropertyDescriptor::new("Id", "string")),
                TypeSchema::new("App", "Box").with_generic_params(&["T"]),
            ],
            &options,
        )
        .unwrap();
        let pass = GenerationPass::run(&catalog, &options);
        let dir = tempfile::tempdir().unwrap();

        let written = write_pass(&pass, &OutlineEmitter::default(), dir.path()).unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["App.Box_1.generated.txt", "App.Person.generated.txt"]);
        assert!(written.iter().all(|p| p.exists()));
    }
}
