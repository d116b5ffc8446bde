use std::path::PathBuf;
use thiserror::Error;

/* Provider failures. Any of these aborts the generation pass. */
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read schema file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("import '{import}' not found relative to '{from}' or in include directories")]
    ImportNotFound { import: String, from: PathBuf },
}
