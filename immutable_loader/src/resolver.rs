use immutable_types::{GeneratorOptions, OptionOverrides, Origin, TypeSchema};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::LoadError;
use crate::file::SchemaFile;

/* Import resolver for loading schema files and the files they import */
pub struct ImportResolver {
    /* Track loaded files to detect circular imports */
    loaded_files: HashSet<PathBuf>,

    /* Include directories for searching imports */
    include_dirs: Vec<PathBuf>,

    /* Types declared in root files, in load order */
    local_types: Vec<TypeSchema>,

    /* Types reached only through imports, in load order */
    imported_types: Vec<TypeSchema>,

    /* All loaded schema files, and their canonical paths at the same index */
    all_files: Vec<SchemaFile>,
    file_paths: Vec<PathBuf>,

    /* Option overrides collected from root files, in load order */
    overrides: Vec<OptionOverrides>,
}

impl ImportResolver {
    /* Create a new import resolver with the given include directories */
    pub fn new(include_dirs: Vec<PathBuf>) -> Self {
        Self {
            loaded_files: HashSet::new(),
            include_dirs,
            local_types: Vec::new(),
            imported_types: Vec::new(),
            all_files: Vec::new(),
            file_paths: Vec::new(),
            overrides: Vec::new(),
        }
    }

    /* Resolve an import path relative to the importing file or include directories */
    fn resolve_import_path(&self, import_path: &str, base_file: &Path) -> Result<PathBuf, LoadError> {
        if let Some(parent) = base_file.parent() {
            let relative_path = parent.join(import_path);
            if relative_path.exists() {
                return canonicalize(&relative_path);
            }
        }

        for include_dir in &self.include_dirs {
            let include_path = include_dir.join(import_path);
            if include_path.exists() {
                return canonicalize(&include_path);
            }
        }

        Err(LoadError::ImportNotFound {
            import: import_path.to_string(),
            from: base_file.to_path_buf(),
        })
    }

    /* Load a root schema file and recursively load its imports */
    pub fn load_file_with_imports(&mut self, file_path: &Path) -> Result<(), LoadError> {
        self.load_internal(file_path, true)
    }

    fn load_internal(&mut self, file_path: &Path, is_root: bool) -> Result<(), LoadError> {
        let canonical_path = canonicalize(file_path)?;

        if self.loaded_files.contains(&canonical_path) {
            debug!(path = %file_path.display(), "skipping already loaded schema file");
            if is_root {
                self.promote_to_local(&canonical_path);
            }
            return Ok(());
        }

        /* Mark as loaded before processing imports so cycles terminate */
        self.loaded_files.insert(canonical_path.clone());

        debug!(path = %file_path.display(), root = is_root, "loading schema file");

        let contents = std::fs::read_to_string(file_path).map_err(|source| LoadError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;
        let mut schema_file: SchemaFile =
            serde_yml::from_str(&contents).map_err(|source| LoadError::Parse {
                path: file_path.to_path_buf(),
                source,
            })?;
        schema_file.apply_default_namespace();

        for import in schema_file.imports().to_vec() {
            let import_path = self.resolve_import_path(&import, file_path)?;
            self.load_internal(&import_path, false)?;
        }

        if is_root {
            self.local_types.extend(schema_file.types.iter().cloned());
            self.overrides.push(schema_file.options().clone());
        } else {
            let package = schema_file.package().to_string();
            self.imported_types.extend(
                schema_file
                    .types
                    .iter()
                    .cloned()
                    .map(|schema| mark_imported(schema, &package)),
            );
        }

        self.all_files.push(schema_file);
        self.file_paths.push(canonical_path);
        Ok(())
    }

    /* A file first reached as an import and later named as a root becomes local */
    fn promote_to_local(&mut self, canonical_path: &Path) {
        let Some(index) = self.file_paths.iter().position(|p| p == canonical_path) else {
            return;
        };
        let file = &self.all_files[index];
        let names: HashSet<String> = file.types.iter().map(TypeSchema::qualified_name).collect();
        if self
            .local_types
            .iter()
            .any(|t| names.contains(&t.qualified_name()))
        {
            return;
        }

        debug!(package = file.package(), "promoting imported schema file to root");
        self.imported_types
            .retain(|t| !names.contains(&t.qualified_name()));
        self.local_types.extend(file.types.iter().cloned());
        self.overrides.push(file.options().clone());
    }

    /* All types, local first, then imported; each in load order */
    pub fn all_types(&self) -> Vec<TypeSchema> {
        self.local_types
            .iter()
            .chain(self.imported_types.iter())
            .cloned()
            .collect()
    }

    /* Types declared in root files */
    pub fn local_types(&self) -> &[TypeSchema] {
        &self.local_types
    }

    /* Types reached only through imports */
    pub fn imported_types(&self) -> &[TypeSchema] {
        &self.imported_types
    }

    /* Get all loaded schema files */
    pub fn all_files(&self) -> &[SchemaFile] {
        &self.all_files
    }

    /* Option overrides from root files, in load order */
    pub fn option_overrides(&self) -> &[OptionOverrides] {
        &self.overrides
    }

    /* Get the number of loaded files */
    pub fn loaded_file_count(&self) -> usize {
        self.loaded_files.len()
    }

    /* Packages of every loaded file */
    pub fn packages(&self) -> Vec<String> {
        let mut packages: Vec<String> = self
            .all_files
            .iter()
            .map(|f| f.package().to_string())
            .collect();
        packages.sort();
        packages.dedup();
        packages
    }
}

/* An imported generated type was produced by an earlier pass, which attached a
   marker naming its builder by open definition. Reproduce that marker, with the
   default builder name, when the file omits it. */
fn mark_imported(mut schema: TypeSchema, package: &str) -> TypeSchema {
    if schema.markers.generated_immutable && schema.markers.builder.is_none() {
        let builder_name = GeneratorOptions::default().builder_name;
        schema.markers.builder = Some(format!("{}.{}", schema.open_definition(), builder_name));
    }
    schema.origin = Origin::Imported {
        package: package.to_string(),
    };
    schema
}

fn canonicalize(path: &Path) -> Result<PathBuf, LoadError> {
    path.canonicalize().map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
