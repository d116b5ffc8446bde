use immutable_loader::{ImportResolver, LoadError};
use immutable_types::Origin;
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write schema fixture");
}

const SHARED: &str = r#"
schema:
  package: shared.model
types:
  - name: Entity
    generated-immutable: true
    properties:
      - { name: Id, type: string }
  - name: Plain
    properties:
      - { name: Note, type: string }
  - name: Pair
    generated-immutable: true
    generic-params: [K, V]
    properties:
      - { name: Key, type: K }
      - { name: Value, type: V }
"#;

const PEOPLE: &str = r#"
schema:
  package: sample.people
  imports: [shared.yaml]
  options:
    setter-prefix: Set
types:
  - name: Person
    generated-immutable: true
    base: { name: shared.model.Entity }
    properties:
      - { name: Name, type: string }
"#;

#[test]
fn imported_generated_types_carry_builder_marker() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shared.yaml", SHARED);
    write(dir.path(), "people.yaml", PEOPLE);

    let mut resolver = ImportResolver::new(Vec::new());
    resolver
        .load_file_with_imports(&dir.path().join("people.yaml"))
        .unwrap();

    assert_eq!(resolver.loaded_file_count(), 2);
    assert_eq!(resolver.local_types().len(), 1);
    assert_eq!(resolver.local_types()[0].qualified_name(), "sample.people.Person");
    assert_eq!(resolver.local_types()[0].origin, Origin::Local);

    let imported = resolver.imported_types();
    assert_eq!(imported.len(), 3);
    let entity = imported.iter().find(|t| t.name == "Entity").unwrap();
    assert_eq!(
        entity.markers.builder.as_deref(),
        Some("Entity.Builder")
    );
    let pair = imported.iter().find(|t| t.name == "Pair").unwrap();
    assert_eq!(pair.markers.builder.as_deref(), Some("Pair<,>.Builder"));
    assert_eq!(
        entity.origin,
        Origin::Imported {
            package: "shared.model".to_string()
        }
    );

    /* Non-generated types never receive a builder marker */
    let plain = imported.iter().find(|t| t.name == "Plain").unwrap();
    assert!(plain.markers.builder.is_none());

    assert_eq!(resolver.option_overrides().len(), 1);
    assert_eq!(
        resolver.option_overrides()[0].setter_prefix.as_deref(),
        Some("Set")
    );
    assert_eq!(resolver.packages(), vec!["sample.people", "shared.model"]);
}

#[test]
fn import_found_through_include_dir() {
    let lib = tempfile::tempdir().unwrap();
    let src = tempfile::tempdir().unwrap();
    write(lib.path(), "shared.yaml", SHARED);
    write(src.path(), "people.yaml", PEOPLE);

    let mut resolver = ImportResolver::new(vec![lib.path().to_path_buf()]);
    resolver
        .load_file_with_imports(&src.path().join("people.yaml"))
        .unwrap();

    assert_eq!(resolver.all_types().len(), 4);
}

#[test]
fn missing_import_is_a_provider_failure() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "people.yaml", PEOPLE);

    let mut resolver = ImportResolver::new(Vec::new());
    let err = resolver
        .load_file_with_imports(&dir.path().join("people.yaml"))
        .unwrap_err();

    assert!(matches!(err, LoadError::ImportNotFound { ref import, .. } if import == "shared.yaml"));
}

#[test]
fn malformed_yaml_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "broken.yaml", "schema: [not, a, map");

    let mut resolver = ImportResolver::new(Vec::new());
    let err = resolver
        .load_file_with_imports(&dir.path().join("broken.yaml"))
        .unwrap_err();

    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(err.to_string().contains("broken.yaml"));
}

#[test]
fn circular_imports_terminate() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.yaml",
        "schema:\n  package: a\n  imports: [b.yaml]\ntypes:\n  - name: A\n    generated-immutable: true\n",
    );
    write(
        dir.path(),
        "b.yaml",
        "schema:\n  package: b\n  imports: [a.yaml]\ntypes:\n  - name: B\n    generated-immutable: true\n",
    );

    let mut resolver = ImportResolver::new(Vec::new());
    resolver
        .load_file_with_imports(&dir.path().join("a.yaml"))
        .unwrap();

    assert_eq!(resolver.loaded_file_count(), 2);
    assert_eq!(resolver.local_types().len(), 1);
    assert_eq!(resolver.imported_types().len(), 1);
}

#[test]
fn root_file_loaded_earlier_as_import_becomes_local() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shared.yaml", SHARED);
    write(dir.path(), "people.yaml", PEOPLE);

    let mut resolver = ImportResolver::new(Vec::new());
    resolver
        .load_file_with_imports(&dir.path().join("people.yaml"))
        .unwrap();
    resolver
        .load_file_with_imports(&dir.path().join("shared.yaml"))
        .unwrap();

    assert!(resolver.imported_types().is_empty());
    let entity = resolver
        .local_types()
        .iter()
        .find(|t| t.name == "Entity")
        .unwrap();
    assert_eq!(entity.origin, Origin::Local);
    assert!(entity.markers.builder.is_none());
}
