use immutable_gen::{GenerationPass, TypeCatalog};
use immutable_reflect::{ReflectError, Runtime, Value};
use immutable_types::{
    GeneratorOptions, Origin, PropertyCategory, PropertyDescriptor, TypeRef, TypeSchema,
};

fn runtime(schemas: Vec<TypeSchema>) -> Runtime {
    let options = GeneratorOptions::default();
    let catalog = TypeCatalog::new(schemas, &options).unwrap();
    let pass = GenerationPass::run(&catalog, &options);
    Runtime::new(&catalog, &pass)
}

fn person(equality: bool) -> TypeSchema {
    let schema = TypeSchema::new("App", "Person")
        .with_property(PropertyDescriptor::new("Id", "string"))
        .with_property(PropertyDescriptor::new("Age", "int"));
    if equality {
        schema.with_equality()
    } else {
        schema
    }
}

#[test]
fn default_is_a_singleton_at_zero_values() {
    let rt = runtime(vec![person(false)]);
    let a = rt.default_instance("App.Person").unwrap();
    let b = rt.default_instance("App.Person").unwrap();

    assert!(a.ptr_eq(&b));
    assert_eq!(a.get("Id").unwrap(), &Value::Null);
    assert_eq!(a.get("Age").unwrap(), &Value::Int(0));
}

#[test]
fn untouched_builder_materializes_the_default() {
    for equality in [false, true] {
        let rt = runtime(vec![person(equality)]);
        let default = rt.default_instance("App.Person").unwrap();
        let mut builder = rt.builder("App.Person").unwrap();

        assert!(!builder.is_dirty());
        let built = builder.to_immutable();
        assert!(built.ptr_eq(&default));
        assert_eq!(built, default);
    }
}

#[test]
fn setting_current_value_returns_the_same_instance() {
    let rt = runtime(vec![person(false)]);
    let v = rt
        .default_instance("App.Person")
        .unwrap()
        .with("Id", "p1")
        .unwrap()
        .with("Age", 41)
        .unwrap();

    for property in ["Id", "Age"] {
        let current = v.get(property).unwrap().clone();
        let mut builder = rt
            .builder_from("App.Person", Some(&v))
            .unwrap()
            .with(property, current)
            .unwrap();
        assert!(!builder.is_dirty());
        assert!(builder.to_immutable().ptr_eq(&v));
    }
    assert!(v.with("Id", "p1").unwrap().ptr_eq(&v));
}

#[test]
fn reverting_a_change_clears_dirty_and_returns_original() {
    let rt = runtime(vec![person(false)]);
    let v = rt.default_instance("App.Person").unwrap().with("Id", "p1").unwrap();

    let mut builder = v.to_builder();
    builder.set("Id", "p2").unwrap();
    assert!(builder.is_dirty());
    assert_eq!(builder.get("Id").unwrap(), &Value::from("p2"));

    builder.set("Id", "p1").unwrap();
    assert!(!builder.is_dirty());
    assert!(builder.to_immutable().ptr_eq(&v));
}

#[test]
fn reverting_one_property_keeps_other_changes_dirty() {
    let rt = runtime(vec![person(false)]);
    let v = rt.default_instance("App.Person").unwrap();

    let mut builder = v.to_builder();
    builder.set("Id", "p2").unwrap();
    builder.set("Age", 3).unwrap();
    builder.set("Id", Value::Null).unwrap();

    assert!(builder.is_dirty());
    let built = builder.to_immutable();
    assert!(!built.ptr_eq(&v));
    assert_eq!(built.get("Id").unwrap(), &Value::Null);
    assert_eq!(built.get("Age").unwrap(), &Value::Int(3));
}

#[test]
fn materialize_is_cached_until_the_next_write() {
    let rt = runtime(vec![person(false)]);
    let mut builder = rt.builder("App.Person").unwrap().with("Id", "p1").unwrap();

    let first = builder.to_immutable();
    let second = builder.to_immutable();
    assert!(first.ptr_eq(&second));

    builder.set("Age", 9).unwrap();
    let third = builder.to_immutable();
    assert!(!third.ptr_eq(&first));
    assert_eq!(third.get("Id").unwrap(), &Value::from("p1"));
    assert_eq!(first.get("Age").unwrap(), &Value::Int(0));
}

#[test]
fn shadowing_property_is_stored_per_level() {
    let rt = runtime(vec![
        TypeSchema::new("App", "R").with_property(PropertyDescriptor::new("X", "int")),
        TypeSchema::new("App", "D")
            .with_base(TypeRef::new("App.R"))
            .with_property(PropertyDescriptor::new("X", "int")),
    ]);

    let mut builder = rt.builder("App.D").unwrap();
    builder.set("X", 5).unwrap();
    assert_eq!(builder.get_as("App.R", "X").unwrap(), &Value::Int(0));

    builder.set_as("App.R", "X", 7).unwrap();
    assert_eq!(builder.get("X").unwrap(), &Value::Int(5));

    let d = builder.to_immutable();
    assert_eq!(d.get("X").unwrap(), &Value::Int(5));
    assert_eq!(d.get_as("App.R", "X").unwrap(), &Value::Int(7));
    assert_eq!(d.get_as("App.D", "X").unwrap(), &Value::Int(5));
}

#[test]
fn three_level_chain_exposes_every_property() {
    let rt = runtime(vec![
        TypeSchema::new("App", "A").with_property(PropertyDescriptor::new("First", "string")),
        TypeSchema::new("App", "B")
            .with_base(TypeRef::new("App.A"))
            .with_property(PropertyDescriptor::new("Second", "int")),
        TypeSchema::new("App", "C")
            .with_base(TypeRef::new("App.B"))
            .with_property(PropertyDescriptor::new("Third", "bool")),
    ]);

    let default = rt.default_instance("App.C").unwrap();
    assert_eq!(default.property_names(), vec!["Third", "Second", "First"]);
    assert_eq!(default.get("First").unwrap(), &Value::Null);
    assert_eq!(default.get("Second").unwrap(), &Value::Int(0));
    assert_eq!(default.get("Third").unwrap(), &Value::Bool(false));

    let mut builder = rt.builder("App.C").unwrap();
    builder.set("First", "a").unwrap();
    assert!(builder.is_dirty());
    let c = builder
        .with("Second", 2)
        .unwrap()
        .with("Third", true)
        .unwrap()
        .to_immutable();
    assert_eq!(c.get("First").unwrap(), &Value::from("a"));
    assert_eq!(c.get_as("App.A", "First").unwrap(), &Value::from("a"));
    assert_eq!(c.type_name(), "App.C");

    let b_default = rt.default_instance("App.B").unwrap();
    assert!(!b_default.ptr_eq(&default));
    assert!(matches!(
        b_default.get("Third"),
        Err(ReflectError::UnknownProperty { .. })
    ));
}

#[test]
fn person_scenario_with_generated_equality() {
    let rt = runtime(vec![person(true)]);
    let default = rt.default_instance("App.Person").unwrap();

    assert!(default.get("Id").unwrap().is_null());
    let p1 = default.with("Id", "p1").unwrap();
    assert_eq!(p1.get("Id").unwrap().as_text(), Some("p1"));

    let mut builder = rt.builder_from("App.Person", Some(&default)).unwrap();
    builder.set("Id", "p1").unwrap();
    let built = builder.to_immutable();
    assert_eq!(built, p1);
    assert!(!built.ptr_eq(&p1));
}

#[test]
fn identity_equality_without_generated_equality() {
    let rt = runtime(vec![person(false)]);
    let default = rt.default_instance("App.Person").unwrap();
    let a = default.with("Id", "p1").unwrap();
    let b = default.with("Id", "p1").unwrap();
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
}

#[test]
fn projection_setters_run_immediately() {
    let rt = runtime(vec![person(false)]);
    let default = rt.default_instance("App.Person").unwrap();

    let older = default
        .with_projection("Age", |age| Value::Int(age.as_int().unwrap_or(0) + 1))
        .unwrap();
    assert_eq!(older.get("Age").unwrap(), &Value::Int(1));

    let mut builder = older
        .to_builder()
        .with_projection("Age", |age| Value::Int(age.as_int().unwrap_or(0) - 1))
        .unwrap();
    assert!(builder.is_dirty());
    assert_eq!(builder.to_immutable().get("Age").unwrap(), &Value::Int(0));
}

#[test]
fn construction_requires_a_builder() {
    let rt = runtime(vec![person(false)]);
    assert_eq!(
        rt.construct("App.Person", None).unwrap_err(),
        ReflectError::MissingBuilder {
            type_name: "App.Person".to_string()
        }
    );

    let builder = rt.builder("App.Person").unwrap();
    let constructed = rt.construct("App.Person", Some(&builder)).unwrap();
    assert!(!constructed.ptr_eq(builder.original()));
    assert_eq!(constructed.get("Age").unwrap(), &Value::Int(0));
}

#[test]
fn builders_reject_foreign_types() {
    let rt = runtime(vec![
        person(false),
        TypeSchema::new("App", "Pet").with_property(PropertyDescriptor::new("Name", "string")),
    ]);
    let pet = rt.default_instance("App.Pet").unwrap();
    assert!(matches!(
        rt.builder_from("App.Person", Some(&pet)),
        Err(ReflectError::OriginalMismatch { .. })
    ));

    let pet_builder = rt.builder("App.Pet").unwrap();
    assert!(matches!(
        rt.construct("App.Person", Some(&pet_builder)),
        Err(ReflectError::BuilderMismatch { .. })
    ));
}

#[test]
fn types_with_fatal_diagnostics_are_not_instantiable() {
    let rt = runtime(vec![TypeSchema::new("App", "Bag").with_property(
        PropertyDescriptor::new("Item", "string").with_category(PropertyCategory::Indexer),
    )]);

    match rt.default_instance("App.Bag") {
        Err(ReflectError::NotGenerated { reason, .. }) => {
            assert!(reason.contains("indexer-property"))
        }
        other => panic!("expected NotGenerated, got {other:?}"),
    }
    assert!(matches!(
        rt.builder("App.Missing"),
        Err(ReflectError::UnknownType { .. })
    ));
    assert!(rt.type_names().is_empty());
}

#[test]
fn chain_through_a_base_from_an_earlier_pass() {
    let mut entity = TypeSchema::new("Lib", "Entity")
        .with_property(PropertyDescriptor::new("Key", "string"));
    entity.origin = Origin::Imported {
        package: "Lib".to_string(),
    };
    entity.markers.builder = Some("Lib.Entity.Builder".to_string());

    let rt = runtime(vec![
        entity,
        TypeSchema::new("App", "Account")
            .with_base(TypeRef::new("Lib.Entity"))
            .with_property(PropertyDescriptor::new("Owner", "string")),
    ]);

    assert!(matches!(
        rt.default_instance("Lib.Entity"),
        Err(ReflectError::NotGenerated { .. })
    ));

    let account = rt
        .builder("App.Account")
        .unwrap()
        .with("Key", "k1")
        .unwrap()
        .with("Owner", "ann")
        .unwrap()
        .to_immutable();
    assert_eq!(account.get_as("Lib.Entity", "Key").unwrap(), &Value::from("k1"));
    assert_eq!(rt.type_names(), vec!["App.Account"]);
}

#[test]
fn nested_immutable_values_compare_by_their_contract() {
    let schemas: Vec<TypeSchema> = serde_yml::from_str(
        r#"
- name: Point
  namespace: Geo
  generated-immutable: true
  generate-equality: true
  properties:
    - { name: X, type: int }
    - { name: Y, type: int }
- name: Segment
  namespace: Geo
  generated-immutable: true
  properties:
    - { name: Start, type: Geo.Point }
    - { name: End, type: Geo.Point }
"#,
    )
    .unwrap();
    let rt = runtime(schemas);

    let origin = rt.default_instance("Geo.Point").unwrap();
    let a = origin.with("X", 1).unwrap();
    let segment = rt
        .default_instance("Geo.Segment")
        .unwrap()
        .with("Start", a.clone())
        .unwrap();
    assert_eq!(
        rt.default_instance("Geo.Segment").unwrap().get("Start").unwrap(),
        &Value::Null
    );

    /* a structurally equal point is not a change */
    let same = segment.with("Start", origin.with("X", 1).unwrap()).unwrap();
    assert!(same.ptr_eq(&segment));
}

fn measure() -> TypeSchema {
    TypeSchema::new("App", "Measure")
        .with_property(PropertyDescriptor::new("F", "double"))
        .with_property(PropertyDescriptor::new("Count", "int"))
        .with_equality()
}

#[test]
fn nan_is_its_own_current_value() {
    let rt = runtime(vec![measure()]);
    let v = rt
        .default_instance("App.Measure")
        .unwrap()
        .with("F", f64::NAN)
        .unwrap();

    let current = v.get("F").unwrap().clone();
    let mut builder = rt
        .builder_from("App.Measure", Some(&v))
        .unwrap()
        .with("F", current)
        .unwrap();
    assert!(!builder.is_dirty());
    assert!(builder.to_immutable().ptr_eq(&v));
    assert!(v.with("F", f64::NAN).unwrap().ptr_eq(&v));
}

#[test]
fn integer_written_to_a_float_property_is_widened() {
    let rt = runtime(vec![measure()]);
    let default = rt.default_instance("App.Measure").unwrap();

    assert!(default.with("F", 0).unwrap().ptr_eq(&default));

    let v = default.with("F", 2).unwrap();
    assert_eq!(v.get("F").unwrap(), &Value::Float(2.0));
}

#[test]
fn values_of_the_wrong_kind_are_rejected() {
    let rt = runtime(vec![measure()]);
    let default = rt.default_instance("App.Measure").unwrap();

    assert_eq!(
        default.with("Count", 1.5).unwrap_err(),
        ReflectError::TypeMismatch {
            type_name: "App.Measure".to_string(),
            property: "Count".to_string(),
            declared: "int".to_string(),
            found: "float",
        }
    );

    let mut builder = default.to_builder();
    assert!(matches!(
        builder.set("F", "fast"),
        Err(ReflectError::TypeMismatch { .. })
    ));
    assert!(!builder.is_dirty());
    assert!(builder.to_immutable().ptr_eq(&default));
}

#[test]
fn types_deriving_from_a_failing_base_are_not_instantiable() {
    let rt = runtime(vec![
        TypeSchema::new("App", "Bag").with_property(
            PropertyDescriptor::new("Item", "string").with_category(PropertyCategory::Indexer),
        ),
        TypeSchema::new("App", "Sack")
            .with_base(TypeRef::new("App.Bag"))
            .with_property(PropertyDescriptor::new("Size", "int")),
    ]);

    match rt.builder("App.Sack") {
        Err(ReflectError::NotGenerated { reason, .. }) => {
            assert!(reason.contains("App.Bag"))
        }
        other => panic!("expected NotGenerated, got {other:?}"),
    }
    assert!(rt.type_names().is_empty());
}
