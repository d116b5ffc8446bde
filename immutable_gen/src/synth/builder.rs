/* Builder synthesis.
   The builder of a type tracks, per own property, whether the property was
   changed relative to the original instance, and turns its state back into an
   immutable value on demand:
   - State (dirty flag, original, cached result) is declared by root builders
     only; derived builders reuse it so a change anywhere in the chain marks the
     whole object dirty and the chain shares one original.
   - Writes compare against the original's value: equal values clear the
     property's set-flag, different values set it. Every write drops the cache.
   - Materialize returns the cache, else a new instance when dirty (unless it
     equals the original), else the original. */

use super::names::SymbolNames;
use super::{fluent_setters, FluentSetter};
use crate::flatten::FlattenedProperty;
use crate::resolve::BaseTypeInfo;
use crate::schema::{Accessibility, GeneratorOptions, TypeSchema};
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BuilderParent {
    None,
    /* Base builder generated in the same pass */
    Local { builder_type: String },
    /* Base builder compiled by an earlier pass; the emitter locates it from the base type */
    External { base_type: String },
    /* Nothing to extend; the type carries a fatal diagnostic */
    Missing { base_type: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct StateField {
    pub name: String,
    pub type_name: String,
    pub initial: String,
}

/* Declared once, on the root builder of a chain */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SharedState {
    pub dirty_flag: StateField,
    /* Never unset; absent originals are replaced by the default instance */
    pub original: StateField,
    pub cached_result: StateField,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct PropertySlot {
    pub property: String,
    pub property_type: String,
    pub backing_field: String,
    pub set_flag: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BuilderConstructor {
    /* `Builder(original)`: falls back to the default instance when absent */
    FromOriginal {
        parameter: String,
        fallback: String,
        chains_to_base: bool,
    },
    /* `Builder()`: same as passing the default instance */
    Empty {
        original: String,
        chains_to_base: bool,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WriteStep {
    ClearSetFlag,
    /* Back to the zero-value, releasing any held reference */
    ResetBackingField,
    /* Dirty again only if another set-flag of the chain is still raised */
    RecomputeDirty,
    SetSetFlag,
    StoreValue,
    MarkDirty,
    InvalidateCache,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ReadRule {
    pub set_flag: String,
    pub backing_field: String,
    /* Read from the shared original when the set-flag is down */
    pub original_field: String,
    /* Derived builders view the shared original as their own type */
    pub original_cast: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct WriteRule {
    /* Compared by value equality, never identity */
    pub compare_with: String,
    pub when_equal: Vec<WriteStep>,
    pub when_different: Vec<WriteStep>,
    pub always: Vec<WriteStep>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Accessor {
    pub property: String,
    pub property_type: String,
    pub hides_inherited: bool,
    pub read: ReadRule,
    pub write: WriteRule,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MaterializeStep {
    ReturnCached,
    /* Build from current values; keep (and cache) the original if equal to it */
    WhenDirtyBuildNew { keep_original_if_equal: bool },
    CacheAndReturnOriginal,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Materialize {
    pub method: String,
    pub result_type: String,
    pub hides_inherited: bool,
    pub steps: Vec<MaterializeStep>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct BuilderPlan {
    /* `Builder` */
    pub type_name: String,
    /* `Person.Builder` */
    pub full_name: String,
    pub accessibility: Accessibility,
    pub parent: BuilderParent,
    pub hides_inherited: bool,
    pub shared_state: Option<SharedState>,
    pub slots: Vec<PropertySlot>,
    pub constructors: Vec<BuilderConstructor>,
    pub accessors: Vec<Accessor>,
    pub materialize: Materialize,
    pub setters: Vec<FluentSetter>,
    /* Not safe for concurrent use; one owner mutates it sequentially */
    pub single_owner: bool,
}

impl BuilderPlan {
    pub fn declares_state(&self) -> bool {
        self.shared_state.is_some()
    }
}

pub const DIRTY_FLAG: &str = "_isDirty";
pub const ORIGINAL_FIELD: &str = "_original";
pub const CACHED_RESULT: &str = "_cachedResult";

pub fn backing_field(property: &str) -> String {
    format!("_{property}")
}

pub fn set_flag(property: &str) -> String {
    format!("_is{property}Set")
}

/* Equal to the original: drop the change. Different: record it. Either way the
   cached result no longer matches the builder. */
pub fn standard_write_rule(property: &str) -> WriteRule {
    WriteRule {
        compare_with: format!("{ORIGINAL_FIELD}.{property}"),
        when_equal: vec![
            WriteStep::ClearSetFlag,
            WriteStep::ResetBackingField,
            WriteStep::RecomputeDirty,
        ],
        when_different: vec![
            WriteStep::SetSetFlag,
            WriteStep::StoreValue,
            WriteStep::MarkDirty,
        ],
        always: vec![WriteStep::InvalidateCache],
    }
}

pub fn standard_materialize_steps() -> Vec<MaterializeStep> {
    vec![
        MaterializeStep::ReturnCached,
        MaterializeStep::WhenDirtyBuildNew {
            keep_original_if_equal: true,
        },
        MaterializeStep::CacheAndReturnOriginal,
    ]
}

pub fn synthesize_builder(
    schema: &TypeSchema,
    names: &SymbolNames,
    base_info: &BaseTypeInfo,
    properties: &[FlattenedProperty],
    options: &GeneratorOptions,
) -> BuilderPlan {
    let value_type = &names.name_with_generics;
    let full_name = format!("{}.{}", value_type, options.builder_name);
    let default_ref = format!("{}.{}", value_type, options.default_member);
    let derived = base_info.is_derived();

    let parent = match base_info {
        BaseTypeInfo::Root => BuilderParent::None,
        BaseTypeInfo::Resolved {
            base_builder_type, ..
        } => BuilderParent::Local {
            builder_type: base_builder_type.clone(),
        },
        BaseTypeInfo::External { base_type } => BuilderParent::External {
            base_type: base_type.clone(),
        },
        BaseTypeInfo::Unresolved { base_type } => BuilderParent::Missing {
            base_type: base_type.clone(),
        },
    };

    let shared_state = (!derived).then(|| SharedState {
        dirty_flag: StateField {
            name: DIRTY_FLAG.to_string(),
            type_name: "bool".to_string(),
            initial: "false".to_string(),
        },
        original: StateField {
            name: ORIGINAL_FIELD.to_string(),
            type_name: value_type.clone(),
            initial: default_ref.clone(),
        },
        cached_result: StateField {
            name: CACHED_RESULT.to_string(),
            type_name: value_type.clone(),
            initial: "none".to_string(),
        },
    });

    let constructors = vec![
        BuilderConstructor::FromOriginal {
            parameter: "original".to_string(),
            fallback: default_ref.clone(),
            chains_to_base: derived,
        },
        BuilderConstructor::Empty {
            original: default_ref,
            chains_to_base: derived,
        },
    ];

    let slots = properties
        .iter()
        .map(|p| PropertySlot {
            property: p.name().to_string(),
            property_type: p.type_name().to_string(),
            backing_field: backing_field(p.name()),
            set_flag: set_flag(p.name()),
        })
        .collect();

    let accessors = properties
        .iter()
        .map(|p| Accessor {
            property: p.name().to_string(),
            property_type: p.type_name().to_string(),
            hides_inherited: p.is_shadow,
            read: ReadRule {
                set_flag: set_flag(p.name()),
                backing_field: backing_field(p.name()),
                original_field: ORIGINAL_FIELD.to_string(),
                original_cast: derived.then(|| value_type.clone()),
            },
            write: standard_write_rule(p.name()),
        })
        .collect();

    let materialize = Materialize {
        method: options.materialize_method.clone(),
        result_type: value_type.clone(),
        hides_inherited: derived,
        steps: standard_materialize_steps(),
    };

    BuilderPlan {
        type_name: options.builder_name.clone(),
        setters: fluent_setters(properties, options, &full_name, false),
        full_name,
        accessibility: schema.declaration.accessibility,
        parent,
        hides_inherited: derived,
        shared_state,
        slots,
        constructors,
        accessors,
        materialize,
        single_owner: true,
    }
}
