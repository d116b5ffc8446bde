/* Human-readable member outline of a synthesized type. Diagnostics come first so
   a reader sees why the type will not build before reading its members. */

use super::{CodeEmitter, EmitError};
use crate::driver::TypeOutput;
use crate::resolve::BaseTypeInfo;
use crate::synth::builder::{BuilderConstructor, BuilderParent, BuilderPlan, MaterializeStep};
use crate::synth::value::{Conversion, MarkerStatus, ValuePlan};
use crate::synth::{FluentSetter, SetterKind};
use crate::validate::Severity;
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct OutlineEmitter {
    pub indent: usize,
}

impl Default for OutlineEmitter {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

impl OutlineEmitter {
    fn pad(&self, level: usize) -> String {
        " ".repeat(self.indent * level)
    }

    fn emit_header(&self, out: &mut String, output: &TypeOutput) -> Result<(), EmitError> {
        writeln!(out, "// {}", output.names.qualified)?;
        for diagnostic in &output.diagnostics {
            let directive = match diagnostic.severity {
                Severity::Fatal => "#error",
                Severity::Advisory => "#warning",
            };
            writeln!(out, "{} {}: {}", directive, diagnostic.code.as_str(), diagnostic.message)?;
        }
        writeln!(out)?;

        let value = &output.value;
        if value.markers.immutable == MarkerStatus::Emit {
            writeln!(out, "@immutable")?;
        }
        if value.markers.equality {
            writeln!(out, "@generated-equality")?;
        }
        writeln!(out, "@builder({})", value.markers.builder)?;

        let extends = match &output.base {
            BaseTypeInfo::Root => String::new(),
            BaseTypeInfo::Resolved {
                base_value_type, ..
            } => format!(" : {base_value_type}"),
            BaseTypeInfo::External { base_type } | BaseTypeInfo::Unresolved { base_type } => {
                format!(" : {base_type}")
            }
        };
        writeln!(out, "{} type {}{}", value.accessibility, value.type_name, extends)?;
        Ok(())
    }

    fn emit_value(&self, out: &mut String, value: &ValuePlan) -> Result<(), EmitError> {
        let p1 = self.pad(1);
        let p2 = self.pad(2);
        let default = &value.default_instance;

        writeln!(
            out,
            "{p1}static {}{}: {} = {}()",
            if default.hides_inherited { "new " } else { "" },
            default.member,
            default.type_name,
            value.type_name
        )?;
        writeln!(
            out,
            "{p1}{} ctor(){}",
            value.guard_constructor.accessibility,
            if value.guard_constructor.chains_to_base { " : base()" } else { "" }
        )?;

        let ctor = &value.builder_constructor;
        writeln!(
            out,
            "{p1}ctor({}: {}){}",
            ctor.parameter,
            ctor.builder_type,
            if ctor.chains_to_base {
                format!(" : base({})", ctor.parameter)
            } else {
                String::new()
            }
        )?;
        if ctor.rejects_absent {
            writeln!(out, "{p2}require {} present", ctor.parameter)?;
        }
        for assignment in &ctor.assignments {
            writeln!(out, "{p2}{} = {}", assignment.property, assignment.source)?;
        }

        for conversion in &value.conversions {
            match conversion {
                Conversion::ValueToBuilder { builder_type } => {
                    writeln!(out, "{p1}implicit {} -> {}", value.type_name, builder_type)?
                }
                Conversion::BuilderToValue { via_method } => writeln!(
                    out,
                    "{p1}implicit builder -> {} via {}()",
                    value.type_name, via_method
                )?,
            }
        }

        self.emit_setters(out, &value.setters, 1)
    }

    fn emit_setters(
        &self,
        out: &mut String,
        setters: &[FluentSetter],
        level: usize,
    ) -> Result<(), EmitError> {
        let pad = self.pad(level);
        for setter in setters {
            let argument = match setter.kind {
                SetterKind::Literal => format!("value: {}", setter.property_type),
                SetterKind::Projection => format!(
                    "project: fn({}) -> {}",
                    setter.property_type, setter.property_type
                ),
            };
            write!(
                out,
                "{pad}{}{}({}) -> {}",
                if setter.hides_inherited { "new " } else { "" },
                setter.method,
                argument,
                setter.returns
            )?;
            if setter.via_transient_builder {
                write!(out, "  [via transient builder]")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn emit_builder(&self, out: &mut String, builder: &BuilderPlan) -> Result<(), EmitError> {
        let p1 = self.pad(1);
        let p2 = self.pad(2);
        let p3 = self.pad(3);

        let parent = match &builder.parent {
            BuilderParent::None => String::new(),
            BuilderParent::Local { builder_type } => format!(" : {builder_type}"),
            BuilderParent::External { base_type } => format!(" : builder of {base_type}"),
            BuilderParent::Missing { base_type } => format!(" : <missing builder of {base_type}>"),
        };
        writeln!(out)?;
        writeln!(
            out,
            "{p1}{} {}type {}{}",
            builder.accessibility,
            if builder.hides_inherited { "new " } else { "" },
            builder.full_name,
            parent
        )?;
        if builder.single_owner {
            writeln!(out, "{p2}// not thread-safe: single owner")?;
        }

        if let Some(state) = &builder.shared_state {
            for field in [&state.dirty_flag, &state.original, &state.cached_result] {
                writeln!(out, "{p2}field {}: {} = {}", field.name, field.type_name, field.initial)?;
            }
        }
        for slot in &builder.slots {
            writeln!(out, "{p2}field {}: bool = false", slot.set_flag)?;
            writeln!(out, "{p2}field {}: {} = zero", slot.backing_field, slot.property_type)?;
        }

        for ctor in &builder.constructors {
            match ctor {
                BuilderConstructor::FromOriginal {
                    parameter,
                    fallback,
                    chains_to_base,
                } => writeln!(
                    out,
                    "{p2}ctor({parameter}){}  [absent -> {fallback}]",
                    if *chains_to_base { " : base(...)" } else { "" }
                )?,
                BuilderConstructor::Empty {
                    original,
                    chains_to_base,
                } => writeln!(
                    out,
                    "{p2}ctor(){}  [original = {original}]",
                    if *chains_to_base { " : base(...)" } else { "" }
                )?,
            }
        }

        for accessor in &builder.accessors {
            let original = match &accessor.read.original_cast {
                Some(cast) => format!("({cast}){}", accessor.read.original_field),
                None => accessor.read.original_field.clone(),
            };
            writeln!(
                out,
                "{p2}{}property {}: {}",
                if accessor.hides_inherited { "new " } else { "" },
                accessor.property,
                accessor.property_type
            )?;
            writeln!(
                out,
                "{p3}get: {} ? {} : {}.{}",
                accessor.read.set_flag, accessor.read.backing_field, original, accessor.property
            )?;
            writeln!(
                out,
                "{p3}set: value == {} ? {:?} : {:?}; then {:?}",
                accessor.write.compare_with,
                accessor.write.when_equal,
                accessor.write.when_different,
                accessor.write.always
            )?;
        }

        let materialize = &builder.materialize;
        writeln!(
            out,
            "{p2}{}{}() -> {}",
            if materialize.hides_inherited { "new " } else { "" },
            materialize.method,
            materialize.result_type
        )?;
        for step in &materialize.steps {
            let line = match step {
                MaterializeStep::ReturnCached => "return cached result if present".to_string(),
                MaterializeStep::WhenDirtyBuildNew {
                    keep_original_if_equal,
                } => {
                    if *keep_original_if_equal {
                        "if dirty: build new, keep original when equal".to_string()
                    } else {
                        "if dirty: build new".to_string()
                    }
                }
                MaterializeStep::CacheAndReturnOriginal => "cache and return original".to_string(),
            };
            writeln!(out, "{p3}{line}")?;
        }

        self.emit_setters(out, &builder.setters, 2)
    }
}

impl CodeEmitter for OutlineEmitter {
    fn file_name(&self, output: &TypeOutput) -> String {
        format!("{}.generated.txt", output.names.file_stem)
    }

    fn emit(&self, output: &TypeOutput) -> Result<String, EmitError> {
        let mut out = String::new();
        self.emit_header(&mut out, output)?;
        writeln!(out, "{{")?;
        self.emit_value(&mut out, &output.value)?;
        self.emit_builder(&mut out, &output.builder)?;
        writeln!(out, "}}")?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::GenerationPass;
    use crate::schema::catalog::TypeCatalog;
    use crate::schema::{GeneratorOptions, PropertyDescriptor, Semantics, TypeRef, TypeSchema};

    fn outline(schemas: Vec<TypeSchema>, target: &str) -> String {
        let options = GeneratorOptions::default();
        let catalog = TypeCatalog::new(schemas, &options).unwrap();
        let pass = GenerationPass::run(&catalog, &options);
        OutlineEmitter::default().emit(pass.get(target).unwrap()).unwrap()
    }

    #[test]
    fn root_type_outline() {
        let text = outline(
            vec![TypeSchema::new("App", "Person")
                .with_property(PropertyDescriptor::new("Id", "string"))
                .with_equality()],
            "App.Person",
        );

        assert!(text.starts_with("// App.Person\n"));
        assert!(text.contains("@immutable\n"));
        assert!(text.contains("@generated-equality\n"));
        assert!(text.contains("@builder(Person.Builder)"));
        assert!(text.contains("static Default: Person = Person()"));
        assert!(text.contains("field _isDirty: bool = false"));
        assert!(text.contains("field _isIdSet: bool = false"));
        assert!(text.contains("WithId(value: string) -> Person  [via transient builder]"));
        assert!(text.contains("ToImmutable() -> Person"));
    }

    #[test]
    fn derived_outline_marks_hidden_members() {
        let text = outline(
            vec![
                TypeSchema::new("App", "R").with_property(PropertyDescriptor::new("X", "int")),
                TypeSchema::new("App", "D")
                    .with_base(TypeRef::new("App.R"))
                    .with_property(PropertyDescriptor::new("X", "int")),
            ],
            "App.D",
        );

        assert!(text.contains("public type D : R"));
        assert!(text.contains("static new Default: D"));
        assert!(text.contains("new type D.Builder : R.Builder"));
        assert!(text.contains("new property X: int"));
        assert!(!text.contains("field _isDirty"));
    }

    #[test]
    fn fatal_diagnostics_lead_the_outline() {
        let mut point = TypeSchema::new("App", "Point");
        point.declaration.semantics = Semantics::Value;
        let text = outline(vec![point], "App.Point");
        let second_line = text.lines().nth(1).unwrap();
        assert!(second_line.starts_with("#error value-semantics:"));
    }
}
