/* Per-type precondition checks. Violations are attached to the type's own
   output; they never stop generation of the type or of any other type. */

use crate::resolve::BaseTypeInfo;
use crate::schema::{PropertyCategory, Semantics, TypeSchema};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /* Generation proceeds; output may need manual correction */
    Advisory,
    /* Emitted output is meant to fail the downstream build */
    Fatal,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    NotPartial,
    ValueSemantics,
    UnresolvedAncestor,
    IndexerProperty,
    EventProperty,
    CompetingDefaultConstructor,
}

impl DiagnosticCode {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::NotPartial => Severity::Advisory,
            _ => Severity::Fatal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::NotPartial => "not-partial",
            DiagnosticCode::ValueSemantics => "value-semantics",
            DiagnosticCode::UnresolvedAncestor => "unresolved-ancestor",
            DiagnosticCode::IndexerProperty => "indexer-property",
            DiagnosticCode::EventProperty => "event-property",
            DiagnosticCode::CompetingDefaultConstructor => "competing-default-constructor",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl Diagnostic {
    fn new(code: DiagnosticCode, message: String) -> Self {
        Self {
            severity: code.severity(),
            code,
            message,
            property: None,
        }
    }

    fn for_property(code: DiagnosticCode, property: &str, message: String) -> Self {
        Self {
            property: Some(property.to_string()),
            ..Self::new(code, message)
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Advisory => "warning",
            Severity::Fatal => "error",
        };
        write!(f, "{}[{}]: {}", level, self.code.as_str(), self.message)
    }
}

/* `display_name` is the type name with its generic parameters */
pub fn validate(schema: &TypeSchema, base_info: &BaseTypeInfo, display_name: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if !schema.declaration.partial {
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::NotPartial,
            format!("type {display_name} should be declared partial so generated members can be added to it"),
        ));
    }

    if schema.declaration.semantics == Semantics::Value {
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::ValueSemantics,
            format!("type {display_name} must be a reference type, not a value type"),
        ));
    }

    if let BaseTypeInfo::Unresolved { base_type } = base_info {
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::UnresolvedAncestor,
            format!(
                "type {display_name} must derive from an immutable type; base {base_type} is not generated and has no builder"
            ),
        ));
    }

    if schema.declaration.declares_default_constructor {
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::CompetingDefaultConstructor,
            format!(
                "type {display_name} declares a zero-argument constructor; instances must be created through its builder"
            ),
        ));
    }

    for property in &schema.properties {
        match property.category {
            PropertyCategory::Indexer => diagnostics.push(Diagnostic::for_property(
                DiagnosticCode::IndexerProperty,
                &property.name,
                format!(
                    "indexer {} is not supported on immutable type {display_name}; remove it",
                    property.name
                ),
            )),
            PropertyCategory::EventBacked => diagnostics.push(Diagnostic::for_property(
                DiagnosticCode::EventProperty,
                &property.name,
                format!(
                    "event-backed property {} is not supported on immutable type {display_name}",
                    property.name
                ),
            )),
            PropertyCategory::Plain => {}
        }
    }

    diagnostics
}
