use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Name of the universal root object type. A base reference to it means "no base".
pub const ROOT_OBJECT_TYPE: &str = "object";

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyCategory {
    #[default]
    Plain,
    Indexer,
    EventBacked,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub category: PropertyCategory,
    #[serde(default = "default_true")]
    pub read_only: bool,
    /// Backed by a compiler-provided field (no user-written accessor body).
    #[serde(default = "default_true")]
    pub auto: bool,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            category: PropertyCategory::Plain,
            read_only: true,
            auto: true,
        }
    }

    pub fn with_category(mut self, category: PropertyCategory) -> Self {
        self.category = category;
        self
    }

    /// Plain, read-only and auto-backed: the only shape the generator takes over.
    pub fn is_generated(&self) -> bool {
        self.category == PropertyCategory::Plain && self.read_only && self.auto
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct TypeRef {
    /// Qualified name (`Namespace.Name`), or a simple name for the global namespace.
    pub name: String,
    #[serde(default)]
    pub generic_args: Vec<String>,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_args: Vec::new(),
        }
    }

    pub fn with_args(name: impl Into<String>, args: &[&str]) -> Self {
        Self {
            name: name.into(),
            generic_args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn is_root_object(&self, root_object: &str) -> bool {
        self.name == root_object
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.generic_args.is_empty() {
            write!(f, "<{}>", self.generic_args.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct TypeMarkers {
    /// The type asks for immutable generation.
    #[serde(default)]
    pub generated_immutable: bool,
    /// The user declaration already carries the plain "immutable" marker.
    #[serde(default)]
    pub immutable: bool,
    /// Builder produced by an earlier pass, when the type comes from another unit.
    #[serde(default)]
    pub builder: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Semantics {
    #[default]
    Reference,
    Value,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::Private => "private",
        };
        f.write_str(keyword)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Declaration {
    #[serde(default)]
    pub semantics: Semantics,
    /// Declared open to augmentation by generated members.
    #[serde(default = "default_true")]
    pub partial: bool,
    #[serde(default)]
    pub accessibility: Accessibility,
    /// The user already wrote a zero-argument constructor.
    #[serde(default)]
    pub declares_default_constructor: bool,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            semantics: Semantics::Reference,
            partial: true,
            accessibility: Accessibility::Public,
            declares_default_constructor: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    #[default]
    Local,
    Imported {
        package: String,
    },
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct TypeSchema {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub generic_params: Vec<String>,
    #[serde(default)]
    pub base: Option<TypeRef>,
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    #[serde(default)]
    pub generate_equality: bool,
    #[serde(flatten)]
    pub markers: TypeMarkers,
    #[serde(default)]
    pub declaration: Declaration,
    #[serde(default, skip_serializing)]
    pub origin: Origin,
}

impl TypeSchema {
    /// A local, generation-enabled reference type with no base and no properties.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            generic_params: Vec::new(),
            base: None,
            properties: Vec::new(),
            generate_equality: false,
            markers: TypeMarkers {
                generated_immutable: true,
                ..TypeMarkers::default()
            },
            declaration: Declaration::default(),
            origin: Origin::Local,
        }
    }

    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_generic_params(mut self, params: &[&str]) -> Self {
        self.generic_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_equality(mut self) -> Self {
        self.generate_equality = true;
        self
    }

    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Open generic definition as written in type markers: `Box<>`, `Pair<,>`.
    pub fn open_definition(&self) -> String {
        match self.generic_params.len() {
            0 => self.name.clone(),
            arity => format!("{}<{}>", self.name, ",".repeat(arity - 1)),
        }
    }

    /// The base reference, unless it is absent or the universal root object.
    pub fn declared_base(&self, root_object: &str) -> Option<&TypeRef> {
        self.base.as_ref().filter(|b| !b.is_root_object(root_object))
    }

    pub fn is_local(&self) -> bool {
        matches!(self.origin, Origin::Local)
    }

    /// Properties the generator takes over, in declaration order.
    pub fn generated_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.is_generated())
    }
}

fn default_true() -> bool {
    true
}
