/* Dynamic property values held by instances and builders */

use crate::instance::Instance;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Value {
    /* Zero-value of every reference-like type */
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    /* Compared by the referenced type's equality contract */
    Object(Instance),
}

const INTEGER_TYPES: &[&str] = &[
    "byte", "sbyte", "short", "ushort", "int", "uint", "long", "ulong", "nint", "nuint", "i8",
    "i16", "i32", "i64", "u8", "u16", "u32", "u64", "isize", "usize",
];

const FLOAT_TYPES: &[&str] = &["float", "double", "decimal", "f32", "f64"];

impl Value {
    /// Zero-value of a semantic type name, as held by default instances and
    /// by builder backing fields that carry no change.
    pub fn zero_for(type_name: &str) -> Value {
        let name = type_name.trim();
        if name == "bool" {
            Value::Bool(false)
        } else if INTEGER_TYPES.contains(&name) {
            Value::Int(0)
        } else if FLOAT_TYPES.contains(&name) {
            Value::Float(0.0)
        } else {
            Value::Null
        }
    }

    /// Converts `self` to the kind of `zero`, the zero-value of the slot being
    /// written. Integers widen into float slots. Slots whose zero is `Null`
    /// hold reference-like values and accept any value.
    pub(crate) fn coerce_like(self, zero: &Value) -> Option<Value> {
        match (zero, self) {
            (Value::Null, v) => Some(v),
            (Value::Bool(_), v @ Value::Bool(_)) => Some(v),
            (Value::Int(_), v @ Value::Int(_)) => Some(v),
            (Value::Float(_), v @ Value::Float(_)) => Some(v),
            (Value::Float(_), Value::Int(i)) => Some(Value::Float(i as f64)),
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }
}

/* Floats are equal when bitwise identical or numerically equal, so NaN equals
   itself and 0.0 equals -0.0 */
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits() || a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Instance> for Value {
    fn from(v: Instance) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(instance) => write!(f, "{}", instance.type_name()),
        }
    }
}
