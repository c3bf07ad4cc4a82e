//! Decoded values produced by the structural decoder.
//!
//! [`Decoded`] mirrors the schema's shape, with one addition JSON does not
//! have: [`Decoded::Absent`] marks a value that was never submitted, as
//! distinct from [`Decoded::Null`] (an explicitly empty nullable) and from
//! an empty string.

use serde_json::{Map, Number, Value};

/// A nested value rebuilt from a flat submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// No value at all: the key was never submitted.
    Absent,
    /// An explicitly empty nullable.
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Decoded>),
    /// Fields in declared schema order.
    Object(Vec<(String, Decoded)>),
}

impl Decoded {
    /// Returns the value's kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Decoded::Absent => "absent",
            Decoded::Null => "null",
            Decoded::Bool(_) => "boolean",
            Decoded::Number(_) => "number",
            Decoded::String(_) => "string",
            Decoded::Array(_) => "array",
            Decoded::Object(_) => "object",
        }
    }

    /// The emptiness test behind optional collapse.
    ///
    /// A scalar is empty iff it is [`Decoded::Absent`]; null always counts
    /// as empty; an array is empty iff it has no elements; an object is
    /// empty iff every field is strictly absent. Every optional-collapse
    /// site goes through this one predicate.
    pub fn is_effectively_absent(&self) -> bool {
        match self {
            Decoded::Absent | Decoded::Null => true,
            Decoded::Array(items) => items.is_empty(),
            Decoded::Object(fields) => fields.iter().all(|(_, v)| matches!(v, Decoded::Absent)),
            _ => false,
        }
    }

    /// Looks up an object field by name.
    pub fn get(&self, name: &str) -> Option<&Decoded> {
        match self {
            Decoded::Object(fields) => fields.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Decoded::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Decoded::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Decoded::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Decoded::Absent)
    }

    /// Bridges to `serde_json::Value` for validators that consume JSON.
    ///
    /// Absent object fields are omitted; absent array elements become null,
    /// since arrays must keep their inferred length.
    pub fn to_json(&self) -> Value {
        match self {
            Decoded::Absent | Decoded::Null => Value::Null,
            Decoded::Bool(b) => Value::Bool(*b),
            Decoded::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
            Decoded::String(s) => Value::String(s.clone()),
            Decoded::Array(items) => Value::Array(items.iter().map(Decoded::to_json).collect()),
            Decoded::Object(fields) => {
                let mut map = Map::new();
                for (name, value) in fields {
                    if !value.is_absent() {
                        map.insert(name.clone(), value.to_json());
                    }
                }
                Value::Object(map)
            }
        }
    }
}
