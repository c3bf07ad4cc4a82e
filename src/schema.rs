//! Schema descriptions for form decoding.
//!
//! A [`Schema`] declares the shape a flat submission is expected to take:
//! objects with named fields, homogeneous arrays, tagged unions, optional
//! and nullable wrappers, and string-ish primitives. The set of constructs
//! is closed; the decoder dispatches on it exhaustively.
//!
//! Schemas are plain data: immutable, caller-owned, only read by the
//! decoder. They serialize with an internal `type` tag so they can be
//! declared in JSON as well as in code.

use serde::{Deserialize, Serialize};

/// Expected shape of a decoded submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Schema {
    /// Nested object; fields keep their declaration order.
    Object {
        /// Declared fields, in order.
        fields: Vec<(String, Schema)>,
    },
    /// Homogeneous array with a single element shape.
    Array {
        /// Element shape (boxed to allow recursion).
        element: Box<Schema>,
    },
    /// Tagged union: the string value of the discriminator field selects
    /// which variant shape applies.
    Union {
        /// Discriminator field name.
        tag: String,
        /// Discriminator value to variant shape, in declaration order.
        /// Each variant shape is an [`Schema::Object`] that declares the
        /// discriminator as one of its own fields.
        variants: Vec<(String, Schema)>,
    },
    /// The field may be left out of the submission entirely.
    Optional {
        /// Wrapped shape.
        inner: Box<Schema>,
    },
    /// The field may be submitted empty, decoding to null.
    Nullable {
        /// Wrapped shape.
        inner: Box<Schema>,
    },
    /// UTF-8 string.
    String,
    /// Floating-point number.
    Number,
    /// Checkbox-style boolean.
    Boolean,
    /// Exact expected string value.
    Literal {
        /// The expected value.
        value: String,
    },
    /// One of a fixed set of string values.
    Enum {
        /// Allowed values.
        values: Vec<String>,
    },
}

impl Schema {
    /// Create an object schema from `(name, shape)` pairs.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Schema)>) -> Self {
        Schema::Object {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Create an array schema.
    pub fn array(element: Schema) -> Self {
        Schema::Array {
            element: Box::new(element),
        }
    }

    /// Create a tagged union from `(discriminator value, object shape)` pairs.
    pub fn union<K: Into<String>>(
        tag: impl Into<String>,
        variants: impl IntoIterator<Item = (K, Schema)>,
    ) -> Self {
        Schema::Union {
            tag: tag.into(),
            variants: variants.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Create a literal schema expecting exactly `value`.
    pub fn literal(value: impl Into<String>) -> Self {
        Schema::Literal {
            value: value.into(),
        }
    }

    /// Create an enum schema over a fixed value set.
    pub fn enumeration<V: Into<String>>(values: impl IntoIterator<Item = V>) -> Self {
        Schema::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Wrap this schema so the field may be left out entirely.
    pub fn optional(self) -> Self {
        Schema::Optional {
            inner: Box::new(self),
        }
    }

    /// Wrap this schema so an empty submission decodes to null.
    pub fn nullable(self) -> Self {
        Schema::Nullable {
            inner: Box::new(self),
        }
    }

    /// Returns the construct name for error messages and traces.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Schema::Object { .. } => "object",
            Schema::Array { .. } => "array",
            Schema::Union { .. } => "union",
            Schema::Optional { .. } => "optional",
            Schema::Nullable { .. } => "nullable",
            Schema::String => "string",
            Schema::Number => "number",
            Schema::Boolean => "boolean",
            Schema::Literal { .. } => "literal",
            Schema::Enum { .. } => "enum",
        }
    }

    /// Whether this is a primitive construct, read from a single flat key.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Schema::String
                | Schema::Number
                | Schema::Boolean
                | Schema::Literal { .. }
                | Schema::Enum { .. }
        )
    }
}
