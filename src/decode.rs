//! Structural decoding of flat form data into nested values.
//!
//! [`decode`] walks a [`Schema`] against a [`FlatSource`] and rebuilds the
//! nested value the schema describes, inferring array lengths, selecting
//! union variants, and deciding presence for optional and nullable fields
//! purely from which flat keys exist.
//!
//! Decoding is total over user data: malformed or missing input becomes
//! [`Decoded::Absent`] or [`Decoded::Null`] for a downstream validator to
//! flag, never an error. [`DecodeError`] is reserved for schema misuse.
//!
//! # Absence precedence for nested wrappers
//!
//! Absence resolves at the outermost wrapper. `Nullable(Optional(T))` with
//! no key yields null, because nullable inspects the raw value before
//! recursing. `Optional(Nullable(T))` with no key yields absent, because
//! nullable is not a primitive, so the optional recurses first and the
//! inner null counts as empty under the collapse test.

use thiserror::Error;
use tracing::trace;

use crate::schema::Schema;
use crate::source::FlatSource;
use crate::value::Decoded;

/// Raw values a checkbox-style boolean treats as false.
const FALSY_VOCABULARY: [&str; 5] = ["undefined", "null", "0", "false", "off"];

/// Result type for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Contract defects raised during decoding.
///
/// Bad user input never produces one of these; a `DecodeError` means the
/// schema itself is misused and must not be caught or retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A primitive construct was reached at the root, where there is no
    /// flat key to read from. Wrap the primitive in an object.
    #[error("primitive schema `{kind}` reached with no path to read from")]
    PrimitiveAtRoot {
        /// Construct name of the offending schema.
        kind: &'static str,
    },
}

/// Decodes a flat submission into the nested value `schema` describes.
///
/// Pure function of its arguments: no state is kept between calls and the
/// source is only read.
pub fn decode<S: FlatSource + ?Sized>(schema: &Schema, source: &S) -> DecodeResult<Decoded> {
    decode_at(schema, source, None)
}

fn decode_at<S: FlatSource + ?Sized>(
    schema: &Schema,
    source: &S,
    path: Option<&str>,
) -> DecodeResult<Decoded> {
    trace!(
        kind = schema.kind_name(),
        path = path.unwrap_or("<root>"),
        "decode"
    );

    let prefix = match path {
        Some(p) => format!("{p}."),
        None => String::new(),
    };

    match schema {
        Schema::Object { fields } => decode_fields(fields, source, &prefix),
        Schema::Union { tag, variants } => {
            let tag_key = format!("{prefix}{tag}");
            let Some(selector) = non_empty(source.get(&tag_key)) else {
                return Ok(Decoded::Absent);
            };
            let Some((_, variant)) = variants.iter().find(|(value, _)| value == selector) else {
                trace!(tag = %tag_key, value = selector, "no union variant matches");
                return Ok(Decoded::Absent);
            };
            // Same path: the variant declares the discriminator as one of
            // its own fields, so it is re-read there and appears once.
            decode_at(variant, source, path)
        }
        Schema::Array { element } => {
            let mut max_index: Option<usize> = None;
            for key in source.keys() {
                let Some(rest) = key.strip_prefix(&prefix) else {
                    continue;
                };
                let head = rest.split('.').next().unwrap_or("");
                if let Ok(i) = head.parse::<usize>() {
                    max_index = Some(max_index.map_or(i, |m| m.max(i)));
                }
            }
            // Length is highest observed index + 1; gaps still get an
            // element, which decodes against an empty sub-source.
            let len = max_index.map_or(0, |m| m + 1);
            let mut items = Vec::with_capacity(len);
            for i in 0..len {
                let child = format!("{prefix}{i}");
                items.push(decode_at(element, source, Some(&child))?);
            }
            Ok(Decoded::Array(items))
        }
        Schema::Nullable { inner } => match path {
            None => Ok(Decoded::Null),
            Some(p) => match non_empty(source.get(p)) {
                None => Ok(Decoded::Null),
                Some(_) => decode_at(inner, source, path),
            },
        },
        Schema::Optional { inner } => {
            if inner.is_primitive() {
                match path {
                    None => Ok(Decoded::Absent),
                    Some(p) => match non_empty(source.get(p)) {
                        None => Ok(Decoded::Absent),
                        Some(_) => decode_at(inner, source, path),
                    },
                }
            } else {
                let value = decode_at(inner, source, path)?;
                if value.is_effectively_absent() {
                    Ok(Decoded::Absent)
                } else {
                    Ok(value)
                }
            }
        }
        Schema::String | Schema::Literal { .. } | Schema::Enum { .. } => {
            let raw = non_empty(source.get(require_path(schema, path)?));
            Ok(raw.map_or(Decoded::Absent, |s| Decoded::String(s.to_string())))
        }
        Schema::Number => {
            let raw = non_empty(source.get(require_path(schema, path)?));
            Ok(raw
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|n| n.is_finite())
                .map_or(Decoded::Absent, Decoded::Number))
        }
        Schema::Boolean => {
            let raw = source.get(require_path(schema, path)?);
            Ok(Decoded::Bool(is_truthy(raw)))
        }
    }
}

/// Object-shape walk shared by `Object` and union variants: one recursion
/// per declared field, output in declaration order.
fn decode_fields<S: FlatSource + ?Sized>(
    fields: &[(String, Schema)],
    source: &S,
    prefix: &str,
) -> DecodeResult<Decoded> {
    let mut out = Vec::with_capacity(fields.len());
    for (name, field_schema) in fields {
        let child = format!("{prefix}{name}");
        out.push((name.clone(), decode_at(field_schema, source, Some(&child))?));
    }
    Ok(Decoded::Object(out))
}

fn require_path<'a>(schema: &Schema, path: Option<&'a str>) -> DecodeResult<&'a str> {
    path.ok_or(DecodeError::PrimitiveAtRoot {
        kind: schema.kind_name(),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Checkbox semantics: absent or empty is false, a fixed falsy vocabulary
/// is false, everything else is true.
fn is_truthy(value: Option<&str>) -> bool {
    match non_empty(value) {
        None => false,
        Some(s) => !FALSY_VOCABULARY.contains(&s),
    }
}
