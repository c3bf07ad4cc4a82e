//! Flattening nested values into form data, for pre-filling forms.

use serde_json::Value;

use crate::source::FormData;

/// Writes `value` into `form` under dotted keys rooted at `path`.
///
/// The inverse-direction traversal of decoding: objects and arrays recurse
/// per entry with an extended path. Booleans follow checkbox semantics,
/// `true` writes `"on"` and `false` writes nothing. Any other value writes
/// its string form at the path. A scalar at the root has no key to write to
/// and is skipped.
pub fn flatten(form: &mut FormData, value: &Value, path: Option<&str>) {
    let prefix = match path {
        Some(p) => format!("{p}."),
        None => String::new(),
    };

    match value {
        Value::Object(map) => {
            for (name, field) in map {
                flatten(form, field, Some(&format!("{prefix}{name}")));
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(form, item, Some(&format!("{prefix}{i}")));
            }
        }
        Value::Bool(b) => {
            if *b {
                if let Some(path) = path {
                    form.set(path, "on");
                }
            }
        }
        Value::String(s) => {
            if let Some(path) = path {
                form.set(path, s.as_str());
            }
        }
        Value::Number(n) => {
            if let Some(path) = path {
                form.set(path, n.to_string());
            }
        }
        Value::Null => {
            if let Some(path) = path {
                form.set(path, "null");
            }
        }
    }
}
