//! The round-trip record carried across a redirect after failed validation.
//!
//! A failed submission must re-populate the form and show per-field errors
//! without server-side session state, so everything rides in the redirect
//! target's query string. For an original field key `K`, the record may
//! carry `K.v` (the single raw submitted value) and `K.e` (zero or more
//! error messages, order preserved).

use url::form_urlencoded;

use crate::path::Path;

const ERROR_SUFFIX: &str = ".e";
const VALUE_SUFFIX: &str = ".v";

/// Per-path error messages and raw values for one failed validation
/// attempt. Created once per failure, serialized into the redirect, read by
/// the next render, then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundTrip {
    params: Vec<(String, String)>,
}

impl RoundTrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error message at a path. A path may accumulate several
    /// messages; their order is preserved.
    pub fn add_error(&mut self, path: &Path, message: impl Into<String>) {
        self.params
            .push((format!("{path}{ERROR_SUFFIX}"), message.into()));
    }

    /// Records the single raw submitted value for a flat key, replacing any
    /// earlier value at the same key.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        let param_key = format!("{key}{VALUE_SUFFIX}");
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == param_key) {
            Some(entry) => entry.1 = value,
            None => self.params.push((param_key, value)),
        }
    }

    /// The first error message at a path, if any.
    pub fn field_error(&self, path: &Path) -> Option<&str> {
        self.field_errors(path).next()
    }

    /// All error messages at a path, in recorded order.
    pub fn field_errors<'a>(&'a self, path: &Path) -> impl Iterator<Item = &'a str> + 'a {
        let key = format!("{path}{ERROR_SUFFIX}");
        self.params
            .iter()
            .filter(move |(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The raw submitted value at a path, if any.
    pub fn field_value(&self, path: &Path) -> Option<&str> {
        let key = format!("{path}{VALUE_SUFFIX}");
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All suffixed query parameters, in order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Serializes to the redirect target's query string.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Reads a record back out of a query string on the next render.
    pub fn from_query(query: &str) -> Self {
        Self {
            params: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_and_value_key_families() {
        let mut record = RoundTrip::new();
        record.add_error(&Path::from("user.email"), "invalid email");
        record.set_value("user.email", "not-an-email");
        assert_eq!(
            record.params(),
            [
                ("user.email.e".to_string(), "invalid email".to_string()),
                ("user.email.v".to_string(), "not-an-email".to_string()),
            ]
        );
    }

    #[test]
    fn test_multiple_errors_preserve_order() {
        let mut record = RoundTrip::new();
        let path = Path::from("pw");
        record.add_error(&path, "too short");
        record.add_error(&path, "needs a digit");
        let errors: Vec<_> = record.field_errors(&path).collect();
        assert_eq!(errors, ["too short", "needs a digit"]);
        assert_eq!(record.field_error(&path), Some("too short"));
    }

    #[test]
    fn test_set_value_replaces() {
        let mut record = RoundTrip::new();
        record.set_value("k", "first");
        record.set_value("k", "second");
        assert_eq!(record.field_value(&Path::from("k")), Some("second"));
        assert_eq!(record.params().len(), 1);
    }

    #[test]
    fn test_missing_lookups_are_none() {
        let record = RoundTrip::new();
        assert_eq!(record.field_value(&Path::from("a")), None);
        assert_eq!(record.field_error(&Path::from("a")), None);
    }

    #[test]
    fn test_indexed_paths_address_array_elements() {
        let mut record = RoundTrip::new();
        let path = Path::root().field("items").index(2).field("name");
        record.add_error(&path, "required");
        record.set_value("items.2.name", "");
        assert_eq!(record.field_error(&path), Some("required"));
        assert_eq!(record.field_value(&path), Some(""));
    }

    #[test]
    fn test_query_round_trip() {
        let mut record = RoundTrip::new();
        record.add_error(&Path::from("a"), "bad & worse");
        record.add_error(&Path::from("a"), "second");
        record.set_value("a", "1=2");
        let query = record.to_query();
        assert_eq!(RoundTrip::from_query(&query), record);
    }

    #[test]
    fn test_prefix_paths_compose_with_join() {
        let mut record = RoundTrip::new();
        record.set_value("data.extra.extra", "x");
        record.set_value("data.extra.extraNumber", "1");

        let extra = Path::from("data.extra");
        assert_eq!(record.field_value(&extra.clone().field("extra")), Some("x"));
        assert_eq!(
            record.field_value(&extra.join(&Path::from("extraNumber"))),
            Some("1")
        );
    }
}
