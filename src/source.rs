//! Flat key/value sources, as submitted by forms.
//!
//! The decoder only needs a read-only view of the submission: exact-key
//! lookup plus enumeration in insertion order. [`FlatSource`] captures that
//! seam; [`FormData`] is the crate's own ordered implementation with an
//! `application/x-www-form-urlencoded` wire codec.

use url::form_urlencoded;

/// Read-only flat key/value mapping consumed by the decoder.
///
/// Keys are opaque, case-sensitive strings; dot- and digit-bearing segments
/// carry structure by convention only.
pub trait FlatSource {
    /// First value for an exact key, if present.
    fn get(&self, key: &str) -> Option<&str>;

    /// All entries, in insertion order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_>;

    /// All keys, in insertion order.
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.entries().map(|(k, _)| k))
    }
}

/// Ordered form submission data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, keeping any existing entries for the same key.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Sets the single value for a key: the first matching entry is
    /// replaced in place and later duplicates are dropped.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(i) => {
                self.entries[i].1 = value;
                let mut seen = 0usize;
                self.entries.retain(|(k, _)| {
                    if *k == key {
                        seen += 1;
                        seen == 1
                    } else {
                        true
                    }
                });
            }
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses an urlencoded query string or form body.
    pub fn parse_query(query: &str) -> Self {
        Self {
            entries: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// Serializes to an urlencoded query string, preserving entry order.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl FlatSource for FormData {
    fn get(&self, key: &str) -> Option<&str> {
        FormData::get(self, key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        Box::new(self.iter())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut form = FormData::new();
        form.append("b", "2");
        form.append("a", "1");
        let keys: Vec<_> = form.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_get_returns_first_match() {
        let mut form = FormData::new();
        form.append("k", "first");
        form.append("k", "second");
        assert_eq!(form.get("k"), Some("first"));
        assert_eq!(form.get("missing"), None);
    }

    #[test]
    fn test_set_replaces_and_deduplicates() {
        let mut form = FormData::new();
        form.append("k", "first");
        form.append("other", "x");
        form.append("k", "second");
        form.set("k", "replaced");
        assert_eq!(form.len(), 2);
        assert_eq!(form.get("k"), Some("replaced"));
        assert_eq!(form.get("other"), Some("x"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut form = FormData::new();
        form.append("Key", "v");
        assert_eq!(form.get("Key"), Some("v"));
        assert_eq!(form.get("key"), None);
    }

    #[test]
    fn test_query_round_trip() {
        let mut form = FormData::new();
        form.append("data.items.0.name", "a b");
        form.append("data.items.1.name", "c&d=e");
        let query = form.to_query();
        assert_eq!(FormData::parse_query(&query), form);
    }

    #[test]
    fn test_parse_query_preserves_order() {
        let form = FormData::parse_query("z=1&a=2&z=3");
        let entries: Vec<_> = form.iter().collect();
        assert_eq!(entries, [("z", "1"), ("a", "2"), ("z", "3")]);
    }
}
