//! Path addressing shared by the decoder, flattener, and round-trip codec.
//!
//! A path is an ordered sequence of segments, each either an object field
//! name or an array index. Its dotted string form (`data.items.0.name`) is
//! exactly the flat key form submissions use, and conversion between the two
//! forms is lossless: `Path::from(s).to_string() == s` for every key the
//! flattener can emit.
//!
//! There is no escaping mechanism; a literal `.` inside a field name is not
//! supported.

use std::fmt;
use std::str::FromStr;

/// One step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object field name.
    Field(String),
    /// Array index.
    Index(usize),
}

impl Segment {
    /// Parses one dotted-key segment. All-digit segments are indices,
    /// everything else is a field name.
    fn parse(s: &str) -> Segment {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(i) = s.parse::<usize>() {
                return Segment::Index(i);
            }
        }
        Segment::Field(s.to_string())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, "{}", name),
            Segment::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Segment::Field(name.to_string())
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

/// The canonical path representation: an ordered segment list.
///
/// Both external forms, the dotted flat key and the segment sequence, are
/// derived from this one representation through [`fmt::Display`] and
/// [`Path::segments`]; nothing else in the crate builds dotted strings by
/// hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<Segment>);

impl Path {
    /// The empty path, addressing the root value.
    pub fn root() -> Self {
        Path(Vec::new())
    }

    /// Builds a path from explicit segments.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        Path(segments.into_iter().collect())
    }

    /// Appends a field-name segment.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.0.push(Segment::Field(name.into()));
        self
    }

    /// Appends an array-index segment.
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Segment::Index(i));
        self
    }

    /// Concatenates two paths. Lets a sub-object's path be bound once and
    /// extended per field at each use site.
    pub fn join(&self, rest: &Path) -> Path {
        let mut segments = self.0.clone();
        segments.extend(rest.0.iter().cloned());
        Path(segments)
    }

    /// Whether `prefix` is a leading subsequence of this path.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    /// The ordered segments.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::from(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            return Path::root();
        }
        Path(s.split('.').map(Segment::parse).collect())
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_with_dots() {
        let path = Path::root().field("data").field("items").index(0).field("name");
        assert_eq!(path.to_string(), "data.items.0.name");
    }

    #[test]
    fn test_parse_string_round_trip() {
        for key in ["data.items.0.name", "a", "a.b.c", "items.12.x"] {
            let path = Path::from(key);
            assert_eq!(path.to_string(), key);
        }
    }

    #[test]
    fn test_parse_distinguishes_indices_from_fields() {
        let path = Path::from("items.0.name");
        assert_eq!(
            path.segments(),
            &[
                Segment::Field("items".into()),
                Segment::Index(0),
                Segment::Field("name".into())
            ]
        );
    }

    #[test]
    fn test_digit_bearing_field_stays_field() {
        let path = Path::from("a1.0a");
        assert_eq!(
            path.segments(),
            &[Segment::Field("a1".into()), Segment::Field("0a".into())]
        );
    }

    #[test]
    fn test_empty_string_is_root() {
        let path = Path::from("");
        assert!(path.is_root());
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_starts_with() {
        let full = Path::from("data.items.0.name");
        assert!(full.starts_with(&Path::root()));
        assert!(full.starts_with(&Path::from("data")));
        assert!(full.starts_with(&Path::from("data.items.0")));
        assert!(full.starts_with(&full));
        assert!(!full.starts_with(&Path::from("data.items.1")));
        assert!(!full.starts_with(&Path::from("items")));
        assert!(!Path::from("data").starts_with(&full));
    }

    #[test]
    fn test_join_extends_prefix() {
        let base = Path::from("data.extra");
        let joined = base.join(&Path::from("extraNumber"));
        assert_eq!(joined.to_string(), "data.extra.extraNumber");
    }
}
