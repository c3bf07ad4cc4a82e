//! formtree - schema-directed decoding of flat form submissions
//!
//! Form submissions arrive as flat string key/value pairs
//! (`data.items.0.name=x`), but application data is nested. This crate
//! rebuilds the nested value by walking a declarative [`Schema`] over the
//! flat source, and carries validation failures back across a redirect so a
//! form can re-populate itself without server-side session state.
//!
//! # Design Principles
//!
//! - Decoding is total over user data: malformed or missing input becomes
//!   absent/null values for the validator to flag, never an error.
//! - Errors are reserved for contract defects: a misused schema or a
//!   redirect callback that returns.
//! - Decoding is a pure, deterministic function of schema and source.
//! - One dotted-path convention is shared by the decoder, the flattener,
//!   and the round-trip codec.
//!
//! # Usage
//!
//! ```
//! use formtree::{decode, Decoded, FormData, Schema};
//!
//! let schema = Schema::object([
//!     ("name", Schema::String),
//!     ("tags", Schema::array(Schema::String)),
//! ]);
//!
//! let mut form = FormData::new();
//! form.append("name", "Alice");
//! form.append("tags.0", "admin");
//!
//! let value = decode(&schema, &form).unwrap();
//! assert_eq!(value.get("name").and_then(Decoded::as_str), Some("Alice"));
//! ```

pub mod decode;
pub mod flatten;
pub mod path;
pub mod roundtrip;
pub mod router;
pub mod schema;
pub mod source;
pub mod value;

pub use decode::{decode, DecodeError, DecodeResult};
pub use flatten::flatten;
pub use path::{Path, Segment};
pub use roundtrip::RoundTrip;
pub use router::{parse_or_redirect, Issue, RouterError, RouterResult, Validate};
pub use schema::Schema;
pub use source::{FlatSource, FormData};
pub use value::Decoded;
