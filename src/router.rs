//! Validation routing: decode, validate, and on failure divert through the
//! caller's redirect with a round-trip record.

use thiserror::Error;
use tracing::debug;

use crate::decode::{decode, DecodeError};
use crate::path::Path;
use crate::roundtrip::RoundTrip;
use crate::schema::Schema;
use crate::source::FlatSource;
use crate::value::Decoded;

/// One validation failure reported by the external validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Location of the failure.
    pub path: Path,
    /// Human-readable message.
    pub message: String,
}

impl Issue {
    pub fn new(path: impl Into<Path>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// The external schema/validation engine seam.
///
/// Takes the decoded nested value and either produces the typed output or
/// an ordered list of path-addressed issues. Defaults, coercions, and
/// constraint checks all belong here, never in the decoder.
pub trait Validate {
    /// Typed value produced on success.
    type Output;

    fn validate(&self, value: &Decoded) -> Result<Self::Output, Vec<Issue>>;
}

/// Result type for routing.
pub type RouterResult<T> = Result<T, RouterError>;

/// Contract defects raised while routing. Validation failures are not
/// errors here; they leave through the redirect callback.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The schema was misused during decoding.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The redirect callback returned instead of diverting control flow.
    /// An integration defect in the caller, never retried.
    #[error("redirect callback returned instead of diverting control flow")]
    RedirectReturned,
}

/// Decodes `source` against `schema`, validates the result, and returns the
/// validator's typed output.
///
/// On validation failure a [`RoundTrip`] record is built, carrying every
/// issue's message at its path and every source entry's raw value at its
/// key, and handed to `on_invalid`. The callback must perform the redirect
/// and never return; if control comes back anyway the call fails with
/// [`RouterError::RedirectReturned`].
pub fn parse_or_redirect<S, V, F>(
    schema: &Schema,
    source: &S,
    validator: &V,
    on_invalid: F,
) -> RouterResult<V::Output>
where
    S: FlatSource + ?Sized,
    V: Validate,
    F: FnOnce(RoundTrip),
{
    let decoded = decode(schema, source)?;
    match validator.validate(&decoded) {
        Ok(output) => Ok(output),
        Err(issues) => {
            debug!(issues = issues.len(), "validation failed, routing to redirect");
            let mut record = RoundTrip::new();
            for issue in &issues {
                record.add_error(&issue.path, issue.message.clone());
            }
            for (key, value) in source.entries() {
                record.set_value(key, value);
            }
            on_invalid(record);
            Err(RouterError::RedirectReturned)
        }
    }
}
