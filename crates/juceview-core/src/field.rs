//! # Field Reader
//!
//! Null-tolerant access to nested fields.
//!
//! Providers read fields like `componentName.text.data` out of objects that
//! may be half-constructed, already destroyed, or simply optimised away. Each
//! helper here walks a dotted path one member at a time and stops at the first
//! missing link; the `*_or_uninitialized` variants turn that into the
//! [`UNINITIALIZED`] sentinel so no provider has to repeat the null handling.

use tracing::trace;

use crate::error::{JuceViewError, JuceViewResult};
use crate::reflect::ValueHandle;

/// Placeholder shown in place of a value whose backing data is absent.
///
/// The spelling is part of the display contract and must not change.
pub const UNINITIALIZED: &str = "((uninitalized))";

/// Validated dotted member path, e.g. `object.referencedObject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath
{
    segments: Vec<String>,
}

impl FieldPath
{
    /// Parse a dotted path
    ///
    /// ## Errors
    ///
    /// Returns `InvalidFieldPath` for an empty path or an empty segment
    /// (`"a..b"`, `".a"`, `"a."`).
    ///
    /// ## Example
    ///
    /// ```rust
    /// use juceview_core::field::FieldPath;
    ///
    /// let path = FieldPath::parse("text.data").unwrap();
    /// assert_eq!(path.segments(), ["text", "data"]);
    /// assert!(FieldPath::parse("text..data").is_err());
    /// ```
    pub fn parse(input: &str) -> JuceViewResult<Self>
    {
        let segments: Vec<String> = input.split('.').map(str::trim).map(str::to_owned).collect();
        if input.trim().is_empty() || segments.iter().any(String::is_empty) {
            return Err(JuceViewError::InvalidFieldPath(input.to_owned()));
        }
        Ok(Self { segments })
    }

    /// Member names in order
    pub fn segments(&self) -> &[String]
    {
        &self.segments
    }

    /// Walk the path from `root`, stopping at the first missing member
    pub fn resolve<H: ValueHandle>(&self, root: &H) -> Option<H>
    {
        walk(root, self.segments.iter().map(String::as_str))
    }
}

fn walk<'a, H: ValueHandle>(root: &H, segments: impl IntoIterator<Item = &'a str>) -> Option<H>
{
    let mut current = root.clone();
    for segment in segments {
        match current.child_member(segment) {
            Some(next) => current = next,
            None => {
                trace!(value = %root.name(), missing = segment, "field path broken");
                return None;
            }
        }
    }
    Some(current)
}

/// Nested field at a dotted `path` (`""` yields `root` itself)
pub fn field<H: ValueHandle>(root: &H, path: &str) -> Option<H>
{
    if path.is_empty() {
        return Some(root.clone());
    }
    walk(root, path.split('.'))
}

/// Existing summary of the field at `path`
pub fn field_summary<H: ValueHandle>(root: &H, path: &str) -> Option<String>
{
    field(root, path).and_then(|value| value.summary())
}

/// Raw value text of the field at `path`
pub fn field_value<H: ValueHandle>(root: &H, path: &str) -> Option<String>
{
    field(root, path).and_then(|value| value.value_text())
}

/// Summary of the field at `path`, or [`UNINITIALIZED`]
pub fn summary_or_uninitialized<H: ValueHandle>(root: &H, path: &str) -> String
{
    field_summary(root, path).unwrap_or_else(|| UNINITIALIZED.to_owned())
}

/// Raw value text of the field at `path`, or [`UNINITIALIZED`]
pub fn value_or_uninitialized<H: ValueHandle>(root: &H, path: &str) -> String
{
    field_value(root, path).unwrap_or_else(|| UNINITIALIZED.to_owned())
}
