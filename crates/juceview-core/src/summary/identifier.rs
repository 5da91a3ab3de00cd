//! `juce::Identifier` summary.

use super::string::string_summary;
use crate::config::FormatOptions;
use crate::field::{field, UNINITIALIZED};
use crate::reflect::ValueHandle;

/// Summary of a `juce::Identifier`: the summary of its `name` string
///
/// Default-constructed identifiers have no `name` storage; they print as
/// `((uninitalized))`.
pub fn identifier_summary<H: ValueHandle>(value: &H, options: &FormatOptions) -> String
{
    match field(value, "name") {
        Some(name) => string_summary(&name, options),
        None => UNINITIALIZED.to_owned(),
    }
}
