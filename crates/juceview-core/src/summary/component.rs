//! `juce::Component` summary.

use tracing::debug;

use super::string::string_summary;
use crate::config::{FormatOptions, ParentPolarity};
use crate::field::{field, field_value, value_or_uninitialized, UNINITIALIZED};
use crate::reflect::ValueHandle;
use crate::types::Address;

/// Summary of a `juce::Component`: `<name> hasParent=<bool> isVisible=<flag>`
///
/// `hasParent` is derived from the `parentComponent` pointer. Under
/// [`ParentPolarity::Preserve`] it is `true` when that pointer is null, which
/// is the historical output; [`ParentPolarity::Corrected`] flips it. A
/// pointer whose value text is not hexadecimal counts as null.
///
/// `isVisible` is the raw text of `flags.visibleFlag`, verbatim.
pub fn component_summary<H: ValueHandle>(value: &H, options: &FormatOptions) -> String
{
    let parent_is_null = match field_value(value, "parentComponent") {
        Some(text) => Address::from_value_text(&text).map_or_else(
            || {
                debug!(parent = %text, "unparseable parentComponent, treating as null");
                true
            },
            Address::is_null,
        ),
        None => true,
    };

    let has_parent = match options.parent_polarity {
        ParentPolarity::Preserve => parent_is_null,
        ParentPolarity::Corrected => !parent_is_null,
    };

    let is_visible = value_or_uninitialized(value, "flags.visibleFlag");
    let name = field(value, "componentName").map_or_else(|| UNINITIALIZED.to_owned(), |name| string_summary(&name, options));

    format!("{name} hasParent={has_parent} isVisible={is_visible}")
}
