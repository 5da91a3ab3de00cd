//! `juce::ScopedPointer<*>` summary.

use crate::config::FormatOptions;
use crate::field::{field, UNINITIALIZED};
use crate::reflect::{display_text, ValueHandle};

/// Summary of a `juce::ScopedPointer<T>`: `ScopedPointer<>=<*object>`
///
/// The pointee is shown by its summary, or its raw value when the host has
/// no summary for it. A null or unreadable `object` shows the sentinel.
pub fn scoped_pointer_summary<H: ValueHandle>(value: &H, _options: &FormatOptions) -> String
{
    let pointee = field(value, "object")
        .and_then(|object| object.dereference())
        .and_then(|object| display_text(&object))
        .unwrap_or_else(|| UNINITIALIZED.to_owned());

    format!("ScopedPointer<>={pointee}")
}
