//! `juce::String` summary.

use crate::config::FormatOptions;
use crate::field::summary_or_uninitialized;
use crate::reflect::ValueHandle;

/// Member path from a `juce::String` to its shared character storage
pub const STRING_DATA_PATH: &str = "text.data";

/// Summary of a `juce::String`
///
/// Returns the host's own summary of the `text.data` character pointer
/// unchanged, so decoding and quoting stay with the host's primitive
/// formatters. A missing buffer yields the uninitialized sentinel.
pub fn string_summary<H: ValueHandle>(value: &H, _options: &FormatOptions) -> String
{
    summary_or_uninitialized(value, STRING_DATA_PATH)
}
