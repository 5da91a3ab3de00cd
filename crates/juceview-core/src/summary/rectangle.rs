//! `juce::Rectangle<*>` summary.

use crate::config::FormatOptions;
use crate::field::value_or_uninitialized;
use crate::reflect::ValueHandle;

/// Summary of a `juce::Rectangle<T>`: `x=<x> y=<y> w=<w> h=<h>`
///
/// Each coordinate is the host's raw value text, verbatim. Float rectangles
/// print however the host prints floats.
pub fn rectangle_summary<H: ValueHandle>(value: &H, _options: &FormatOptions) -> String
{
    let x = value_or_uninitialized(value, "pos.x");
    let y = value_or_uninitialized(value, "pos.y");
    let w = value_or_uninitialized(value, "w");
    let h = value_or_uninitialized(value, "h");

    format!("x={x} y={y} w={w} h={h}")
}
