//! Text rendering of values through the registered providers.

use std::io::{self, Write};

use juceview_core::reflect::display_text;
use juceview_core::registry::TypeCategories;
use juceview_core::{FormatOptions, TypeHandle, ValueHandle};

/// Renders a value and its synthetic children as an indented tree
pub struct Renderer<'a, H: ValueHandle>
{
    registry: &'a TypeCategories<H>,
    options: FormatOptions,
    max_children: usize,
}

impl<'a, H: ValueHandle> Renderer<'a, H>
{
    pub fn new(registry: &'a TypeCategories<H>, options: FormatOptions, max_children: usize) -> Self
    {
        Self { registry, options, max_children }
    }

    /// Write `value` and up to `depth` levels of children
    pub fn render<W: Write>(&self, out: &mut W, value: &H, depth: usize) -> io::Result<()>
    {
        self.write_value(out, value, depth, 0)
    }

    fn write_value<W: Write>(&self, out: &mut W, value: &H, depth: usize, indent: usize) -> io::Result<()>
    {
        let text = self
            .registry
            .summarize(value, &self.options)
            .or_else(|| display_text(value))
            .unwrap_or_default();
        let pad = indent * 2;
        writeln!(out, "{:pad$}{} ({}) = {text}", "", value.name(), value.value_type().name())?;

        if depth == 0 {
            return Ok(());
        }
        let Some(children) = self.registry.synthetic_children(value, &self.options) else {
            return Ok(());
        };

        let count = children.child_count();
        for index in 0..count.min(self.max_children) {
            let child = i64::try_from(index).ok().and_then(|index| children.child_at(index));
            match child {
                Some(child) => self.write_value(out, &child, depth - 1, indent + 1)?,
                None => writeln!(out, "{:width$}[{index}] <unavailable>", "", width = pad + 2)?,
            }
        }
        if count > self.max_children {
            writeln!(out, "{:width$}... {} more", "", count - self.max_children, width = pad + 2)?;
        }
        Ok(())
    }
}
