//! Synthetic children for `juce::Array<T>` and `juce::ReferenceCountedArray<T>`.
//!
//! Both store their elements in a contiguous heap block at
//! `data.elements.data` with the used length in `numUsed`. Children are
//! materialised on demand at `index * sizeof(T)` from the block start and
//! typed as `T`.

use tracing::{debug, error, warn};

use super::{child_name, SyntheticChildren};
use crate::config::FormatOptions;
use crate::error::JuceViewError;
use crate::field::{field, field_value};
use crate::reflect::{TypeHandle, ValueHandle};

/// Element layout derived on the last refresh
#[derive(Debug, Clone)]
struct ElementLayout<H: ValueHandle>
{
    first_element: H,
    element_type: H::Type,
    element_size: u64,
    count: usize,
}

/// Children provider exposing an array's used elements as `[0]..[n-1]`
///
/// ## Example
///
/// ```rust
/// use juceview_core::children::{ArrayChildren, SyntheticChildren};
/// use juceview_core::config::FormatOptions;
/// use juceview_core::snapshot::{Snapshot, SnapshotNode};
///
/// let snapshot = Snapshot::builder()
///     .type_size("int", 4)
///     .memory(0x1000, SnapshotNode::new("", "int").with_value("7"))
///     .root(
///         SnapshotNode::new("xs", "juce::Array<int>")
///             .with_child(SnapshotNode::new("numUsed", "int").with_value("1"))
///             .with_path("data.elements.data", SnapshotNode::new("data", "int *").with_value("0x1000")),
///     )
///     .build();
///
/// let children = ArrayChildren::new(snapshot.roots()[0].clone(), FormatOptions::default());
/// assert_eq!(children.child_count(), 1);
/// ```
#[derive(Debug)]
pub struct ArrayChildren<H: ValueHandle>
{
    value: H,
    options: FormatOptions,
    layout: Option<ElementLayout<H>>,
}

impl<H: ValueHandle> ArrayChildren<H>
{
    /// Create a provider for `value` and derive its initial state
    pub fn new(value: H, options: FormatOptions) -> Self
    {
        let mut children = Self { value, options, layout: None };
        children.refresh();
        children
    }

    /// Registry constructor
    pub fn factory(value: H, options: &FormatOptions) -> Box<dyn SyntheticChildren<H>>
    {
        Box::new(Self::new(value, *options))
    }

    /// Element byte size as of the last refresh (0 when there is no layout)
    pub fn element_size(&self) -> u64
    {
        self.layout.as_ref().map_or(0, |layout| layout.element_size)
    }

    fn derive_layout(value: &H) -> Option<ElementLayout<H>>
    {
        let first_element = field(value, "data.elements.data").filter(|element| element.is_valid())?;

        let Some(element_type) = first_element.value_type().pointee_type() else {
            warn!(value = %value.name(), "array element pointer has no pointee type, count set to 0");
            return None;
        };
        let element_size = element_type.byte_size();

        let count = match field_value(value, "numUsed").and_then(|text| text.trim().parse::<i64>().ok()) {
            Some(used) => usize::try_from(used).unwrap_or_else(|_| {
                warn!(value = %value.name(), used, "negative numUsed, count set to 0");
                0
            }),
            None => {
                warn!(value = %value.name(), "invalid numUsed, count set to 0");
                0
            }
        };

        Some(ElementLayout { first_element, element_type, element_size, count })
    }
}

impl<H: ValueHandle> SyntheticChildren<H> for ArrayChildren<H>
{
    fn refresh(&mut self)
    {
        self.layout = Self::derive_layout(&self.value);

        let count = self.child_count();
        if count > self.options.child_count_warning {
            warn!(value = %self.value.name(), count, threshold = self.options.child_count_warning, "large array");
        }
        debug!(value = %self.value.name(), count, element_size = self.element_size(), "array refreshed");
    }

    fn child_count(&self) -> usize
    {
        self.layout.as_ref().map_or(0, |layout| layout.count)
    }

    fn has_children(&self) -> bool
    {
        self.child_count() > 0
    }

    fn child_at(&self, index: i64) -> Option<H>
    {
        let layout = self.layout.as_ref()?;
        let slot = usize::try_from(index).ok().filter(|slot| *slot < layout.count)?;

        let position = u64::try_from(slot).ok()?;
        let Some(offset) = position.checked_mul(layout.element_size) else {
            let fault = JuceViewError::OffsetOverflow { index: position, element_size: layout.element_size };
            error!(value = %self.value.name(), "Array<> error: {fault}");
            return None;
        };

        match layout.first_element.create_child_at_offset(&child_name(slot), offset, &layout.element_type) {
            Ok(child) => Some(child),
            Err(e) => {
                error!(value = %self.value.name(), index, offset, "Array<> error: {e}");
                None
            }
        }
    }
}
