//! Synthetic children for `juce::ValueTree`.
//!
//! A `ValueTree` is a handle to a reference-counted `SharedObject` reached
//! through `object.referencedObject`. The provider exposes four fixed facets
//! of that node rather than its raw members.

use tracing::debug;

use super::SyntheticChildren;
use crate::config::FormatOptions;
use crate::field::field;
use crate::reflect::ValueHandle;

/// Facets in child order
pub const FACETS: [ValueTreeFacet; 4] = [
    ValueTreeFacet::Properties,
    ValueTreeFacet::Children,
    ValueTreeFacet::Parent,
    ValueTreeFacet::Type,
];

/// One logical facet of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTreeFacet
{
    /// Attribute bag (`properties.values`)
    Properties,
    /// Ordered child node list (`children`)
    Children,
    /// Parent back-reference (`parent`)
    Parent,
    /// Node type identifier (`type`)
    Type,
}

impl ValueTreeFacet
{
    /// Member path on the shared node
    pub const fn path(self) -> &'static str
    {
        match self {
            ValueTreeFacet::Properties => "properties.values",
            ValueTreeFacet::Children => "children",
            ValueTreeFacet::Parent => "parent",
            ValueTreeFacet::Type => "type",
        }
    }
}

/// Children provider for `juce::ValueTree`
///
/// `child_count()` is always 4 and `has_children()` always true, even for an
/// invalid tree whose node pointer is null; in that case every facet reads as
/// "no such child".
#[derive(Debug)]
pub struct ValueTreeChildren<H: ValueHandle>
{
    value: H,
    node: Option<H>,
}

impl<H: ValueHandle> ValueTreeChildren<H>
{
    /// Create a provider for `value` and resolve its node
    pub fn new(value: H) -> Self
    {
        let mut children = Self { value, node: None };
        children.refresh();
        children
    }

    /// Registry constructor
    pub fn factory(value: H, _options: &FormatOptions) -> Box<dyn SyntheticChildren<H>>
    {
        Box::new(Self::new(value))
    }

    /// Shared node as of the last refresh
    pub fn node(&self) -> Option<&H>
    {
        self.node.as_ref()
    }
}

impl<H: ValueHandle> SyntheticChildren<H> for ValueTreeChildren<H>
{
    fn refresh(&mut self)
    {
        self.node = field(&self.value, "object.referencedObject");
        debug!(value = %self.value.name(), resolved = self.node.is_some(), "value tree refreshed");
    }

    fn child_count(&self) -> usize
    {
        FACETS.len()
    }

    fn has_children(&self) -> bool
    {
        true
    }

    fn child_at(&self, index: i64) -> Option<H>
    {
        let facet = usize::try_from(index).ok().and_then(|slot| FACETS.get(slot))?;
        field(self.node.as_ref()?, facet.path())
    }
}
