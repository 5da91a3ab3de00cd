//! # Synthetic Children
//!
//! Virtual child lists for container types.
//!
//! The host constructs a provider when a value of a bound type is first
//! expanded, then calls `refresh()` each time the inspected process may have
//! changed and queries children through the rest of the trait. Providers hold
//! the value handle and whatever they derived from it on the last refresh;
//! nothing derived survives a refresh.
//!
//! ## Lifecycle
//!
//! 1. Construct: `ArrayChildren::new(value, options)` (refreshes once)
//! 2. Refresh: `refresh()`, any number of times
//! 3. Query: `child_count()`, `has_children()`, `child_at(i)`, `child_index_for(name)`
//!
//! There is no terminal state; the host simply drops the provider.

pub mod array;
pub mod value_tree;

use once_cell::sync::Lazy;
use regex::Regex;

pub use array::ArrayChildren;
pub use value_tree::ValueTreeChildren;

use crate::config::FormatOptions;
use crate::reflect::ValueHandle;

/// Index the host receives for a name that does not map to a child
///
/// This is also the value `child_index_for("[-1]")` produces; the two cases
/// are indistinguishable to the host.
pub const NO_CHILD_INDEX: i64 = -1;

static CHILD_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(-?[0-9]+)\]$").expect("child name pattern is valid"));

/// Host callback surface for a synthetic-children provider
pub trait SyntheticChildren<H: ValueHandle>
{
    /// Re-derive all state from the live value
    fn refresh(&mut self);

    /// Number of children as of the last refresh
    fn child_count(&self) -> usize;

    /// Whether the value may have children
    fn has_children(&self) -> bool;

    /// Child at `index`, or `None` for "no such child"
    ///
    /// The index is signed because hosts pass through whatever the user
    /// typed; negative indices are simply out of range.
    fn child_at(&self, index: i64) -> Option<H>;

    /// Index for a child display name such as `[3]`
    ///
    /// Returns [`NO_CHILD_INDEX`] if the name is not a bracketed integer.
    fn child_index_for(&self, name: &str) -> i64
    {
        parse_child_index(name)
    }
}

/// Constructor stored in the registry for a synthetic-children binding
pub type SyntheticFactory<H> = fn(H, &FormatOptions) -> Box<dyn SyntheticChildren<H>>;

/// Parse a `[<n>]` child display name back into its index
///
/// ## Example
///
/// ```rust
/// use juceview_core::children::{parse_child_index, NO_CHILD_INDEX};
///
/// assert_eq!(parse_child_index("[5]"), 5);
/// assert_eq!(parse_child_index("foo"), NO_CHILD_INDEX);
/// assert_eq!(parse_child_index("[-1]"), NO_CHILD_INDEX);
/// ```
pub fn parse_child_index(name: &str) -> i64
{
    CHILD_NAME
        .captures(name)
        .and_then(|captures| captures[1].parse().ok())
        .unwrap_or(NO_CHILD_INDEX)
}

/// Display name for the child at `index`
pub fn child_name(index: usize) -> String
{
    format!("[{index}]")
}
