//! # Reflection Boundary
//!
//! The interface between the providers and the host debugger.
//!
//! Every summary and synthetic-children provider in this crate is written
//! against these two traits and nothing else. A host (LLDB's `SBValue` /
//! `SBType`, the in-memory [`crate::snapshot`] host used by tests and the CLI)
//! implements them once, and every provider works against it.
//!
//! ## Lifetime
//!
//! A handle is a live view into debuggee memory owned by the host session. It
//! may go stale whenever the inspected process resumes, which is why
//! synthetic-children providers re-derive everything in `refresh()` instead
//! of caching decoded values.
//!
//! ## Absence versus faults
//!
//! Field lookups, value text and summaries return `Option`: a missing field
//! or a null pointer is an ordinary state of a half-constructed object, not an
//! error. Only [`ValueHandle::create_child_at_offset`] can fault, because it
//! makes the host read memory at an address this crate computed.

use std::fmt::Debug;

use crate::error::JuceViewResult;

/// A type as reported by the host's type system.
pub trait TypeHandle: Clone + Debug + 'static
{
    /// Fully qualified type name, e.g. `juce::var::VariantType_String *`
    fn name(&self) -> String;

    /// Target type if this is a pointer type
    fn pointee_type(&self) -> Option<Self>;

    /// Pointer-to-this type
    fn pointer_type(&self) -> Self;

    /// Size in bytes of one value of this type
    fn byte_size(&self) -> u64;
}

/// A live reference to a typed memory region in the inspected process.
///
/// ## Example
///
/// ```rust
/// use juceview_core::reflect::ValueHandle;
/// use juceview_core::snapshot::{Snapshot, SnapshotNode};
///
/// let snapshot = Snapshot::builder()
///     .root(SnapshotNode::new("r", "juce::Rectangle<int>").with_child(SnapshotNode::new("w", "int").with_value("5")))
///     .build();
/// let roots = snapshot.roots();
/// let rect = &roots[0];
/// let w = rect.child_member("w").unwrap();
/// assert_eq!(w.value_text().as_deref(), Some("5"));
/// assert!(rect.child_member("depth").is_none());
/// ```
pub trait ValueHandle: Clone + Debug + 'static
{
    /// Type handle produced by this host
    type Type: TypeHandle;

    /// Display name of this value (variable name, member name, `[3]`)
    fn name(&self) -> String;

    /// Whether the host considers this handle readable
    fn is_valid(&self) -> bool;

    /// Named member of a struct/class value
    fn child_member(&self, name: &str) -> Option<Self>;

    /// Raw value text (`"42"`, `"0x0000000100200000"`, `"true"`)
    fn value_text(&self) -> Option<String>;

    /// Existing summary text computed by the host's own formatters
    fn summary(&self) -> Option<String>;

    /// Type of this value, resolved to the dynamic type where the host can
    fn value_type(&self) -> Self::Type;

    /// Reinterpret this value's storage as another type
    fn cast(&self, ty: &Self::Type) -> Option<Self>;

    /// Follow a pointer value
    fn dereference(&self) -> Option<Self>;

    /// Create a value of type `ty` at `offset` bytes past the address this
    /// pointer value holds
    ///
    /// ## Errors
    ///
    /// - `MemoryUnavailable`: nothing readable at the computed address
    /// - `AddressOverflow`: the pointer's address plus `offset` does not fit
    ///   in the address space
    fn create_child_at_offset(&self, name: &str, offset: u64, ty: &Self::Type) -> JuceViewResult<Self>;

    /// Look up a type by name in the module this value belongs to
    fn find_type(&self, name: &str) -> Option<Self::Type>;
}

/// Best display text for a value: its summary, else its raw value text.
pub fn display_text<H: ValueHandle>(value: &H) -> Option<String>
{
    value.summary().or_else(|| value.value_text())
}
