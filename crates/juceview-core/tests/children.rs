mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::int_array;
use juceview_core::children::{ArrayChildren, SyntheticChildren, ValueTreeChildren, NO_CHILD_INDEX};
use juceview_core::config::FormatOptions;
use juceview_core::snapshot::{Snapshot, SnapshotNode, SnapshotType, SnapshotValue};
use juceview_core::types::Address;
use juceview_core::{JuceViewResult, TypeHandle, ValueHandle};

/// Snapshot value whose `numUsed` member reads a shared counter, standing in
/// for a process that keeps running between refreshes.
#[derive(Debug, Clone)]
struct LiveValue
{
    inner: SnapshotValue,
    used: Rc<Cell<i64>>,
    is_count: bool,
}

impl LiveValue
{
    fn wrap(&self, inner: SnapshotValue, is_count: bool) -> Self
    {
        LiveValue { inner, used: Rc::clone(&self.used), is_count }
    }
}

impl ValueHandle for LiveValue
{
    type Type = SnapshotType;

    fn name(&self) -> String
    {
        self.inner.name()
    }

    fn is_valid(&self) -> bool
    {
        self.inner.is_valid()
    }

    fn child_member(&self, name: &str) -> Option<Self>
    {
        self.inner.child_member(name).map(|child| self.wrap(child, name == "numUsed"))
    }

    fn value_text(&self) -> Option<String>
    {
        if self.is_count { Some(self.used.get().to_string()) } else { self.inner.value_text() }
    }

    fn summary(&self) -> Option<String>
    {
        self.inner.summary()
    }

    fn value_type(&self) -> Self::Type
    {
        self.inner.value_type()
    }

    fn cast(&self, ty: &Self::Type) -> Option<Self>
    {
        self.inner.cast(ty).map(|value| self.wrap(value, false))
    }

    fn dereference(&self) -> Option<Self>
    {
        self.inner.dereference().map(|value| self.wrap(value, false))
    }

    fn create_child_at_offset(&self, name: &str, offset: u64, ty: &Self::Type) -> JuceViewResult<Self>
    {
        Ok(self.wrap(self.inner.create_child_at_offset(name, offset, ty)?, false))
    }

    fn find_type(&self, name: &str) -> Option<Self::Type>
    {
        self.inner.find_type(name)
    }
}

fn element_address(children: &ArrayChildren<SnapshotValue>, index: i64) -> Option<Address>
{
    children.child_at(index).and_then(|child| child.address())
}

#[test]
fn test_array_children_positions()
{
    let snapshot = int_array("3", 0x1000, &["1", "2", "3"]);
    let children = ArrayChildren::new(snapshot.roots().remove(0), FormatOptions::default());

    assert_eq!(children.child_count(), 3);
    assert!(children.has_children());
    assert_eq!(children.element_size(), 4);

    assert_eq!(element_address(&children, 0), Some(Address::new(0x1000)));
    assert_eq!(element_address(&children, 1), Some(Address::new(0x1004)));
    assert_eq!(element_address(&children, 2), Some(Address::new(0x1008)));

    let second = children.child_at(1).unwrap();
    assert_eq!(second.name(), "[1]");
    assert_eq!(second.value_type().name(), "int");
    assert_eq!(second.value_text().as_deref(), Some("2"));
}

#[test]
fn test_array_children_out_of_range()
{
    let snapshot = int_array("3", 0x1000, &["1", "2", "3", "4"]);
    let children = ArrayChildren::new(snapshot.roots().remove(0), FormatOptions::default());

    assert!(children.child_at(3).is_none());
    assert!(children.child_at(-1).is_none());
    assert!(children.child_at(i64::MAX).is_none());
}

#[test]
fn test_array_children_bad_count()
{
    for used in ["abc", "-2", ""] {
        let snapshot = int_array(used, 0x1000, &["1"]);
        let children = ArrayChildren::new(snapshot.roots().remove(0), FormatOptions::default());

        assert_eq!(children.child_count(), 0, "numUsed={used:?}");
        assert!(!children.has_children());
        assert!(children.child_at(0).is_none());
    }
}

#[test]
fn test_array_children_missing_data_member()
{
    let snapshot = Snapshot::builder()
        .root(
            SnapshotNode::new("values", "juce::Array<int>")
                .with_child(SnapshotNode::new("numUsed", "int").with_value("2")),
        )
        .root(
            SnapshotNode::new("invalid", "juce::Array<int>")
                .with_child(SnapshotNode::new("numUsed", "int").with_value("2"))
                .with_path("data.elements.data", SnapshotNode::new("", "int *").with_value("0x1000").invalid()),
        )
        .build();

    for root in snapshot.roots() {
        let children = ArrayChildren::new(root, FormatOptions::default());
        assert_eq!(children.child_count(), 0);
        assert_eq!(children.element_size(), 0);
    }
}

#[test]
fn test_array_children_unmapped_element_is_absent()
{
    // Only the first element is readable.
    let snapshot = int_array("2", 0x1000, &["1"]);
    let children = ArrayChildren::new(snapshot.roots().remove(0), FormatOptions::default());

    assert_eq!(children.child_count(), 2);
    assert!(children.child_at(0).is_some());
    assert!(children.child_at(1).is_none());
}

#[test]
fn test_array_children_offset_overflow_is_absent()
{
    let snapshot = Snapshot::builder()
        .type_size("big", u64::MAX)
        .memory(0x1000, SnapshotNode::new("", "big").with_value("0"))
        .root(
            SnapshotNode::new("huge", "juce::Array<big>")
                .with_child(SnapshotNode::new("numUsed", "int").with_value("3"))
                .with_path("data.elements.data", SnapshotNode::new("", "big *").with_value("0x1000")),
        )
        .build();
    let children = ArrayChildren::new(snapshot.roots().remove(0), FormatOptions::default());

    assert_eq!(children.child_count(), 3);
    assert_eq!(children.element_size(), u64::MAX);
    assert!(children.child_at(0).is_some());
    // 1 * size fits in u64 but base + offset does not.
    assert!(children.child_at(1).is_none());
    // 2 * size overflows before any address is formed.
    assert!(children.child_at(2).is_none());
}

#[test]
fn test_array_children_large_count_still_served()
{
    let elements: Vec<String> = (0..150).map(|i| i.to_string()).collect();
    let elements: Vec<&str> = elements.iter().map(String::as_str).collect();
    let snapshot = int_array("150", 0x1000, &elements);
    let children = ArrayChildren::new(snapshot.roots().remove(0), FormatOptions::default());

    assert_eq!(children.child_count(), 150);
    assert_eq!(children.child_at(149).and_then(|child| child.value_text()).as_deref(), Some("149"));
}

#[test]
fn test_array_children_refresh_picks_up_changes()
{
    let snapshot = int_array("1", 0x1000, &["1", "2", "3"]);
    let used = Rc::new(Cell::new(1));
    let value = LiveValue { inner: snapshot.roots().remove(0), used: Rc::clone(&used), is_count: false };

    let mut children = ArrayChildren::new(value, FormatOptions::default());
    assert_eq!(children.child_count(), 1);

    used.set(3);
    assert_eq!(children.child_count(), 1);
    children.refresh();
    assert_eq!(children.child_count(), 3);
    assert_eq!(children.child_at(2).and_then(|child| child.value_text()).as_deref(), Some("3"));

    used.set(0);
    children.refresh();
    assert!(!children.has_children());
    assert!(children.child_at(0).is_none());
}

#[test]
fn test_array_child_index_for()
{
    let snapshot = int_array("3", 0x1000, &["1", "2", "3"]);
    let children = ArrayChildren::new(snapshot.roots().remove(0), FormatOptions::default());

    assert_eq!(children.child_index_for("[5]"), 5);
    assert_eq!(children.child_index_for("[0]"), 0);
    assert_eq!(children.child_index_for("foo"), NO_CHILD_INDEX);
    // A literal "[-1]" is indistinguishable from "not found".
    assert_eq!(children.child_index_for("[-1]"), -1);
    assert_eq!(children.child_index_for("[-1]"), NO_CHILD_INDEX);
}

fn value_tree_snapshot() -> std::sync::Arc<Snapshot>
{
    let shared = SnapshotNode::new("", "juce::ValueTree::SharedObject *")
        .with_value("0x0000000100006000")
        .with_path("properties.values", SnapshotNode::new("", "juce::Array<juce::NamedValueSet::NamedValue>"))
        .with_child(SnapshotNode::new("children", "juce::ReferenceCountedArray<SharedObject>"))
        .with_child(SnapshotNode::new("parent", "juce::ValueTree::SharedObject *").with_value("0x0"))
        .with_child(SnapshotNode::new("type", "juce::Identifier"));

    Snapshot::builder()
        .root(SnapshotNode::new("tree", "juce::ValueTree").with_path("object.referencedObject", shared))
        .root(
            SnapshotNode::new("empty", "juce::ValueTree")
                .with_path("object.referencedObject", SnapshotNode::new("", "juce::ValueTree::SharedObject *").with_value("0x0")),
        )
        .root(SnapshotNode::new("broken", "juce::ValueTree"))
        .build()
}

#[test]
fn test_value_tree_facets()
{
    let snapshot = value_tree_snapshot();
    let children = ValueTreeChildren::new(snapshot.root("tree").unwrap());

    assert_eq!(children.child_count(), 4);
    assert!(children.has_children());
    assert!(children.node().is_some());

    let names: Vec<String> = (0..4).filter_map(|i| children.child_at(i)).map(|child| child.name()).collect();
    assert_eq!(names, ["values", "children", "parent", "type"]);
    assert_eq!(
        children.child_at(0).map(|child| child.value_type().name()).as_deref(),
        Some("juce::Array<juce::NamedValueSet::NamedValue>")
    );

    assert!(children.child_at(4).is_none());
    assert!(children.child_at(-1).is_none());
}

#[test]
fn test_value_tree_count_is_fixed()
{
    let snapshot = value_tree_snapshot();

    for name in ["empty", "broken"] {
        let children = ValueTreeChildren::new(snapshot.root(name).unwrap());
        assert_eq!(children.child_count(), 4, "{name}");
        assert!(children.has_children());
        assert!((0..4).all(|i| children.child_at(i).is_none()));
    }
}

#[test]
fn test_value_tree_child_index_for()
{
    let snapshot = value_tree_snapshot();
    let children = ValueTreeChildren::new(snapshot.root("tree").unwrap());

    assert_eq!(children.child_index_for("[2]"), 2);
    assert_eq!(children.child_index_for("parent"), NO_CHILD_INDEX);
}
