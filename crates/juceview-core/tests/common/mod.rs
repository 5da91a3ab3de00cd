//! Snapshot fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use juceview_core::snapshot::{Snapshot, SnapshotNode, SnapshotValue};

/// A `juce::String` whose character storage has the given host summary
pub fn juce_string(name: &str, text: Option<&str>) -> SnapshotNode
{
    let data = match text {
        Some(text) => SnapshotNode::new("", "char *").with_value("0x0000000100004f20").with_summary(format!("\"{text}\"")),
        None => SnapshotNode::new("", "char *").with_value("0x0000000000000000"),
    };
    SnapshotNode::new(name, "juce::String").with_path("text.data", data)
}

/// A `juce::Array<int>` over `elements` mapped from `base`, reporting `num_used`
pub fn int_array(num_used: &str, base: u64, elements: &[&str]) -> Arc<Snapshot>
{
    let mut builder = Snapshot::builder().type_size("int", 4);
    for (slot, element) in (0_u64..).zip(elements) {
        builder = builder.memory(base + slot * 4, SnapshotNode::new("", "int").with_value(*element));
    }
    builder
        .root(
            SnapshotNode::new("values", "juce::Array<int>")
                .with_child(SnapshotNode::new("numUsed", "int").with_value(num_used))
                .with_path("data.elements.data", SnapshotNode::new("", "int *").with_value(format!("0x{base:x}"))),
        )
        .build()
}

/// The first root of a snapshot holding only `node`
pub fn single(node: SnapshotNode) -> SnapshotValue
{
    Snapshot::builder().root(node).build().roots().remove(0)
}
