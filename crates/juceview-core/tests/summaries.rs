mod common;

use common::{juce_string, single};
use juceview_core::config::{FormatOptions, ParentPolarity};
use juceview_core::field::UNINITIALIZED;
use juceview_core::snapshot::{Snapshot, SnapshotNode};
use juceview_core::summary::var::UNDECODED_VARIANT;
use juceview_core::summary::{
    component_summary, identifier_summary, rectangle_summary, scoped_pointer_summary, string_summary, var_summary,
    VariantKind,
};

fn rectangle(x: &str, y: &str, w: &str, h: &str) -> SnapshotNode
{
    SnapshotNode::new("bounds", "juce::Rectangle<int>")
        .with_path("pos.x", SnapshotNode::new("", "int").with_value(x))
        .with_path("pos.y", SnapshotNode::new("", "int").with_value(y))
        .with_child(SnapshotNode::new("w", "int").with_value(w))
        .with_child(SnapshotNode::new("h", "int").with_value(h))
}

fn component(parent: &str, name: Option<&str>) -> SnapshotNode
{
    SnapshotNode::new("button", "juce::Component")
        .with_child(SnapshotNode::new("parentComponent", "juce::Component *").with_value(parent))
        .with_child(juce_string("componentName", name))
        .with_path("flags.visibleFlag", SnapshotNode::new("", "bool").with_value("true"))
}

fn var_with_tag(kind_tag: &str, storage: SnapshotNode) -> SnapshotNode
{
    SnapshotNode::new("v", "juce::var")
        .with_child(SnapshotNode::new("type", kind_tag).with_value("0x0000000100008000"))
        .with_child(storage)
}

#[test]
fn test_string_summary_is_data_summary()
{
    let options = FormatOptions::default();

    assert_eq!(string_summary(&single(juce_string("s", Some("hello"))), &options), "\"hello\"");
    assert_eq!(string_summary(&single(juce_string("s", None)), &options), UNINITIALIZED);
    assert_eq!(string_summary(&single(SnapshotNode::new("s", "juce::String")), &options), UNINITIALIZED);
}

#[test]
fn test_identifier_summary()
{
    let options = FormatOptions::default();

    let named = SnapshotNode::new("id", "juce::Identifier").with_child(juce_string("name", Some("gain")));
    assert_eq!(identifier_summary(&single(named), &options), "\"gain\"");

    let null_data = SnapshotNode::new("id", "juce::Identifier").with_child(juce_string("name", None));
    assert_eq!(identifier_summary(&single(null_data), &options), "((uninitalized))");

    let no_name = SnapshotNode::new("id", "juce::Identifier");
    assert_eq!(identifier_summary(&single(no_name), &options), UNINITIALIZED);
}

#[test]
fn test_rectangle_summary_exact_format()
{
    let options = FormatOptions::default();
    assert_eq!(rectangle_summary(&single(rectangle("10", "20", "5", "7")), &options), "x=10 y=20 w=5 h=7");
}

#[test]
fn test_rectangle_summary_missing_fields()
{
    let options = FormatOptions::default();
    let partial = SnapshotNode::new("bounds", "juce::Rectangle<float>").with_child(SnapshotNode::new("w", "float").with_value("1.5"));

    assert_eq!(
        rectangle_summary(&single(partial), &options),
        "x=((uninitalized)) y=((uninitalized)) w=1.5 h=((uninitalized))"
    );
}

#[test]
fn test_component_summary_preserved_polarity()
{
    let options = FormatOptions::default();

    assert_eq!(
        component_summary(&single(component("0x0", Some("OK"))), &options),
        "\"OK\" hasParent=true isVisible=true"
    );
    assert_eq!(
        component_summary(&single(component("0x0000000100002000", Some("OK"))), &options),
        "\"OK\" hasParent=false isVisible=true"
    );
}

#[test]
fn test_component_summary_corrected_polarity()
{
    let options = FormatOptions { parent_polarity: ParentPolarity::Corrected, ..FormatOptions::default() };

    assert_eq!(
        component_summary(&single(component("0x0", Some("OK"))), &options),
        "\"OK\" hasParent=false isVisible=true"
    );
    assert_eq!(
        component_summary(&single(component("0x0000000100002000", Some("OK"))), &options),
        "\"OK\" hasParent=true isVisible=true"
    );
}

#[test]
fn test_component_summary_tolerates_missing_fields()
{
    let options = FormatOptions::default();

    // Unparseable parent counts as null.
    assert_eq!(
        component_summary(&single(component("<optimized out>", None)), &options),
        "((uninitalized)) hasParent=true isVisible=true"
    );
    assert_eq!(
        component_summary(&single(SnapshotNode::new("c", "juce::Component")), &options),
        "((uninitalized)) hasParent=true isVisible=((uninitalized))"
    );
}

#[test]
fn test_scoped_pointer_summary()
{
    let options = FormatOptions::default();
    let snapshot = Snapshot::builder()
        .memory(0x3000, SnapshotNode::new("", "juce::String").with_summary("\"owned\""))
        .root(
            SnapshotNode::new("held", "juce::ScopedPointer<juce::String>")
                .with_child(SnapshotNode::new("object", "juce::String *").with_value("0x3000")),
        )
        .root(
            SnapshotNode::new("empty", "juce::ScopedPointer<juce::String>")
                .with_child(SnapshotNode::new("object", "juce::String *").with_value("0x0")),
        )
        .build();

    assert_eq!(scoped_pointer_summary(&snapshot.root("held").unwrap(), &options), "ScopedPointer<>=\"owned\"");
    assert_eq!(scoped_pointer_summary(&snapshot.root("empty").unwrap(), &options), "ScopedPointer<>=((uninitalized))");
}

#[test]
fn test_var_string_variant()
{
    let options = FormatOptions::default();
    let snapshot = Snapshot::builder()
        .type_size("juce::String", 8)
        .memory(0x2000, SnapshotNode::new("", "juce::String").with_summary("\"hello\""))
        .root(
            var_with_tag(&VariantKind::String.tag(), SnapshotNode::new("value", "juce::var::ValueUnion"))
                .with_path("value.stringValue", SnapshotNode::new("", "char[8]").with_value("0x2000")),
        )
        .build();

    let summary = var_summary(&snapshot.roots()[0], &options);
    assert!(summary.starts_with("string="));
    assert_eq!(summary, "string=\"hello\"0x2000");
}

#[test]
fn test_var_string_variant_without_string_type()
{
    let options = FormatOptions::default();
    let var = var_with_tag(&VariantKind::String.tag(), SnapshotNode::new("value", "union"))
        .with_path("value.stringValue", SnapshotNode::new("", "char[8]").with_value("0x2000"));

    assert_eq!(var_summary(&single(var), &options), "string=((uninitalized))");
}

#[test]
fn test_var_int_variant()
{
    let options = FormatOptions::default();

    let summarised = var_with_tag(&VariantKind::Int.tag(), SnapshotNode::new("value", "juce::var::ValueUnion").with_summary("42"));
    assert_eq!(var_summary(&single(summarised), &options), "int=42");

    let raw = var_with_tag(&VariantKind::Int.tag(), SnapshotNode::new("value", "juce::var::ValueUnion").with_value("-3"));
    let summary = var_summary(&single(raw), &options);
    assert!(summary.starts_with("int="));
    assert_eq!(summary, "int=-3");
}

#[test]
fn test_var_other_variants_are_placeholder()
{
    let options = FormatOptions::default();

    for kind in VariantKind::ALL.into_iter().filter(|kind| !kind.is_decoded()) {
        let var = var_with_tag(&kind.tag(), SnapshotNode::new("value", "juce::var::ValueUnion").with_value("1"));
        assert_eq!(var_summary(&single(var), &options), UNDECODED_VARIANT, "{kind}");
    }

    let unknown = var_with_tag("juce::var::VariantType_Float *", SnapshotNode::new("value", "union"));
    assert_eq!(var_summary(&single(unknown), &options), "t");

    let untagged = SnapshotNode::new("v", "juce::var");
    assert_eq!(var_summary(&single(untagged), &options), "t");
}
