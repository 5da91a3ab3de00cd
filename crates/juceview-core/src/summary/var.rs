//! `juce::var` summary.
//!
//! A `juce::var` is a tagged union: `type` points at a singleton
//! `VariantType_*` object whose static pointer type names the active variant,
//! and `value` is a raw storage union. Twelve variant tags exist; only the
//! string and int variants are decoded. Every other tag prints as the
//! placeholder `t`.

use std::fmt;

use tracing::debug;

use crate::config::FormatOptions;
use crate::field::{field, UNINITIALIZED};
use crate::reflect::{TypeHandle, ValueHandle};

/// Placeholder for variants that are not decoded
pub const UNDECODED_VARIANT: &str = "t";

/// Type looked up to reinterpret string storage
const STRING_TYPE: &str = "juce::String";

/// Known `juce::var` variant tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind
{
    /// Abstract base tag (`VariantType *`)
    Base,
    Void,
    Undefined,
    Int,
    Int64,
    Double,
    Bool,
    String,
    Object,
    Array,
    Binary,
    Method,
}

impl VariantKind
{
    /// Every known tag
    pub const ALL: [VariantKind; 12] = [
        VariantKind::Base,
        VariantKind::Void,
        VariantKind::Undefined,
        VariantKind::Int,
        VariantKind::Int64,
        VariantKind::Double,
        VariantKind::Bool,
        VariantKind::String,
        VariantKind::Object,
        VariantKind::Array,
        VariantKind::Binary,
        VariantKind::Method,
    ];

    /// Class name suffix after `juce::var::`
    pub const fn class_name(self) -> &'static str
    {
        match self {
            VariantKind::Base => "VariantType",
            VariantKind::Void => "VariantType_Void",
            VariantKind::Undefined => "VariantType_Undefined",
            VariantKind::Int => "VariantType_Int",
            VariantKind::Int64 => "VariantType_Int64",
            VariantKind::Double => "VariantType_Double",
            VariantKind::Bool => "VariantType_Bool",
            VariantKind::String => "VariantType_String",
            VariantKind::Object => "VariantType_Object",
            VariantKind::Array => "VariantType_Array",
            VariantKind::Binary => "VariantType_Binary",
            VariantKind::Method => "VariantType_Method",
        }
    }

    /// Decorated pointer type name of the `type` member for this variant
    ///
    /// ```rust
    /// use juceview_core::summary::VariantKind;
    ///
    /// assert_eq!(VariantKind::Int.tag(), "juce::var::VariantType_Int *");
    /// ```
    pub fn tag(self) -> String
    {
        format!("juce::var::{} *", self.class_name())
    }

    /// Identify a variant from the exact decorated type name
    ///
    /// Matching is exact: `const` qualifiers, missing spaces, or other
    /// namespaces do not match.
    pub fn from_tag(type_name: &str) -> Option<Self>
    {
        VariantKind::ALL.into_iter().find(|kind| kind.tag() == type_name)
    }

    /// Whether the summary decodes this variant's payload
    pub const fn is_decoded(self) -> bool
    {
        matches!(self, VariantKind::String | VariantKind::Int)
    }
}

impl fmt::Display for VariantKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.class_name())
    }
}

/// Summary of a `juce::var`
///
/// - string tag: `string=<summary of *(juce::String*)value.stringValue><pointer text>`
/// - int tag: `int=<summary of value>`
/// - anything else: exactly `t`
///
/// A missing link inside a decoded variant degrades to the uninitialized
/// sentinel in that position.
pub fn var_summary<H: ValueHandle>(value: &H, _options: &FormatOptions) -> String
{
    let Some(type_name) = field(value, "type").map(|tag| tag.value_type().name()) else {
        return UNDECODED_VARIANT.to_owned();
    };

    match VariantKind::from_tag(&type_name) {
        Some(VariantKind::String) => string_variant(value),
        Some(VariantKind::Int) => int_variant(value),
        other => {
            debug!(tag = %type_name, kind = ?other, "var variant not decoded");
            UNDECODED_VARIANT.to_owned()
        }
    }
}

fn string_variant<H: ValueHandle>(value: &H) -> String
{
    let pointer = field(value, "value.stringValue").and_then(|storage| {
        let string_pointer_type = storage.find_type(STRING_TYPE)?.pointer_type();
        storage.cast(&string_pointer_type)
    });

    let Some(pointer) = pointer else {
        return format!("string={UNINITIALIZED}");
    };

    let text = pointer
        .dereference()
        .and_then(|string| string.summary())
        .unwrap_or_else(|| UNINITIALIZED.to_owned());
    let address = pointer.value_text().unwrap_or_default();

    format!("string={text}{address}")
}

fn int_variant<H: ValueHandle>(value: &H) -> String
{
    // The host may have no summary for a scalar union member; fall back to its value text.
    let payload = field(value, "value")
        .and_then(|payload| payload.summary().or_else(|| payload.value_text()))
        .unwrap_or_else(|| UNINITIALIZED.to_owned());

    format!("int={payload}")
}
