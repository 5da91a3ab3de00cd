//! # Summary Providers
//!
//! One-line display strings for JUCE value types.
//!
//! Each provider is a plain function `fn(&H, &FormatOptions) -> String` so it
//! can be stored in a registry as a function pointer. Providers are total:
//! missing fields become [`crate::field::UNINITIALIZED`] or a fixed
//! placeholder, never an error handed back to the host.

pub mod component;
pub mod identifier;
pub mod rectangle;
pub mod scoped_pointer;
pub mod string;
pub mod var;

pub use component::component_summary;
pub use identifier::identifier_summary;
pub use rectangle::rectangle_summary;
pub use scoped_pointer::scoped_pointer_summary;
pub use string::string_summary;
pub use var::{var_summary, VariantKind};

use crate::config::FormatOptions;

/// Signature shared by every summary provider
pub type SummaryFn<H> = fn(&H, &FormatOptions) -> String;
