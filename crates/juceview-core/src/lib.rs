//! # juceview-core
//!
//! Debugger display providers for JUCE's core types.
//!
//! Without help, a debugger shows a `juce::String` as a pointer into a
//! shared text holder and a `juce::Array<float>` as an allocation pointer plus
//! a count. This crate supplies the providers a debugger calls to render them
//! as values instead:
//!
//! - **Summaries**: `juce::String`, `juce::Identifier`, `juce::var`,
//!   `juce::Rectangle<*>`, `juce::Component`, `juce::ScopedPointer<*>`
//! - **Synthetic children**: `juce::Array<*>` / `juce::ReferenceCountedArray<*>`
//!   (elements) and `juce::ValueTree` (properties, children, parent, type)
//!
//! ## Host boundary
//!
//! Providers only see the debuggee through [`reflect::ValueHandle`]. A host
//! adapter implements it over its own value API; [`snapshot`] implements it
//! over an in-memory picture for tests and offline rendering.
//!
//! ## Layout coupling
//!
//! Field names (`text.data`, `data.elements.data`, `numUsed`,
//! `object.referencedObject`, ...) are JUCE's private member names. They are
//! only valid for the JUCE versions that use that layout.

pub mod children;
pub mod config;
pub mod error;
pub mod field;
pub mod plugin;
pub mod prelude;
pub mod reflect;
pub mod registry;
pub mod snapshot;
pub mod summary;
pub mod types;

pub use config::{FormatOptions, ParentPolarity, PluginConfig, Provider};
// Re-export commonly used types
pub use error::{JuceViewError, JuceViewResult};
pub use reflect::{TypeHandle, ValueHandle};
