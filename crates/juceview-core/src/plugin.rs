//! # Registration Entrypoint
//!
//! Binds every provider to its JUCE type in a host registry.
//!
//! [`register_providers`] and [`unregister_providers`] work on any
//! [`DisplayRegistry`] and carry no state. [`init_module`] and
//! [`shutdown_module`] wrap them with the process-wide "loaded once" state a
//! debugger plugin has: the host may import the plugin more than once per
//! session, and only the first import registers anything.
//!
//! ## Example
//!
//! ```rust
//! use juceview_core::plugin::register_providers;
//! use juceview_core::registry::TypeCategories;
//! use juceview_core::snapshot::SnapshotValue;
//! use juceview_core::{PluginConfig, Provider};
//!
//! let config = PluginConfig { disabled: vec![Provider::Var], ..PluginConfig::default() };
//! let mut registry = TypeCategories::<SnapshotValue>::new();
//! let bound = register_providers(&mut registry, &config)?;
//!
//! assert_eq!(bound, Provider::ALL.len() - 1);
//! assert!(registry.summary_for_type("juce::var").is_none());
//! # Ok::<(), juceview_core::JuceViewError>(())
//! ```

use std::sync::{Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::children::{ArrayChildren, ValueTreeChildren};
use crate::config::{PluginConfig, Provider};
use crate::error::JuceViewResult;
use crate::reflect::ValueHandle;
use crate::registry::{Binding, BindingKind, DisplayRegistry, SummaryProvider, SyntheticProvider, TypeMatcher};
use crate::summary::{
    component_summary, identifier_summary, rectangle_summary, scoped_pointer_summary, string_summary, var_summary,
    SummaryFn,
};

/// Pattern covering `juce::Array<T>` and `juce::ReferenceCountedArray<T>`
pub const ARRAY_TYPE_PATTERN: &str = "^juce::(ReferenceCounted)?Array<.*>";

/// Pattern covering `juce::ScopedPointer<T>`
pub const SCOPED_POINTER_TYPE_PATTERN: &str = "^juce::ScopedPointer<.*>";

/// Pattern covering `juce::Rectangle<T>`
pub const RECTANGLE_TYPE_PATTERN: &str = "^juce::Rectangle<.*>";

/// Category registered by the currently loaded module, if any
static LOADED_CATEGORY: Mutex<Option<String>> = Mutex::new(None);

fn summary<H: ValueHandle>(provider: Provider, function: &'static str, format: SummaryFn<H>) -> BindingKind<H>
{
    BindingKind::Summary(SummaryProvider { provider, function, format })
}

/// The binding a provider registers
///
/// ## Errors
///
/// Returns `InvalidPattern` if a built-in type pattern fails to compile.
pub fn binding_for<H: ValueHandle>(provider: Provider) -> JuceViewResult<Binding<H>>
{
    let binding = match provider {
        Provider::ValueTree => Binding {
            matcher: TypeMatcher::exact("juce::ValueTree"),
            kind: BindingKind::Synthetic(SyntheticProvider {
                provider,
                class: "ValueTreeChildrenProvider",
                construct: ValueTreeChildren::<H>::factory,
            }),
        },
        Provider::Array => Binding {
            matcher: TypeMatcher::pattern(ARRAY_TYPE_PATTERN)?,
            kind: BindingKind::Synthetic(SyntheticProvider {
                provider,
                class: "ArrayChildrenProvider",
                construct: ArrayChildren::<H>::factory,
            }),
        },
        Provider::Component => Binding {
            matcher: TypeMatcher::exact("juce::Component"),
            kind: summary(provider, "component_summary", component_summary::<H>),
        },
        Provider::String => Binding {
            matcher: TypeMatcher::exact("juce::String"),
            kind: summary(provider, "string_summary", string_summary::<H>),
        },
        Provider::Var => Binding {
            matcher: TypeMatcher::exact("juce::var"),
            kind: summary(provider, "var_summary", var_summary::<H>),
        },
        Provider::Identifier => Binding {
            matcher: TypeMatcher::exact("juce::Identifier"),
            kind: summary(provider, "identifier_summary", identifier_summary::<H>),
        },
        Provider::ScopedPointer => Binding {
            matcher: TypeMatcher::pattern(SCOPED_POINTER_TYPE_PATTERN)?,
            kind: summary(provider, "scoped_pointer_summary", scoped_pointer_summary::<H>),
        },
        Provider::Rectangle => Binding {
            matcher: TypeMatcher::pattern(RECTANGLE_TYPE_PATTERN)?,
            kind: summary(provider, "rectangle_summary", rectangle_summary::<H>),
        },
    };
    Ok(binding)
}

/// Register every enabled provider under `config.category`, then enable it
///
/// Returns the number of bindings added. When every provider is disabled
/// nothing is registered and the category is left alone.
///
/// ## Errors
///
/// Propagates registry failures.
pub fn register_providers<H, R>(registry: &mut R, config: &PluginConfig) -> JuceViewResult<usize>
where
    H: ValueHandle,
    R: DisplayRegistry<H> + ?Sized,
{
    let mut bound = 0;
    for provider in Provider::ALL.into_iter().filter(|provider| config.is_enabled(*provider)) {
        let Binding { matcher, kind } = binding_for::<H>(provider)?;
        match kind {
            BindingKind::Summary(summary) => registry.add_summary(&config.category, matcher, summary)?,
            BindingKind::Synthetic(synthetic) => registry.add_synthetic(&config.category, matcher, synthetic)?,
        }
        bound += 1;
    }

    if bound == 0 {
        warn!(category = %config.category, "every provider disabled, nothing registered");
        return Ok(0);
    }

    registry.enable_category(&config.category)?;
    debug!(category = %config.category, bound, "providers registered");
    Ok(bound)
}

/// Remove everything registered under `config.category`
///
/// ## Errors
///
/// `CategoryNotFound` if the category was never registered.
pub fn unregister_providers<H, R>(registry: &mut R, config: &PluginConfig) -> JuceViewResult<()>
where
    H: ValueHandle,
    R: DisplayRegistry<H> + ?Sized,
{
    registry.delete_category(&config.category)
}

/// Register providers once per process
///
/// Returns `true` if this call registered the providers and `false` if the
/// module was already loaded or every provider is disabled (the registry is
/// left untouched).
///
/// ## Errors
///
/// Propagates registration failures; the module then stays unloaded.
pub fn init_module<H, R>(registry: &mut R, config: &PluginConfig) -> JuceViewResult<bool>
where
    H: ValueHandle,
    R: DisplayRegistry<H> + ?Sized,
{
    let mut loaded = LOADED_CATEGORY.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(category) = loaded.as_deref() {
        debug!(category, "juce decoding modules already loaded");
        return Ok(false);
    }

    if register_providers(registry, config)? == 0 {
        return Ok(false);
    }
    *loaded = Some(config.category.clone());
    info!(category = %config.category, "juce decoding modules loaded");
    Ok(true)
}

/// Undo [`init_module`]
///
/// Returns `true` if a loaded category was deleted and `false` if nothing
/// was loaded.
///
/// ## Errors
///
/// Propagates the registry's failure to delete the category; the module then
/// stays loaded.
pub fn shutdown_module<H, R>(registry: &mut R) -> JuceViewResult<bool>
where
    H: ValueHandle,
    R: DisplayRegistry<H> + ?Sized,
{
    let mut loaded = LOADED_CATEGORY.lock().unwrap_or_else(PoisonError::into_inner);
    let Some(category) = loaded.clone() else {
        return Ok(false);
    };

    registry.delete_category(&category)?;
    *loaded = None;
    info!(category = %category, "juce decoding modules unloaded");
    Ok(true)
}

/// Whether [`init_module`] has registered providers in this process
pub fn is_module_loaded() -> bool
{
    LOADED_CATEGORY.lock().unwrap_or_else(PoisonError::into_inner).is_some()
}
