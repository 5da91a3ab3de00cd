//! # Plugin Configuration
//!
//! Which providers get registered, under which category, and the options
//! passed to every provider call.
//!
//! ## Environment Variables
//!
//! - `JUCEVIEW_CATEGORY`: display category name (default: `juce`)
//! - `JUCEVIEW_HOST_MODULE`: host adapter module the generated debugger
//!   commands refer to (default: `juceview`)
//! - `JUCEVIEW_DISABLE`: comma-separated provider names to skip
//!   (e.g. `var,component`)
//! - `JUCEVIEW_PARENT_POLARITY`: `preserve` (default) or `corrected`
//! - `JUCEVIEW_CHILD_WARNING`: array length above which a warning is logged
//!   (default: 100)
//!
//! Values that fail to parse are logged and ignored, so a typo never keeps
//! the plugin from loading.

use std::env;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::JuceViewError;

/// Default display category, matching the `-w juce` of the host commands
pub const DEFAULT_CATEGORY: &str = "juce";

/// Default host adapter module named in generated debugger commands
pub const DEFAULT_HOST_MODULE: &str = "juceview";

/// Default array length above which a diagnostic is logged
pub const DEFAULT_CHILD_COUNT_WARNING: usize = 100;

/// How the widget summary reports `hasParent`
///
/// The historical output prints `hasParent=true` when the parent pointer is
/// null. `Preserve` keeps that output byte-for-byte; `Corrected` prints
/// `true` only when a parent exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentPolarity
{
    /// `hasParent = (parentComponent == 0)`
    #[default]
    Preserve,
    /// `hasParent = (parentComponent != 0)`
    Corrected,
}

impl FromStr for ParentPolarity
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "preserve" | "legacy" => Ok(ParentPolarity::Preserve),
            "corrected" | "fixed" => Ok(ParentPolarity::Corrected),
            _ => Err(format!("Unknown parent polarity: {s}. Use 'preserve' or 'corrected'")),
        }
    }
}

/// Options every provider call receives from the host adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions
{
    pub parent_polarity: ParentPolarity,
    pub child_count_warning: usize,
}

impl Default for FormatOptions
{
    fn default() -> Self
    {
        Self { parent_polarity: ParentPolarity::Preserve, child_count_warning: DEFAULT_CHILD_COUNT_WARNING }
    }
}

/// The individual bindings the plugin can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider
{
    /// Synthetic children for `juce::ValueTree`
    ValueTree,
    /// Synthetic children for `juce::Array<*>` and `juce::ReferenceCountedArray<*>`
    Array,
    /// Summary for `juce::Component`
    Component,
    /// Summary for `juce::String`
    String,
    /// Summary for `juce::var`
    Var,
    /// Summary for `juce::Identifier`
    Identifier,
    /// Summary for `juce::ScopedPointer<*>`
    ScopedPointer,
    /// Summary for `juce::Rectangle<*>`
    Rectangle,
}

impl Provider
{
    /// Every provider in registration order
    pub const ALL: [Provider; 8] = [
        Provider::ValueTree,
        Provider::Array,
        Provider::Component,
        Provider::String,
        Provider::Var,
        Provider::Identifier,
        Provider::ScopedPointer,
        Provider::Rectangle,
    ];

    /// Short name used in configuration and listings
    pub const fn as_str(self) -> &'static str
    {
        match self {
            Provider::ValueTree => "value_tree",
            Provider::Array => "array",
            Provider::Component => "component",
            Provider::String => "string",
            Provider::Var => "var",
            Provider::Identifier => "identifier",
            Provider::ScopedPointer => "scoped_pointer",
            Provider::Rectangle => "rectangle",
        }
    }
}

impl fmt::Display for Provider
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.pad(self.as_str())
    }
}

impl FromStr for Provider
{
    type Err = JuceViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Provider::ALL
            .into_iter()
            .find(|provider| provider.as_str() == wanted || (wanted == "valuetree" && *provider == Provider::ValueTree))
            .ok_or_else(|| JuceViewError::UnknownProvider(s.to_owned()))
    }
}

/// Registration-time configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig
{
    /// Category every binding is registered under
    pub category: String,
    /// Host adapter module that defines the provider functions and classes
    pub host_module: String,
    /// Providers to leave unregistered
    pub disabled: Vec<Provider>,
    /// Options handed to provider calls
    pub options: FormatOptions,
}

impl Default for PluginConfig
{
    fn default() -> Self
    {
        Self {
            category: DEFAULT_CATEGORY.to_owned(),
            host_module: DEFAULT_HOST_MODULE.to_owned(),
            disabled: Vec::new(),
            options: FormatOptions::default(),
        }
    }
}

impl PluginConfig
{
    /// Read configuration from the process environment
    pub fn from_env() -> Self
    {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    ///
    /// ## Example
    ///
    /// ```rust
    /// use juceview_core::config::{ParentPolarity, PluginConfig, Provider};
    ///
    /// let config = PluginConfig::from_lookup(|key| match key {
    ///     "JUCEVIEW_DISABLE" => Some("var, component".to_owned()),
    ///     "JUCEVIEW_PARENT_POLARITY" => Some("corrected".to_owned()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.category, "juce");
    /// assert_eq!(config.disabled, vec![Provider::Var, Provider::Component]);
    /// assert_eq!(config.options.parent_polarity, ParentPolarity::Corrected);
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self
    {
        let mut config = Self::default();

        if let Some(category) = lookup("JUCEVIEW_CATEGORY").map(|s| s.trim().to_owned()) {
            if category.is_empty() {
                warn!("JUCEVIEW_CATEGORY is empty, keeping {}", config.category);
            } else {
                config.category = category;
            }
        }

        if let Some(module) = lookup("JUCEVIEW_HOST_MODULE").map(|s| s.trim().to_owned()) {
            if is_module_path(&module) {
                config.host_module = module;
            } else {
                warn!("Ignoring JUCEVIEW_HOST_MODULE={module}: not a dotted identifier path");
            }
        }

        if let Some(list) = lookup("JUCEVIEW_DISABLE") {
            for name in list.split(',').filter(|name| !name.trim().is_empty()) {
                match name.parse::<Provider>() {
                    Ok(provider) if !config.disabled.contains(&provider) => config.disabled.push(provider),
                    Ok(_) => {}
                    Err(e) => warn!("Ignoring JUCEVIEW_DISABLE entry: {e}"),
                }
            }
        }

        if let Some(polarity) = lookup("JUCEVIEW_PARENT_POLARITY") {
            match polarity.parse::<ParentPolarity>() {
                Ok(polarity) => config.options.parent_polarity = polarity,
                Err(e) => warn!("Ignoring JUCEVIEW_PARENT_POLARITY: {e}"),
            }
        }

        if let Some(threshold) = lookup("JUCEVIEW_CHILD_WARNING") {
            match threshold.trim().parse::<usize>() {
                Ok(threshold) => config.options.child_count_warning = threshold,
                Err(e) => warn!("Ignoring JUCEVIEW_CHILD_WARNING={threshold}: {e}"),
            }
        }

        config
    }

    /// Whether `provider` should be registered
    pub fn is_enabled(&self, provider: Provider) -> bool
    {
        !self.disabled.contains(&provider)
    }
}

/// `name` or `package.name`, each part an identifier
fn is_module_path(module: &str) -> bool
{
    !module.is_empty()
        && module.split('.').all(|part| {
            part.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
