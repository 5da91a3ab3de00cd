//! # Display Registry
//!
//! Binding providers to type names.
//!
//! The host debugger owns a type-display registry organised in named
//! categories that are enabled or deleted as a unit. [`DisplayRegistry`] is
//! that registry as seen from the plugin. Two implementations ship here:
//!
//! - [`TypeCategories`]: an in-process registry that can also answer lookups
//!   ("which summary applies to this value?"), used by hosts that call the
//!   providers directly and by the CLI renderer.
//! - [`CommandScript`]: records registration as the host command lines a
//!   command-driven debugger executes (`type summary add ...`).

use std::fmt;
use std::marker::PhantomData;

use regex::Regex;
use tracing::{debug, info};

use crate::children::{SyntheticChildren, SyntheticFactory};
use crate::config::{FormatOptions, Provider, DEFAULT_HOST_MODULE};
use crate::error::{JuceViewError, JuceViewResult};
use crate::reflect::{TypeHandle, ValueHandle};
use crate::summary::SummaryFn;

/// Which type names a binding applies to
#[derive(Debug, Clone)]
pub enum TypeMatcher
{
    /// The exact type name
    Exact(String),
    /// Any type name matching the pattern
    Pattern(Regex),
}

impl TypeMatcher
{
    /// Exact type-name matcher
    pub fn exact(type_name: impl Into<String>) -> Self
    {
        TypeMatcher::Exact(type_name.into())
    }

    /// Pattern matcher
    ///
    /// ## Errors
    ///
    /// Returns `InvalidPattern` if the pattern does not compile.
    pub fn pattern(pattern: &str) -> JuceViewResult<Self>
    {
        Ok(TypeMatcher::Pattern(Regex::new(pattern)?))
    }

    /// Whether `type_name` is covered by this matcher
    pub fn matches(&self, type_name: &str) -> bool
    {
        match self {
            TypeMatcher::Exact(name) => name == type_name,
            TypeMatcher::Pattern(regex) => regex.is_match(type_name),
        }
    }

    /// Whether this is a pattern matcher
    pub fn is_pattern(&self) -> bool
    {
        matches!(self, TypeMatcher::Pattern(_))
    }
}

impl fmt::Display for TypeMatcher
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            TypeMatcher::Exact(name) => f.write_str(name),
            TypeMatcher::Pattern(regex) => f.write_str(regex.as_str()),
        }
    }
}

/// A summary provider ready to be bound
pub struct SummaryProvider<H: ValueHandle>
{
    pub provider: Provider,
    /// Function name inside the host adapter module (`string_summary`)
    pub function: &'static str,
    pub format: SummaryFn<H>,
}

/// A synthetic-children provider ready to be bound
pub struct SyntheticProvider<H: ValueHandle>
{
    pub provider: Provider,
    /// Class name inside the host adapter module (`ArrayChildrenProvider`)
    pub class: &'static str,
    pub construct: SyntheticFactory<H>,
}

// Manual impls: function pointers are Copy for every H, derives would demand H: Copy.
impl<H: ValueHandle> Clone for SummaryProvider<H>
{
    fn clone(&self) -> Self
    {
        *self
    }
}

impl<H: ValueHandle> Copy for SummaryProvider<H> {}

impl<H: ValueHandle> Clone for SyntheticProvider<H>
{
    fn clone(&self) -> Self
    {
        *self
    }
}

impl<H: ValueHandle> Copy for SyntheticProvider<H> {}

impl<H: ValueHandle> fmt::Debug for SummaryProvider<H>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("SummaryProvider").field("provider", &self.provider).field("function", &self.function).finish()
    }
}

impl<H: ValueHandle> fmt::Debug for SyntheticProvider<H>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("SyntheticProvider").field("provider", &self.provider).field("class", &self.class).finish()
    }
}

/// The host's type-display registry
pub trait DisplayRegistry<H: ValueHandle>
{
    /// Bind a summary provider to `matcher` in `category`
    ///
    /// ## Errors
    ///
    /// Implementation-specific; the in-crate registries never fail here.
    fn add_summary(&mut self, category: &str, matcher: TypeMatcher, provider: SummaryProvider<H>) -> JuceViewResult<()>;

    /// Bind a synthetic-children provider to `matcher` in `category`
    ///
    /// ## Errors
    ///
    /// Implementation-specific; the in-crate registries never fail here.
    fn add_synthetic(&mut self, category: &str, matcher: TypeMatcher, provider: SyntheticProvider<H>) -> JuceViewResult<()>;

    /// Make a category's bindings active
    ///
    /// ## Errors
    ///
    /// `CategoryNotFound` if nothing was registered under `category`.
    fn enable_category(&mut self, category: &str) -> JuceViewResult<()>;

    /// Remove a category and all of its bindings
    ///
    /// ## Errors
    ///
    /// `CategoryNotFound` if nothing was registered under `category`.
    fn delete_category(&mut self, category: &str) -> JuceViewResult<()>;
}

/// What a binding provides
#[derive(Debug)]
pub enum BindingKind<H: ValueHandle>
{
    Summary(SummaryProvider<H>),
    Synthetic(SyntheticProvider<H>),
}

impl<H: ValueHandle> BindingKind<H>
{
    /// Provider behind this binding
    pub fn provider(&self) -> Provider
    {
        match self {
            BindingKind::Summary(summary) => summary.provider,
            BindingKind::Synthetic(synthetic) => synthetic.provider,
        }
    }

    /// `summary` or `synthetic`
    pub fn label(&self) -> &'static str
    {
        match self {
            BindingKind::Summary(_) => "summary",
            BindingKind::Synthetic(_) => "synthetic",
        }
    }
}

/// One registered binding
#[derive(Debug)]
pub struct Binding<H: ValueHandle>
{
    pub matcher: TypeMatcher,
    pub kind: BindingKind<H>,
}

/// A named, toggleable group of bindings
#[derive(Debug)]
pub struct Category<H: ValueHandle>
{
    pub name: String,
    pub enabled: bool,
    pub bindings: Vec<Binding<H>>,
}

/// In-process display registry with type lookup
///
/// Lookups consider enabled categories only, in registration order. Within
/// that set an exact type-name binding wins over a pattern binding; among
/// bindings of the same kind the first registered wins.
///
/// ## Example
///
/// ```rust
/// use juceview_core::plugin::register_providers;
/// use juceview_core::registry::TypeCategories;
/// use juceview_core::snapshot::SnapshotValue;
/// use juceview_core::PluginConfig;
///
/// let mut registry = TypeCategories::<SnapshotValue>::new();
/// register_providers(&mut registry, &PluginConfig::default())?;
/// assert!(registry.summary_for_type("juce::String").is_some());
/// assert!(registry.synthetic_for_type("juce::Array<float>").is_some());
/// assert!(registry.summary_for_type("std::string").is_none());
/// # Ok::<(), juceview_core::JuceViewError>(())
/// ```
#[derive(Debug)]
pub struct TypeCategories<H: ValueHandle>
{
    categories: Vec<Category<H>>,
}

impl<H: ValueHandle> Default for TypeCategories<H>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<H: ValueHandle> TypeCategories<H>
{
    /// Create an empty registry
    pub fn new() -> Self
    {
        Self { categories: Vec::new() }
    }

    /// Every category, enabled or not
    pub fn categories(&self) -> &[Category<H>]
    {
        &self.categories
    }

    /// Category by name
    pub fn category(&self, name: &str) -> Option<&Category<H>>
    {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Disable a category without deleting it
    ///
    /// ## Errors
    ///
    /// `CategoryNotFound` if nothing was registered under `category`.
    pub fn disable_category(&mut self, category: &str) -> JuceViewResult<()>
    {
        self.category_mut(category)?.enabled = false;
        Ok(())
    }

    fn category_mut(&mut self, name: &str) -> JuceViewResult<&mut Category<H>>
    {
        self.categories
            .iter_mut()
            .find(|category| category.name == name)
            .ok_or_else(|| JuceViewError::CategoryNotFound(name.to_owned()))
    }

    fn bind(&mut self, category: &str, binding: Binding<H>)
    {
        debug!(category, matcher = %binding.matcher, kind = binding.kind.label(), provider = %binding.kind.provider(), "binding added");
        match self.categories.iter_mut().find(|existing| existing.name == category) {
            Some(existing) => existing.bindings.push(binding),
            None => self.categories.push(Category { name: category.to_owned(), enabled: false, bindings: vec![binding] }),
        }
    }

    fn find_binding(&self, type_name: &str, wanted: impl Fn(&BindingKind<H>) -> bool) -> Option<&Binding<H>>
    {
        let candidates = || {
            self.categories
                .iter()
                .filter(|category| category.enabled)
                .flat_map(|category| category.bindings.iter())
                .filter(|binding| wanted(&binding.kind) && binding.matcher.matches(type_name))
        };

        candidates()
            .find(|binding| !binding.matcher.is_pattern())
            .or_else(|| candidates().next())
    }

    /// Summary provider that applies to `type_name`
    pub fn summary_for_type(&self, type_name: &str) -> Option<SummaryProvider<H>>
    {
        match self.find_binding(type_name, |kind| matches!(kind, BindingKind::Summary(_)))?.kind {
            BindingKind::Summary(summary) => Some(summary),
            BindingKind::Synthetic(_) => None,
        }
    }

    /// Synthetic-children provider that applies to `type_name`
    pub fn synthetic_for_type(&self, type_name: &str) -> Option<SyntheticProvider<H>>
    {
        match self.find_binding(type_name, |kind| matches!(kind, BindingKind::Synthetic(_)))?.kind {
            BindingKind::Synthetic(synthetic) => Some(synthetic),
            BindingKind::Summary(_) => None,
        }
    }

    /// Run the applicable summary provider on `value`
    pub fn summarize(&self, value: &H, options: &FormatOptions) -> Option<String>
    {
        let provider = self.summary_for_type(&value.value_type().name())?;
        Some((provider.format)(value, options))
    }

    /// Construct the applicable synthetic-children provider for `value`
    pub fn synthetic_children(&self, value: &H, options: &FormatOptions) -> Option<Box<dyn SyntheticChildren<H>>>
    {
        let provider = self.synthetic_for_type(&value.value_type().name())?;
        Some((provider.construct)(value.clone(), options))
    }
}

impl<H: ValueHandle> DisplayRegistry<H> for TypeCategories<H>
{
    fn add_summary(&mut self, category: &str, matcher: TypeMatcher, provider: SummaryProvider<H>) -> JuceViewResult<()>
    {
        self.bind(category, Binding { matcher, kind: BindingKind::Summary(provider) });
        Ok(())
    }

    fn add_synthetic(&mut self, category: &str, matcher: TypeMatcher, provider: SyntheticProvider<H>) -> JuceViewResult<()>
    {
        self.bind(category, Binding { matcher, kind: BindingKind::Synthetic(provider) });
        Ok(())
    }

    fn enable_category(&mut self, category: &str) -> JuceViewResult<()>
    {
        self.category_mut(category)?.enabled = true;
        info!(category, "category enabled");
        Ok(())
    }

    fn delete_category(&mut self, category: &str) -> JuceViewResult<()>
    {
        let before = self.categories.len();
        self.categories.retain(|existing| existing.name != category);
        if self.categories.len() == before {
            return Err(JuceViewError::CategoryNotFound(category.to_owned()));
        }
        info!(category, "category deleted");
        Ok(())
    }
}

/// Registration rendered as host command lines
///
/// The lines name provider functions and classes as `<module>.<name>`. They
/// only resolve once a host adapter module of that name, exposing every
/// provider under its registry name, has been imported into the debugger.
/// The module defaults to [`DEFAULT_HOST_MODULE`].
///
/// ```rust
/// use juceview_core::plugin::register_providers;
/// use juceview_core::registry::CommandScript;
/// use juceview_core::snapshot::SnapshotValue;
/// use juceview_core::PluginConfig;
///
/// let mut script = CommandScript::<SnapshotValue>::with_module("juce_lldb");
/// register_providers(&mut script, &PluginConfig::default())?;
/// assert_eq!(script.lines()[2], "type summary add juce::Component -F juce_lldb.component_summary -w juce");
/// assert_eq!(script.lines().last().unwrap(), "type category enable juce");
/// # Ok::<(), juceview_core::JuceViewError>(())
/// ```
#[derive(Debug)]
pub struct CommandScript<H: ValueHandle>
{
    module: String,
    lines: Vec<String>,
    categories: Vec<String>,
    _handle: PhantomData<fn() -> H>,
}

impl<H: ValueHandle> Default for CommandScript<H>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<H: ValueHandle> CommandScript<H>
{
    /// Create an empty script referring to [`DEFAULT_HOST_MODULE`]
    pub fn new() -> Self
    {
        Self::with_module(DEFAULT_HOST_MODULE)
    }

    /// Create an empty script referring to the host adapter module `module`
    pub fn with_module(module: impl Into<String>) -> Self
    {
        Self { module: module.into(), lines: Vec::new(), categories: Vec::new(), _handle: PhantomData }
    }

    /// Host adapter module the provider names are qualified with
    pub fn module(&self) -> &str
    {
        &self.module
    }

    /// Command lines in execution order
    pub fn lines(&self) -> &[String]
    {
        &self.lines
    }

    fn note_category(&mut self, category: &str)
    {
        if !self.categories.iter().any(|existing| existing == category) {
            self.categories.push(category.to_owned());
        }
    }

    fn require_category(&self, category: &str) -> JuceViewResult<()>
    {
        if self.categories.iter().any(|existing| existing == category) {
            Ok(())
        } else {
            Err(JuceViewError::CategoryNotFound(category.to_owned()))
        }
    }
}

fn matcher_arguments(matcher: &TypeMatcher) -> String
{
    match matcher {
        TypeMatcher::Exact(name) if name.contains(char::is_whitespace) => format!("\"{name}\""),
        TypeMatcher::Exact(name) => name.clone(),
        TypeMatcher::Pattern(regex) => format!("-x \"{}\"", regex.as_str()),
    }
}

impl<H: ValueHandle> DisplayRegistry<H> for CommandScript<H>
{
    fn add_summary(&mut self, category: &str, matcher: TypeMatcher, provider: SummaryProvider<H>) -> JuceViewResult<()>
    {
        self.note_category(category);
        self.lines.push(format!(
            "type summary add {} -F {}.{} -w {category}",
            matcher_arguments(&matcher),
            self.module,
            provider.function
        ));
        Ok(())
    }

    fn add_synthetic(&mut self, category: &str, matcher: TypeMatcher, provider: SyntheticProvider<H>) -> JuceViewResult<()>
    {
        self.note_category(category);
        self.lines.push(format!(
            "type synthetic add {} --python-class {}.{} -w {category}",
            matcher_arguments(&matcher),
            self.module,
            provider.class
        ));
        Ok(())
    }

    fn enable_category(&mut self, category: &str) -> JuceViewResult<()>
    {
        self.require_category(category)?;
        self.lines.push(format!("type category enable {category}"));
        Ok(())
    }

    fn delete_category(&mut self, category: &str) -> JuceViewResult<()>
    {
        self.require_category(category)?;
        self.categories.retain(|existing| existing != category);
        self.lines.push(format!("type category delete {category}"));
        Ok(())
    }
}
