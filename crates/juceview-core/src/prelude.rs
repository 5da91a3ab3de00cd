//! Common module for library exports

pub use crate::children::{ArrayChildren, SyntheticChildren, ValueTreeChildren, NO_CHILD_INDEX};
pub use crate::config::{FormatOptions, ParentPolarity, PluginConfig, Provider};
pub use crate::error::{JuceViewError, JuceViewResult};
pub use crate::field::UNINITIALIZED;
pub use crate::plugin::{init_module, register_providers, shutdown_module, unregister_providers};
pub use crate::reflect::{TypeHandle, ValueHandle};
pub use crate::registry::{CommandScript, DisplayRegistry, TypeCategories, TypeMatcher};
pub use crate::types::Address;
