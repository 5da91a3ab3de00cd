//! # Error Types
//!
//! Errors raised at the setup seams of the plugin.
//!
//! Host callbacks (summaries and synthetic children) never return these to the
//! debugger: they degrade to placeholder output instead. Errors only surface
//! from registration, snapshot loading, and the one reflection operation that
//! can fault (constructing a child at a byte offset), whose callers convert the
//! fault into "no such child".
//!
//! We use `thiserror` to generate the `Error` implementations and messages.

use thiserror::Error;

use crate::types::Address;

/// Main error type for juceview operations
///
/// ## Error Categories
///
/// 1. **Path errors**: InvalidFieldPath
/// 2. **Memory errors**: MemoryUnavailable, OffsetOverflow, AddressOverflow
/// 3. **Registration errors**: InvalidPattern, CategoryNotFound, UnknownProvider
/// 4. **Snapshot errors**: Snapshot, Json, Io
#[derive(Error, Debug)]
pub enum JuceViewError
{
    /// A dotted field path was empty or contained an empty segment
    #[error("Invalid field path: {0:?}")]
    InvalidFieldPath(String),

    /// Nothing is mapped at the requested address in the inspected process
    ///
    /// Returned by hosts when a child is requested at an offset that points
    /// outside readable memory (a dangling element pointer, a stale count).
    #[error("Memory unavailable at {0}")]
    MemoryUnavailable(Address),

    /// An element index times the element size does not fit in 64 bits
    #[error("Offset overflow: index {index} with element size {element_size}")]
    OffsetOverflow
    {
        /// Requested element index
        index: u64,
        /// Element byte size
        element_size: u64,
    },

    /// A byte offset past a pointer wraps the address space
    #[error("Address overflow: {base} + {offset:#x}")]
    AddressOverflow
    {
        /// Address held by the pointer
        base: Address,
        /// Requested byte offset
        offset: u64,
    },

    /// A type-name pattern failed to compile
    #[error("Invalid type pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The named display category has not been registered
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// A provider name did not match any known provider
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// A snapshot document is structurally inconsistent
    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    /// Snapshot JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (reading snapshot files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result<T, JuceViewError>`
///
/// ```rust
/// use juceview_core::error::JuceViewResult;
/// fn foo() -> JuceViewResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type JuceViewResult<T> = std::result::Result<T, JuceViewError>;
