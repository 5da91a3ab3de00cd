//! # juceview Utilities
//!
//! Shared utilities and logging for juceview.
//!
//! The providers run inside a host debugger whose console belongs to the
//! user, so diagnostics go through `tracing` and end up either on stderr (the
//! CLI) or in a log file (when loaded into a debugger).

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{host_log_path, init_logging, init_logging_for_host, init_logging_with_level, LogFormat, LogLevel, LoggingError};
pub use tracing::{debug, error, info, trace, warn};
