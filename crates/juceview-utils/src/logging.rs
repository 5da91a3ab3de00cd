//! # Logging Utilities
//!
//! Logging infrastructure for juceview using `tracing`.
//!
//! Two setups are provided:
//! - **Console** ([`init_logging`], [`init_logging_with_level`]): the CLI.
//!   Logs go to stderr so rendered values on stdout stay pipeable, with an
//!   optional extra log file.
//! - **Host** ([`init_logging_for_host`]): the plugin loaded into a debugger.
//!   Logs go to a dated file only; the debugger console is never written to.
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level filter (e.g., `RUST_LOG=debug`, `RUST_LOG=juceview_core=trace`)
//! - `JUCEVIEW_LOG_FORMAT`: Set output format (`json` or `pretty`, default: `pretty`)
//! - `JUCEVIEW_LOG_FILE`: Optional path to an additional daily-rolled log file (console mode)
//!
//! ## Example
//!
//! ```rust,no_run
//! use juceview_utils::{init_logging_with_level, LogFormat, LogLevel};
//!
//! init_logging_with_level(LogLevel::Debug, LogFormat::Pretty).expect("Failed to initialize logging");
//! tracing::debug!("array refreshed");
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};
use std::{env, io};

use chrono::Utc;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Writer guards for installed file layers; dropping one would stop its flush thread.
static FILE_GUARDS: Mutex<Vec<WorkerGuard>> = Mutex::new(Vec::new());

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format (default)
    Pretty,
    /// JSON format, one event per line
    Json,
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(format!("{s}. Use 'pretty' or 'json'"))),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    Info,
    /// Debug level
    Debug,
    /// Trace level (most verbose)
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(format!(
                "{s}. Use 'error', 'warn', 'info', 'debug', or 'trace'"
            ))),
        }
    }
}

/// Initialize console logging with default settings
///
/// Reads `RUST_LOG`, `JUCEVIEW_LOG_FORMAT` and `JUCEVIEW_LOG_FILE`.
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> Result<(), LoggingError>
{
    let format = env::var("JUCEVIEW_LOG_FORMAT")
        .ok()
        .and_then(|s| LogFormat::from_str(&s).ok())
        .unwrap_or(LogFormat::Pretty);

    let default_level = env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<LogLevel>().ok())
        .map_or(Level::INFO, Into::into);

    init_console(format, default_level)
}

/// Initialize console logging with an explicit default level and format
///
/// `RUST_LOG` still overrides the level when set, so module-specific filters
/// keep working.
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<(), LoggingError>
{
    init_console(format, level.into())
}

/// Initialize file-only logging for use inside a host debugger
///
/// Writes to [`host_log_path`]. Level priority: `level` if given, then
/// `RUST_LOG`, then `INFO`.
///
/// ## Example
///
/// ```rust,no_run
/// use juceview_utils::{init_logging_for_host, LogLevel};
///
/// let path = init_logging_for_host(Some(LogLevel::Debug)).expect("Failed to initialize logging");
/// eprintln!("juceview diagnostics: {}", path.display());
/// ```
///
/// ## Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init_logging_for_host(level: Option<LogLevel>) -> Result<PathBuf, LoggingError>
{
    let log_file = host_log_path();
    if let Some(directory) = log_file.parent() {
        std::fs::create_dir_all(directory)?;
    }

    let filter = match level {
        Some(level) => EnvFilter::new(Level::from(level).to_string()),
        None => match env::var("RUST_LOG") {
            Ok(rust_log) => EnvFilter::try_new(&rust_log).unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string())),
            Err(_) => EnvFilter::new(Level::INFO.to_string()),
        },
    };

    // The date is already in the file name, so the file never rolls.
    let appender = tracing_appender::rolling::never(directory_of(&log_file), file_name_of(&log_file));
    let (layer, guard) = file_layer(appender, LogFormat::Pretty, filter);

    install(vec![layer], vec![guard])?;
    Ok(log_file)
}

/// Dated log file used by [`init_logging_for_host`]
///
/// `~/.juceview/YYYY-MM-DD-juceview.log`, or the same name in the system
/// temp directory when `HOME` is not set.
pub fn host_log_path() -> PathBuf
{
    let file_name = format!("{}-juceview.log", Utc::now().format("%Y-%m-%d"));
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".juceview").join(file_name),
        Err(_) => env::temp_dir().join(file_name),
    }
}

fn default_filter(default_level: Level) -> EnvFilter
{
    // RUST_LOG can override the default level with more specific filters
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.to_string()))
}

fn init_console(format: LogFormat, default_level: Level) -> Result<(), LoggingError>
{
    let mut layers = vec![console_layer(format, default_filter(default_level))];
    let mut guards = Vec::new();

    if let Some(file_path) = env::var("JUCEVIEW_LOG_FILE").ok().map(PathBuf::from) {
        let appender = tracing_appender::rolling::daily(directory_of(&file_path), file_name_of(&file_path));
        let (layer, guard) = file_layer(appender, format, default_filter(default_level));
        layers.push(layer);
        guards.push(guard);
    }

    install(layers, guards)
}

/// Install `layers` globally; `guards` are kept only if that succeeds.
fn install(layers: Vec<BoxedLayer>, guards: Vec<WorkerGuard>) -> Result<(), LoggingError>
{
    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;

    FILE_GUARDS.lock().unwrap_or_else(PoisonError::into_inner).extend(guards);
    Ok(())
}

fn directory_of(path: &Path) -> PathBuf
{
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn file_name_of(path: &Path) -> PathBuf
{
    path.file_name().map_or_else(|| PathBuf::from("juceview.log"), PathBuf::from)
}

fn console_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(true)
            .with_writer(io::stderr)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(io::stderr)
            .with_filter(filter)
            .boxed(),
    }
}

fn file_layer(appender: RollingFileAppender, format: LogFormat, filter: EnvFilter) -> (BoxedLayer, WorkerGuard)
{
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let layer = match format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(false) // No ANSI in files
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    };
    (layer, guard)
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    /// Invalid log level
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}
