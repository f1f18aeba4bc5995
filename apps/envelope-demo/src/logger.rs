//! Logging for the envelope demo.
//!
//! Three outputs with thread-safe initialization: coloured stdout, a plain
//! `envelope.log` file, and a `crash.log` file that receives only the
//! crash-report target.

use crate::error::DemoError;

use common::ErrorLocation;

use std::io::stdout;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "envelope.log";
pub const CRASH_LOG_FILE_NAME: &str = "crash.log";

/// Message logged when logger is successfully initialized.
const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";

/// Warning message when logger is called multiple times.
const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

/// Default log level for debug builds.
#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Default log level for release builds.
#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Initialize the logger.
///
/// Safe to call multiple times: later calls log a warning and return Ok.
///
/// # Arguments
///
/// * `log_dir` - Directory where both log files are created
/// * `crash_target` - Log target routed to `crash.log` instead of `envelope.log`
///
/// # Errors
///
/// Returns an error if:
/// - A log file cannot be created
/// - Logger dispatch configuration fails
pub fn initialize(log_dir: &Path, crash_target: &str) -> Result<(), DemoError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_dir, crash_target);
        if result.is_ok() {
            info!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{LOG_LEVEL:?}");
        }
    });

    result
}

#[track_caller]
pub(crate) fn initialize_internal(log_dir: &Path, crash_target: &str) -> Result<(), DemoError> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);
    let crash_file_path = log_dir.join(CRASH_LOG_FILE_NAME);

    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let base_dispatch = Dispatch::new().level(LOG_LEVEL);

    // Stdout dispatch (colored)
    let stdout_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(stdout());

    // Everything except crash reports
    let file_target = crash_target.to_string();
    let file_dispatch = Dispatch::new()
        .filter(move |metadata| metadata.target() != file_target)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level} - {target}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                target = record.target(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(open_log_file(&log_file_path)?);

    // Crash reports only, one JSON record per line
    let crash_only = crash_target.to_string();
    let crash_dispatch = Dispatch::new()
        .filter(move |metadata| metadata.target() == crash_only)
        .format(|out, message, _| out.finish(format_args!("{message}")))
        .chain(open_log_file(&crash_file_path)?);

    base_dispatch
        .chain(stdout_dispatch)
        .chain(file_dispatch)
        .chain(crash_dispatch)
        .apply()
        .map_err(|e| DemoError::Demo {
            message: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::from(std::panic::Location::caller()),
        })?;

    Ok(())
}

#[track_caller]
fn open_log_file(path: &Path) -> Result<std::fs::File, DemoError> {
    fern::log_file(path).map_err(|e| DemoError::Demo {
        message: format!("Failed to create log file {}: {e}", path.display()),
        location: ErrorLocation::from(std::panic::Location::caller()),
    })
}
