use crate::error::sink::SinkError;
use crate::report::{CrashReport, ReportSink, RequestLogEntry};
use crate::{CRASH_LOG_TARGET, REQUEST_LOG_TARGET};

use common::ErrorLocation;

use std::panic::Location;

use log::{Level, log, log_enabled};

/// Writes JSON lines through the `log` facade.
///
/// Crash reports go to `crash_target` at `error`, request entries to
/// `request_target` at `info`. The logger decides where each target ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSink {
    request_target: String,
    crash_target: String,
}

impl LogSink {
    pub fn new(request_target: impl Into<String>, crash_target: impl Into<String>) -> Self {
        Self {
            request_target: request_target.into(),
            crash_target: crash_target.into(),
        }
    }

    pub fn request_target(&self) -> &str {
        &self.request_target
    }

    pub fn crash_target(&self) -> &str {
        &self.crash_target
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(REQUEST_LOG_TARGET, CRASH_LOG_TARGET)
    }
}

impl ReportSink for LogSink {
    fn emit_crash(&self, report: &CrashReport) -> Result<(), SinkError> {
        let line = serde_json::to_string(report).map_err(|e| SinkError::CrashReportFailure {
            message: format!("Failed to serialize crash report {}: {e}", report.report_id),
            location: ErrorLocation::from(Location::caller()),
        })?;
        log!(target: self.crash_target.as_str(), Level::Error, "{line}");
        Ok(())
    }

    fn emit_request(&self, entry: &RequestLogEntry) -> Result<(), SinkError> {
        if !log_enabled!(target: self.request_target.as_str(), Level::Info) {
            return Ok(());
        }
        let line = serde_json::to_string(entry).map_err(|e| SinkError::RequestLogFailure {
            message: format!("Failed to serialize request log entry: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;
        log!(target: self.request_target.as_str(), Level::Info, "{line}");
        Ok(())
    }
}
