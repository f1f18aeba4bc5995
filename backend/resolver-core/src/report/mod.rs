//! Diagnostic side effects of a resolution: crash reports, request log
//! entries and observer signals.

pub mod log_sink;
pub mod signals;

pub use log_sink::LogSink;
pub use signals::{ResolutionObserver, ResolutionSignal};

use crate::context::RequestContext;
use crate::error::sink::SinkError;
use crate::exception::ApiException;
use crate::resolution::Strategy;

use common::HttpStatusCode;

use std::collections::BTreeMap;
use std::time::SystemTime;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Structured record of a server-side failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrashReport {
    pub report_id: Uuid,
    pub timestamp: String,
    pub method: String,
    pub absolute_url: String,
    pub body: Option<Value>,
    pub metadata: BTreeMap<String, String>,
    pub view: String,
    pub exception_kind: String,
    pub exception_message: String,
    pub status: HttpStatusCode,
    pub stack_trace: String,
}

impl CrashReport {
    pub fn new(
        request: &RequestContext,
        view: &str,
        exception: &dyn ApiException,
        status: HttpStatusCode,
        stack_trace: String,
    ) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            timestamp: humantime::format_rfc3339_millis(SystemTime::now()).to_string(),
            method: request.method.clone(),
            absolute_url: request.absolute_url().to_string(),
            body: request.body.clone(),
            metadata: request.metadata.clone(),
            view: view.to_string(),
            exception_kind: exception.kind().name().to_string(),
            exception_message: exception.to_string(),
            status,
            stack_trace,
        }
    }
}

/// One audit line per handled exception.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestLogEntry {
    pub view: String,
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
    pub metadata: BTreeMap<String, String>,
    pub status: HttpStatusCode,
    /// `None` when resolution failed and the fallback body was used.
    pub strategy: Option<Strategy>,
}

impl RequestLogEntry {
    pub fn new(
        request: &RequestContext,
        view: &str,
        status: HttpStatusCode,
        strategy: Option<Strategy>,
    ) -> Self {
        Self {
            view: view.to_string(),
            method: request.method.clone(),
            path: request.path().to_string(),
            body: request.body.clone(),
            metadata: request.metadata.clone(),
            status,
            strategy,
        }
    }
}

/// Destination for crash reports and request log entries.
///
/// Errors returned here are logged and dropped by the resolver.
pub trait ReportSink: Send + Sync {
    fn emit_crash(&self, report: &CrashReport) -> Result<(), SinkError>;

    fn emit_request(&self, entry: &RequestLogEntry) -> Result<(), SinkError>;
}
