use crate::context::{RequestContext, ResolutionContext, ResponseState, View};
use crate::error::sink::SinkError;
use crate::error_model::ErrorModel;
use crate::exception::ApiException;
use crate::report::{CrashReport, ReportSink, RequestLogEntry, ResolutionObserver, ResolutionSignal};

use common::ErrorLocation;
use models::{Model, ModelSchema};

use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Sink keeping everything it is given. Optionally fails every call.
#[derive(Default)]
pub struct RecordingSink {
    pub crashes: Mutex<Vec<CrashReport>>,
    pub requests: Mutex<Vec<RequestLogEntry>>,
    pub failing: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn crash_count(&self) -> usize {
        self.crashes.lock().unwrap().len()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl ReportSink for RecordingSink {
    fn emit_crash(&self, report: &CrashReport) -> Result<(), SinkError> {
        self.crashes.lock().unwrap().push(report.clone());
        if self.failing {
            return Err(SinkError::CrashReportFailure {
                message: "disk full".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    fn emit_request(&self, entry: &RequestLogEntry) -> Result<(), SinkError> {
        self.requests.lock().unwrap().push(entry.clone());
        if self.failing {
            return Err(SinkError::RequestLogFailure {
                message: "disk full".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    pub signals: Mutex<Vec<ResolutionSignal>>,
}

impl ResolutionObserver for RecordingObserver {
    fn on_resolved(&self, signal: &ResolutionSignal) {
        self.signals.lock().unwrap().push(signal.clone());
    }
}

type OnError = Box<dyn Fn(&ResolutionContext<'_>) -> Option<Model> + Send + Sync>;

/// View with optional `on_error`, error model and success model.
pub struct TestView {
    pub name: String,
    pub on_error: Option<OnError>,
    pub on_error_calls: AtomicUsize,
    pub error_model: Option<ErrorModel>,
    pub success_model: Option<Arc<ModelSchema>>,
}

impl TestView {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            on_error: None,
            on_error_calls: AtomicUsize::new(0),
            error_model: None,
            success_model: None,
        }
    }

    pub fn with_on_error<F>(mut self, on_error: F) -> Self
    where
        F: Fn(&ResolutionContext<'_>) -> Option<Model> + Send + Sync + 'static,
    {
        self.on_error = Some(Box::new(on_error));
        self
    }

    pub fn calls(&self) -> usize {
        self.on_error_calls.load(Ordering::SeqCst)
    }
}

impl View for TestView {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_error(&self, context: &ResolutionContext<'_>) -> Option<Model> {
        self.on_error_calls.fetch_add(1, Ordering::SeqCst);
        self.on_error.as_ref().and_then(|on_error| on_error(context))
    }

    fn error_model(&self) -> Option<&ErrorModel> {
        self.error_model.as_ref()
    }

    fn success_model(&self) -> Option<Arc<ModelSchema>> {
        self.success_model.clone()
    }
}

pub fn request() -> RequestContext {
    RequestContext::parse("POST", "https://api.example.com/v1/orders?page=2")
        .unwrap()
        .with_body(serde_json::json!({"item": "book"}))
        .with_metadata("REMOTE_ADDR", "10.0.0.7")
}

pub fn restful() -> ErrorModel {
    ErrorModel::restful().unwrap()
}

/// Run `f` with a resolution context built around `exception`.
pub fn with_context<R>(
    exception: &dyn ApiException,
    view: Option<&dyn View>,
    error_model: &ErrorModel,
    f: impl FnOnce(&ResolutionContext<'_>) -> R,
) -> R {
    let request = request();
    let response = ResponseState::for_exception(exception);
    let context = ResolutionContext {
        exception,
        view,
        request: &request,
        response: &response,
        error_model,
    };
    f(&context)
}
