use crate::context::{RequestContext, ResolutionContext, ResponseState, View, view_name};
use crate::error::resolution::ResolutionError;
use crate::error_model::ErrorModel;
use crate::exception::ApiException;
use crate::report::{CrashReport, RequestLogEntry, ResolutionSignal};
use crate::resolution::{Resolver, SYSTEM_ERROR_CODE, SYSTEM_ERROR_DETAILS, Strategy};

use common::{ErrorLocation, HttpStatusCode};
use models::Envelope;

use std::backtrace::Backtrace;
use std::panic::Location;

use log::{error, warn};
use serde_json::json;

impl Resolver {
    /// Turn `exception` into the response envelope the host writes out.
    ///
    /// The view's error model is used when it declares one, the
    /// configured one otherwise. Resolution failures become the fixed
    /// internal-error envelope (status 500) unless debug mode is on, in
    /// which case they come back as [`ResolutionError::Surfaced`].
    ///
    /// Crash report (status >= 500), request log entry and observer
    /// signals are emitted once per call, whatever the outcome.
    pub fn handle_exception(
        &self,
        exception: &dyn ApiException,
        view: Option<&dyn View>,
        request: &RequestContext,
    ) -> Result<Envelope, ResolutionError> {
        let response = ResponseState::for_exception(exception);

        let resolved = self.error_model_for(view).and_then(|error_model| {
            let context = ResolutionContext {
                exception,
                view,
                request,
                response: &response,
                error_model,
            };
            self.resolve(&context)
        });

        match resolved {
            Ok(resolved) => {
                let envelope = resolved
                    .model
                    .respond(response.status, response.headers.clone());
                self.emit(exception, view, request, envelope.status, Some(resolved.strategy));
                Ok(envelope)
            }
            Err(failure) => {
                let trace =
                    self.emit(exception, view, request, HttpStatusCode::INTERNAL_SERVER_ERROR, None);

                if self.settings.debug {
                    return Err(ResolutionError::Surfaced {
                        kind: exception.kind().name().to_string(),
                        exception: exception.to_string(),
                        trace: trace.unwrap_or_default(),
                        location: ErrorLocation::from(Location::caller()),
                        source: Box::new(failure),
                    });
                }

                error!(
                    "Failed to handle {} in {}: {failure}",
                    exception.kind(),
                    view_name(view)
                );
                Ok(system_error_envelope())
            }
        }
    }

    #[track_caller]
    fn error_model_for<'a>(
        &'a self,
        view: Option<&'a dyn View>,
    ) -> Result<&'a ErrorModel, ResolutionError> {
        view.and_then(|view| view.error_model())
            .or(self.settings.error_model.as_ref())
            .ok_or_else(|| ResolutionError::ConfigurationError {
                message: format!(
                    "No error model declared by {} and none configured",
                    view_name(view)
                ),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Crash report, request log entry and observer signals.
    ///
    /// Returns the captured stack trace when a crash report was due.
    fn emit(
        &self,
        exception: &dyn ApiException,
        view: Option<&dyn View>,
        request: &RequestContext,
        status: HttpStatusCode,
        strategy: Option<Strategy>,
    ) -> Option<String> {
        let view = view_name(view);

        let trace = status.is_server_error().then(|| {
            let trace = Backtrace::force_capture().to_string();
            let report = CrashReport::new(request, view, exception, status, trace.clone());
            if let Err(e) = self.sink.emit_crash(&report) {
                warn!("Dropped crash report {}: {e}", report.report_id);
            }
            trace
        });

        let entry = RequestLogEntry::new(request, view, status, strategy);
        if let Err(e) = self.sink.emit_request(&entry) {
            warn!("Dropped request log entry for {} {}: {e}", entry.method, entry.path);
        }

        if !self.settings.signals.is_empty() {
            let signal = ResolutionSignal {
                exception_kind: exception.kind().name().to_string(),
                view: view.to_string(),
                status,
                strategy,
                fallback: strategy.is_none(),
            };
            for id in &self.settings.signals {
                match self.registry.observer(id) {
                    Some(observer) => observer.on_resolved(&signal),
                    None => warn!("No observer registered for signal '{id}'"),
                }
            }
        }

        trace
    }
}

/// The fixed body returned when resolution fails in production mode.
pub fn system_error_envelope() -> Envelope {
    Envelope::new(
        HttpStatusCode::INTERNAL_SERVER_ERROR,
        json!({
            "code": SYSTEM_ERROR_CODE,
            "details": SYSTEM_ERROR_DETAILS,
        }),
    )
}
