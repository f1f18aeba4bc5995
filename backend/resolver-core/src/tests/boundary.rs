use crate::config::ResolverSettings;
use crate::error::resolution::ResolutionError;
use crate::error_model::ErrorModel;
use crate::exception::{ExceptionKind, StandardException};
use crate::registry::HandlerRegistry;
use crate::resolution::{Resolver, Strategy, system_error_envelope};
use crate::tests::support::{RecordingObserver, RecordingSink, TestView, request};

use common::HttpStatusCode;
use models::{Field, FieldValue, ModelSchema};

use std::sync::Arc;

use serde_json::json;

fn setup(registry: Arc<HandlerRegistry>, settings: ResolverSettings) -> (Resolver, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let resolver = Resolver::new(registry, settings, sink.clone());
    (resolver, sink)
}

fn production() -> ResolverSettings {
    ResolverSettings::new(ErrorModel::restful().unwrap())
}

/// **VALUE**: Scenario B: a registered InvalidToken handler shapes the response and no
/// crash report is written for a 401.
///
/// **WHY THIS MATTERS**: Crash reports are for server failures. Reporting every
/// expired token would drown the real crashes.
///
/// **BUG THIS CATCHES**: Would catch crash reports firing regardless of status, or the
/// request log line being skipped on success.
#[test]
fn given_registered_invalid_token_handler_when_handled_then_body_and_no_crash_report() {
    // GIVEN
    let registry = HandlerRegistry::builder()
        .register_handler(ExceptionKind::InvalidToken, |context| {
            context.error_model.construct([
                ("status", FieldValue::from(false)),
                ("message", FieldValue::from("bad token")),
            ])
        })
        .build();
    let (resolver, sink) = setup(registry, production());
    let exception = StandardException::new(ExceptionKind::InvalidToken, "Token expired.");
    let view = TestView::new("orders");

    // WHEN
    let envelope = resolver
        .handle_exception(&exception, Some(&view), &request())
        .unwrap();

    // THEN
    assert_eq!(envelope.status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(envelope.body["message"], json!("bad token"));
    assert_eq!(envelope.body["status"], json!(false));
    assert_eq!(sink.crash_count(), 0);

    let requests = sink.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].view, "orders");
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/v1/orders");
    assert_eq!(requests[0].strategy, Some(Strategy::RegisteredHandler));
}

/// **VALUE**: A 5xx resolution writes exactly one crash report with the request details.
///
/// **BUG THIS CATCHES**: Would catch duplicate crash reports (one per strategy tried) or
/// reports missing the URL, body or view needed to reproduce the failure.
#[test]
fn given_service_unavailable_when_handled_then_one_crash_report_with_request_details() {
    // GIVEN
    let (resolver, sink) = setup(HandlerRegistry::standard(), production());
    let exception = StandardException::new(ExceptionKind::ServiceUnavailable, "Down for maintenance.");
    let view = TestView::new("orders");

    // WHEN
    let envelope = resolver
        .handle_exception(&exception, Some(&view), &request())
        .unwrap();

    // THEN
    assert_eq!(envelope.status, HttpStatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(envelope.body["error"]["code"], json!("service_unavailable"));

    let crashes = sink.crashes.lock().unwrap();
    assert_eq!(crashes.len(), 1);
    let report = &crashes[0];
    assert_eq!(report.method, "POST");
    assert_eq!(report.absolute_url, "https://api.example.com/v1/orders?page=2");
    assert_eq!(report.body, Some(json!({"item": "book"})));
    assert_eq!(report.metadata.get("REMOTE_ADDR").map(String::as_str), Some("10.0.0.7"));
    assert_eq!(report.view, "orders");
    assert_eq!(report.exception_kind, "ServiceUnavailable");
    assert_eq!(report.status, HttpStatusCode::SERVICE_UNAVAILABLE);
    assert!(!report.stack_trace.is_empty());
    assert_eq!(sink.request_count(), 1);
}

/// **VALUE**: P6: an unresolvable exception becomes the fixed 500 body in production.
///
/// **WHY THIS MATTERS**: The transport must always get a well-formed envelope. Leaking
/// the exception would expose internals and break clients expecting JSON.
///
/// **BUG THIS CATCHES**: Would catch `ResolutionExhausted` escaping the boundary in
/// production, or the fallback body drifting from `system_error`.
#[test]
fn given_unresolvable_exception_in_production_when_handled_then_system_error_envelope() {
    // GIVEN
    let (resolver, sink) = setup(HandlerRegistry::standard(), production());
    let exception = StandardException::new("PaymentDeclined", "Card expired.");

    // WHEN
    let envelope = resolver.handle_exception(&exception, None, &request()).unwrap();

    // THEN
    assert_eq!(envelope.status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        envelope.body,
        json!({
            "code": "system_error",
            "details": "An unexpected error occurred during handling an error."
        })
    );
    assert_eq!(envelope, system_error_envelope());
    assert_eq!(sink.crash_count(), 1);
    let requests = sink.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].strategy, None);
    assert_eq!(requests[0].view, "<no view>");
}

/// **VALUE**: Debug mode surfaces the failure with the exception text and a trace.
///
/// **BUG THIS CATCHES**: Would catch debug mode silently returning the 500 body, or the
/// side effects being skipped when the error is surfaced.
#[test]
fn given_unresolvable_exception_in_debug_when_handled_then_surfaced_error() {
    // GIVEN
    let (resolver, sink) = setup(HandlerRegistry::standard(), production().with_debug(true));
    let exception = StandardException::new("PaymentDeclined", "Card expired.");

    // WHEN
    let result = resolver.handle_exception(&exception, None, &request());

    // THEN
    match result {
        Err(ResolutionError::Surfaced { kind, exception, trace, source, .. }) => {
            assert_eq!(kind, "PaymentDeclined");
            assert_eq!(exception, "PaymentDeclined: Card expired.");
            assert!(!trace.is_empty());
            assert!(matches!(*source, ResolutionError::ResolutionExhausted { .. }));
        }
        other => panic!("expected surfaced error, got {other:?}"),
    }
    assert_eq!(sink.crash_count(), 1);
    assert_eq!(sink.request_count(), 1);
}

/// **VALUE**: Missing error model configuration is fail-safe in production and loud in debug.
#[test]
fn given_no_error_model_configured_when_handled_then_configuration_error_handled_by_mode() {
    // GIVEN
    let exception = StandardException::new(ExceptionKind::NotFound, "Missing.");
    let (production, _) = setup(HandlerRegistry::standard(), ResolverSettings::default());
    let (debug, _) = setup(
        HandlerRegistry::standard(),
        ResolverSettings::default().with_debug(true),
    );

    // WHEN
    let fallback = production.handle_exception(&exception, None, &request()).unwrap();
    let surfaced = debug.handle_exception(&exception, None, &request());

    // THEN
    assert_eq!(fallback, system_error_envelope());
    match surfaced {
        Err(ResolutionError::Surfaced { source, .. }) => {
            assert!(matches!(*source, ResolutionError::ConfigurationError { .. }));
        }
        other => panic!("expected surfaced configuration error, got {other:?}"),
    }
}

/// **VALUE**: A view declaring its own error model overrides the configured one.
#[test]
fn given_view_with_error_model_when_handled_then_view_model_shapes_body() {
    // GIVEN: A view whose error model has a flat shape and its own not_found handler
    let schema = ModelSchema::builder("Problem")
        .field(Field::string("title"))
        .field(Field::integer("status"))
        .build()
        .unwrap();
    let problem = ErrorModel::new(schema).with_handler("not_found", |context| {
        context.error_model.construct([
            ("title", FieldValue::from(context.details().message)),
            ("status", FieldValue::from(context.response.status.0)),
        ])
    });
    let mut view = TestView::new("orders");
    view.error_model = Some(problem);
    let (resolver, _) = setup(HandlerRegistry::standard(), production());
    let exception = StandardException::new(ExceptionKind::NotFound, "Order 7 not found.");

    // WHEN
    let envelope = resolver
        .handle_exception(&exception, Some(&view), &request())
        .unwrap();

    // THEN
    assert_eq!(envelope.body, json!({"title": "Order 7 not found.", "status": 404}));
}

#[test]
fn given_exception_headers_when_handled_then_merged_into_envelope() {
    let (resolver, _) = setup(HandlerRegistry::standard(), production());
    let exception = StandardException::new(ExceptionKind::NotAuthenticated, "Login required.")
        .with_header("WWW-Authenticate", "Bearer realm=\"api\"");

    let envelope = resolver.handle_exception(&exception, None, &request()).unwrap();

    assert_eq!(envelope.status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(
        envelope.headers.get("WWW-Authenticate").map(String::as_str),
        Some("Bearer realm=\"api\"")
    );
}

/// **VALUE**: Failing sinks never abort resolution.
///
/// **WHY THIS MATTERS**: A full disk or broken log pipe must not turn every error
/// response into a crash.
///
/// **BUG THIS CATCHES**: Would catch sink errors being propagated with `?`.
#[test]
fn given_failing_sink_when_handled_then_envelope_still_returned() {
    // GIVEN
    let sink = Arc::new(RecordingSink::failing());
    let resolver = Resolver::new(HandlerRegistry::standard(), production(), sink.clone());
    let exception = StandardException::new(ExceptionKind::ServiceUnavailable, "Down.");

    // WHEN
    let envelope = resolver.handle_exception(&exception, None, &request()).unwrap();

    // THEN: Both sinks were attempted once and the response is intact
    assert_eq!(envelope.status, HttpStatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(sink.crash_count(), 1);
    assert_eq!(sink.request_count(), 1);
}

/// **VALUE**: Observers enabled in settings get one signal per handled exception.
#[test]
fn given_enabled_observer_when_handled_then_signalled_once() {
    // GIVEN
    let observer = Arc::new(RecordingObserver::default());
    let silent = Arc::new(RecordingObserver::default());
    let registry = HandlerRegistry::builder()
        .observer("audit", observer.clone())
        .observer("metrics", silent.clone())
        .build();
    let (resolver, _) = setup(registry, production().with_signal("audit"));
    let exception = StandardException::new("PaymentDeclined", "Card expired.");

    // WHEN
    resolver.handle_exception(&exception, None, &request()).unwrap();

    // THEN
    let signals = observer.signals.lock().unwrap();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].exception_kind, "PaymentDeclined");
    assert_eq!(signals[0].status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert!(signals[0].fallback);
    assert!(silent.signals.lock().unwrap().is_empty());
}
