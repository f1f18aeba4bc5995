use resolver_core::{
    ErrorModel, ExceptionKind, HandlerRegistry, LogSink, RequestContext, ResolverConfig,
    ResolverSettings, Resolver, ResponseState, StandardException, SuccessRenderer, View,
};

use common::HttpStatusCode;
use models::{Model, SchemaRegistry, standard};

use serde_json::{Value, json};
use tempfile::TempDir;

struct OrdersView;

impl View for OrdersView {
    fn name(&self) -> &str {
        "orders"
    }

    fn on_success(&self, request: &RequestContext, data: &Value) -> Option<Model> {
        let schema = standard::restful_response().ok()?;
        let mut model = Model::new(&schema);
        model.set("data", data.as_object().cloned()?).ok()?;
        model.set("this", request.path()).ok()?;
        Some(model)
    }
}

/// Wire a resolver the way a host does at start-up: config file, schema registry,
/// error models, frozen handler registry.
fn start_up(config_text: &str) -> (Resolver, SuccessRenderer) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("envelope.toml"), config_text).unwrap();

    let config = ResolverConfig::load(dir.path()).unwrap();
    let schemas = SchemaRegistry::with_standard().unwrap();
    let error_models = [ErrorModel::restful().unwrap()];
    let registry = HandlerRegistry::builder()
        .register_exception("PaymentDeclined")
        .build();

    let settings = ResolverSettings::from_config(&config, &schemas, &error_models, &registry).unwrap();
    let renderer = SuccessRenderer::new(&settings);
    let resolver = Resolver::with_log_sink(registry, settings);
    (resolver, renderer)
}

/// **VALUE**: A configured resolver answers every kind of failure with a JSON envelope.
///
/// **WHY THIS MATTERS**: This is the contract the host relies on: whatever is thrown,
/// the client gets the configured error shape or the fixed system error.
///
/// **BUG THIS CATCHES**: Would catch wiring regressions between config loading,
/// settings resolution and the boundary.
#[test]
fn given_configured_resolver_when_handling_mixed_failures_then_every_response_is_json() {
    // GIVEN
    let (resolver, _) = start_up(
        r#"
error_json_model = "RestfulError"
success_json_model = "RestfulResponse"
"#,
    );
    let request = RequestContext::parse("GET", "https://api.example.com/v1/orders/7").unwrap();
    let view = OrdersView;

    // WHEN
    let not_found = resolver
        .handle_exception(
            &StandardException::new(ExceptionKind::NotFound, "Order 7 not found."),
            Some(&view),
            &request,
        )
        .unwrap();
    let declined = resolver
        .handle_exception(
            &StandardException::new("PaymentDeclined", "Card expired.").with_outcome("Payment failed"),
            Some(&view),
            &request,
        )
        .unwrap();
    let unknown = resolver
        .handle_exception(&StandardException::new(ExceptionKind::Unknown, "boom"), None, &request)
        .unwrap();

    // THEN
    assert_eq!(not_found.status, HttpStatusCode::NOT_FOUND);
    assert_eq!(not_found.body["error"]["code"], json!("not_found"));

    assert_eq!(declined.status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(declined.body["message"], json!("Payment failed"));
    assert_eq!(declined.body["error"]["code"], json!("payment_declined"));

    assert_eq!(unknown.status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(unknown.body["code"], json!("system_error"));

    for envelope in [not_found, declined, unknown] {
        let bytes = envelope.to_bytes().unwrap();
        assert!(serde_json::from_slice::<Value>(&bytes).unwrap().is_object());
        assert_eq!(envelope.content_type(), "application/json");
    }
}

#[test]
fn given_configured_resolver_when_rendering_success_then_view_model_used() {
    let (_, renderer) = start_up(r#"success_json_model = "RestfulResponse""#);
    let request = RequestContext::parse("GET", "https://api.example.com/v1/orders/7").unwrap();

    let body = renderer.render_success(
        Some(&OrdersView),
        &request,
        &ResponseState::new(HttpStatusCode::OK),
        json!({"id": 7}),
    );

    assert_eq!(body["data"], json!({"id": 7}));
    assert_eq!(body["this"], json!("/v1/orders/7"));
}

#[test]
fn given_debug_config_when_unresolvable_then_error_surfaced() {
    let (resolver, _) = start_up(
        r#"
error_json_model = "RestfulError"
debug = true
"#,
    );
    let request = RequestContext::parse("GET", "https://api.example.com/v1/orders/7").unwrap();

    let result = resolver.handle_exception(
        &StandardException::new("LedgerLocked", "locked"),
        None,
        &request,
    );

    assert!(result.is_err());
    assert!(resolver.is_debug());
}

#[test]
fn given_default_log_sink_when_created_then_uses_envelope_targets() {
    let sink = LogSink::default();

    assert_eq!(sink.request_target(), resolver_core::REQUEST_LOG_TARGET);
    assert_eq!(sink.crash_target(), "envelope::crash");
}
