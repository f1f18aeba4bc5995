use envelope_demo::app::EnvelopeApp;
use envelope_demo::handlers::AUDIT_SIGNAL;
use envelope_demo::scenarios::{self, Outcome};

use common::HttpStatusCode;
use resolver_core::ResolverConfig;

use serde_json::{Value, json};

// ============================================================================
// Integration tests for the demo composition root
// These drive the full stack: config -> registries -> resolver -> envelopes
// ============================================================================

fn outcome<'a>(outcomes: &'a [Outcome], label: &str) -> &'a Outcome {
    outcomes
        .iter()
        .find(|outcome| outcome.label == label)
        .unwrap_or_else(|| panic!("no outcome labelled {label}"))
}

fn body<'a>(outcomes: &'a [Outcome], label: &str) -> &'a Value {
    &outcome(outcomes, label).envelope.body
}

/// **VALUE**: Every sample produces the envelope its strategy should produce.
///
/// **WHY THIS MATTERS**: This is the closest we get to a host framework: real views,
/// real host errors, the restful models and a frozen registry.
///
/// **BUG THIS CATCHES**: Would catch regressions in any strategy, in the restful codes,
/// or in the production fallback.
#[test]
fn given_default_config_when_running_samples_then_each_strategy_shapes_its_envelope() {
    // GIVEN: A demo app with default config
    let app = EnvelopeApp::from_config(ResolverConfig::default()).unwrap();

    // WHEN: Running every sample
    let outcomes = scenarios::run(&app).unwrap();

    // THEN: Registered handler
    assert_eq!(outcome(&outcomes, "expired token").envelope.status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body(&outcomes, "expired token")["message"], json!("bad token"));
    assert_eq!(body(&outcomes, "expired token")["this"], json!("/v1/orders"));

    // AND: Default handler and special kind
    assert_eq!(body(&outcomes, "missing order")["error"]["code"], json!("not_found"));
    assert_eq!(outcome(&outcomes, "unknown route").envelope.status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body(&outcomes, "unknown route")["error"]["code"], json!("not_found"));

    // AND: Generic registered exception
    assert_eq!(body(&outcomes, "declined payment")["message"], json!("Payment failed"));
    assert_eq!(
        body(&outcomes, "declined payment")["error"]["code"],
        json!("payment_declined")
    );

    // AND: Attribute scrape
    assert_eq!(
        body(&outcomes, "out of stock"),
        &json!({
            "status": false,
            "message": "BOOK-1 is out of stock (0 left)",
            "error": {"code": "out_of_stock", "details": {"sku": "BOOK-1", "available": 0}},
            "this": "/v1/stock/reserve"
        })
    );

    // AND: View on_error
    assert_eq!(
        body(&outcomes, "warehouse offline")["message"],
        json!("Stock levels are temporarily unavailable")
    );

    // AND: Production fallback
    assert_eq!(
        outcome(&outcomes, "unhandled failure").envelope.status,
        HttpStatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(body(&outcomes, "unhandled failure")["code"], json!("system_error"));

    // AND: Success rendering through the view
    assert_eq!(
        body(&outcomes, "order listing")["data"],
        json!({"orders": [{"id": 7, "total": 1999}]})
    );
}

#[test]
fn given_debug_config_when_running_samples_then_unresolvable_sample_is_skipped() {
    let config = ResolverConfig {
        debug: true,
        ..ResolverConfig::default()
    };
    let app = EnvelopeApp::from_config(config).unwrap();

    let outcomes = scenarios::run(&app).unwrap();

    assert!(outcomes.iter().all(|outcome| outcome.label != "unhandled failure"));
    assert_eq!(outcomes.len(), 7);
}

#[test]
fn given_audit_signal_when_starting_then_observer_is_resolved() {
    let config = ResolverConfig {
        error_handler_signals: vec![AUDIT_SIGNAL.to_string()],
        ..ResolverConfig::default()
    };

    let app = EnvelopeApp::from_config(config).unwrap();

    assert_eq!(app.resolver().settings().signals, vec![AUDIT_SIGNAL.to_string()]);
}

/// **VALUE**: Unknown names in the config stop start-up.
#[test]
fn given_unknown_signal_when_starting_then_error() {
    let config = ResolverConfig {
        error_handler_signals: vec!["metrics".to_string()],
        ..ResolverConfig::default()
    };

    let result = EnvelopeApp::from_config(config);

    assert!(result.is_err());
}

#[test]
fn given_config_dir_without_file_when_start_then_defaults_used() {
    let dir = tempfile::tempdir().unwrap();

    let app = EnvelopeApp::start(dir.path()).unwrap();

    assert_eq!(app.config().error_json_model.as_deref(), Some("RestfulError"));
}

/// **VALUE**: The crash target read before logger start-up is the one the resolver
/// reports to.
///
/// **WHY THIS MATTERS**: `main` routes `crash.log` by the configured crash target. If
/// the resolver emitted on another target, crash reports would land in `envelope.log`.
///
/// **BUG THIS CATCHES**: Would catch the loaded logger targets being dropped between
/// config and resolver.
#[test]
fn given_custom_logger_targets_when_loading_then_resolver_reports_on_them() {
    // GIVEN
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("envelope.toml"),
        r#"
error_handler_logger = "shop::requests"
error_handler_crash_logger = "shop::crash"
"#,
    )
    .unwrap();

    // WHEN
    let config = EnvelopeApp::load_config(dir.path()).unwrap();
    let crash_target = config.error_handler_crash_logger.clone();
    let app = EnvelopeApp::from_config(config).unwrap();

    // THEN
    assert_eq!(crash_target, "shop::crash");
    assert_eq!(app.resolver().settings().crash_target, crash_target);
    assert_eq!(app.resolver().settings().request_target, "shop::requests");
}
