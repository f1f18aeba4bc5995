use crate::error_model::{ErrorModel, bind_error_details};
use crate::exception::{ExceptionKind, StandardException};
use crate::tests::support::{restful, with_context};

use models::{Field, Model, ModelSchema};

use serde_json::json;

/// **VALUE**: Verifies every default kind and `http404` has a predefined restful handler.
///
/// **WHY THIS MATTERS**: Default-kind resolution depends on these handlers existing. A
/// missing one sends that kind to the attribute scrape or the 500 fallback.
#[test]
fn given_restful_model_when_listing_tokens_then_every_default_kind_is_covered() {
    // GIVEN/WHEN
    let model = restful();

    // THEN
    assert_eq!(
        model.predefined_tokens(),
        vec![
            "authentication_failed",
            "http404",
            "invalid_token",
            "method_not_allowed",
            "not_authenticated",
            "not_found",
            "parse_error",
            "permission_denied",
            "service_unavailable",
            "throttled",
            "validation_error",
        ]
    );
}

/// **VALUE**: Verifies the restful handler output shape and the legacy error codes.
///
/// **WHY THIS MATTERS**: Clients match on `error.code`. `authenticated_error` and
/// `parsing_error` differ from the kind tokens and must stay that way.
///
/// **BUG THIS CATCHES**: Would catch the handler using the token instead of the code table,
/// or the message not being copied from the exception.
#[test]
fn given_authentication_failure_when_predefined_handler_runs_then_restful_body() {
    // GIVEN: The restful model and an authentication failure
    let error_model = restful();
    let exception = StandardException::new(ExceptionKind::AuthenticationFailed, "Bad credentials.");

    // WHEN: Running its predefined handler
    let model = with_context(&exception, None, &error_model, |context| {
        let handler = error_model.predefined_handler("authentication_failed").unwrap();
        handler(context).unwrap()
    });

    // THEN: Message and nested error are populated
    assert_eq!(
        serde_json::Value::Object(model.to_dict()),
        json!({
            "status": false,
            "message": "Bad credentials.",
            "error": {
                "code": "authenticated_error",
                "details": {"code": "authentication_failed", "message": "Bad credentials."}
            },
            "this": null
        })
    );
}

#[test]
fn given_http404_when_predefined_handler_runs_then_code_is_not_found() {
    let error_model = restful();
    let exception = StandardException::new(ExceptionKind::Http404, "No route.");

    let model = with_context(&exception, None, &error_model, |context| {
        error_model.predefined_handler("http404").unwrap()(context).unwrap()
    });

    let error = model.nested("error").unwrap();
    assert_eq!(error.get("code").and_then(|v| v.as_str()), Some("not_found"));
}

/// **VALUE**: Verifies details bind to `data` when the model has no `error` field.
///
/// **BUG THIS CATCHES**: Would catch details being dropped for flat error models.
#[test]
fn given_model_with_data_field_when_bind_error_details_then_data_is_mapping() {
    // GIVEN: A flat model with a data mapping
    let schema = ModelSchema::builder("FlatError")
        .field(Field::string("message"))
        .field(Field::mapping("data"))
        .build()
        .unwrap();
    let mut model = Model::new(&schema);

    // WHEN
    let bound = bind_error_details(&mut model, "throttled", json!("Slow down.")).unwrap();

    // THEN
    assert!(bound);
    assert_eq!(
        model.to_dict()["data"],
        json!({"code": "throttled", "details": "Slow down."})
    );
}

#[test]
fn given_model_without_error_or_data_when_bind_error_details_then_nothing_bound() {
    let schema = ModelSchema::builder("Bare")
        .field(Field::string("message"))
        .build()
        .unwrap();
    let mut model = Model::new(&schema);

    assert!(!bind_error_details(&mut model, "x", json!(null)).unwrap());
}

#[test]
fn given_custom_handler_when_with_handler_then_lookup_by_token() {
    let schema = ModelSchema::builder("Plain")
        .field(Field::string("message"))
        .build()
        .unwrap();
    let error_model = ErrorModel::new(schema).with_handler("payment_declined", |context| {
        context.error_model.construct([("message", "declined")])
    });

    assert!(error_model.predefined_handler("payment_declined").is_some());
    assert!(error_model.predefined_handler("not_found").is_none());
    assert_eq!(error_model.name(), "Plain");
}
