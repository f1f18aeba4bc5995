use crate::{Field, FieldValue, Model, ModelError, ModelSchema};

use common::HttpStatusCode;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde_json::{Value, json};

fn basic_response() -> Arc<ModelSchema> {
    let data = ModelSchema::builder("Data")
        .field(Field::string("name").with_default("default"))
        .field(Field::integer("age").with_default(0))
        .build()
        .unwrap();

    ModelSchema::builder("BasicResponse")
        .field(Field::integer("code"))
        .field(Field::boolean("success"))
        .field(Field::string("message"))
        .field(Field::nested("data", &data))
        .field(Field::list("links"))
        .build()
        .unwrap()
}

/// **VALUE**: End-to-end check of construction, nested mutation and serialization.
///
/// **WHY THIS MATTERS**: This is the canonical success envelope. If it does not serialize
/// to exactly this tree, every API response is wrong.
///
/// **BUG THIS CATCHES**: Would catch:
/// - Nested models being copied instead of owned (mutations lost)
/// - Key order or key set drifting from the declaration
/// - Explicit values being overwritten by defaults
#[test]
fn given_basic_response_when_nested_fields_mutated_then_to_dict_reflects_changes() {
    // GIVEN: A constructed BasicResponse
    let schema = basic_response();
    let mut response = Model::construct(
        &schema,
        [
            ("code", FieldValue::from(200)),
            ("success", FieldValue::from(true)),
            ("message", FieldValue::from("OK")),
            ("links", FieldValue::from(vec![json!("https://example.com")])),
        ],
    )
    .unwrap();

    // WHEN: Mutating the nested data model
    let data = response.nested_mut("data").unwrap();
    data.set("name", "John Doe").unwrap();
    data.set("age", 17).unwrap();

    // THEN: Nested and outer dictionaries reflect the mutation
    assert_eq!(
        Value::Object(response.nested("data").unwrap().to_dict()),
        json!({"name": "John Doe", "age": 17})
    );
    assert_eq!(
        Value::Object(response.to_dict()),
        json!({
            "code": 200,
            "success": true,
            "message": "OK",
            "data": {"name": "John Doe", "age": 17},
            "links": ["https://example.com"]
        })
    );
}

/// **VALUE**: Verifies `to_dict()` keys equal the declared field names, in order.
///
/// **WHY THIS MATTERS**: Clients rely on every declared key being present, even when the
/// value is null.
///
/// **BUG THIS CATCHES**: Would catch null fields being skipped, or undeclared keys leaking.
#[test]
fn given_empty_construction_when_serialized_then_emits_every_declared_key() {
    // GIVEN: A model constructed with no values
    let schema = basic_response();
    let model = Model::construct(&schema, Vec::<(&str, FieldValue)>::new()).unwrap();

    // WHEN: Serializing
    let dict = model.to_dict();

    // THEN: Keys equal the declared names, in declaration order
    let keys: Vec<&str> = dict.keys().map(String::as_str).collect();
    let declared: Vec<&str> = schema.field_names().collect();
    assert_eq!(keys, declared);
    assert_eq!(
        keys.iter().copied().collect::<BTreeSet<_>>(),
        declared.iter().copied().collect::<BTreeSet<_>>()
    );
    assert_eq!(dict["code"], Value::Null);
    assert_eq!(dict["data"], json!({"name": "default", "age": 0}));
    assert_eq!(dict["links"], json!([]));
}

/// **VALUE**: Verifies unknown names are rejected instead of silently dropped.
///
/// **BUG THIS CATCHES**: Would catch typos in handler code producing envelopes with
/// missing data and no error.
#[test]
fn given_undeclared_name_when_constructing_then_returns_unknown_field() {
    let schema = basic_response();

    let result = Model::construct(&schema, [("nope", FieldValue::from(1))]);

    match result {
        Err(ModelError::UnknownField { model, field, .. }) => {
            assert_eq!(model, "BasicResponse");
            assert_eq!(field, "nope");
        }
        other => panic!("Expected UnknownField, got {other:?}"),
    }
}

/// **VALUE**: Verifies `nested_mut` refuses scalar fields.
///
/// **BUG THIS CATCHES**: Would catch a panic or a wrong-variant borrow when a caller asks
/// for a nested model on a scalar field.
#[test]
fn given_scalar_field_when_nested_mut_requested_then_returns_not_nested() {
    let schema = basic_response();
    let mut model = Model::new(&schema);

    let result = model.nested_mut("code");

    assert!(matches!(result, Err(ModelError::NotNested { .. })));
}

/// **VALUE**: Verifies JSON construction builds nested models from objects.
///
/// **WHY THIS MATTERS**: Handlers commonly produce `{code, details}` objects for nested
/// error fields; these must become real nested models, not opaque mappings.
///
/// **BUG THIS CATCHES**: Would catch nested objects being stored as mappings and losing
/// the nested defaults.
#[test]
fn given_json_object_when_from_json_then_nested_model_is_built() {
    let schema = basic_response();
    let object = json!({"code": 404, "data": {"name": "missing"}});

    let model = Model::from_json(&schema, object.as_object().unwrap().clone()).unwrap();

    let data = model.nested("data").unwrap();
    assert_eq!(data.get("name"), Some(&FieldValue::from("missing")));
    assert_eq!(data.get("age"), Some(&FieldValue::from(0)));
    assert_eq!(model.get("code"), Some(&FieldValue::from(404)));
}

/// **VALUE**: Verifies text serialization and the response adapter.
///
/// **BUG THIS CATCHES**: Would catch `to_json` diverging from `to_dict`, or `respond`
/// dropping headers or status.
#[test]
fn given_model_when_rendered_then_json_and_envelope_match_dict() {
    let schema = basic_response();
    let model = Model::construct(&schema, [("code", 201)]).unwrap();

    let text = model.to_json().unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, Value::Object(model.to_dict()));

    let mut headers = BTreeMap::new();
    headers.insert(String::from("Location"), String::from("/items/1"));
    let envelope = model.respond(HttpStatusCode(201), headers);

    assert_eq!(envelope.status, HttpStatusCode(201));
    assert_eq!(envelope.headers["Location"], "/items/1");
    assert_eq!(envelope.body, parsed);
    assert_eq!(serde_json::from_slice::<Value>(&envelope.to_bytes().unwrap()).unwrap(), parsed);
}

/// **VALUE**: Verifies instance identity checks against schemas.
///
/// **WHY THIS MATTERS**: The resolver enforces handler contracts with this check.
///
/// **BUG THIS CATCHES**: Would catch instances of a different model passing as the
/// configured error model.
#[test]
fn given_two_schemas_when_checking_instance_then_only_own_schema_matches() {
    let schema = basic_response();
    let other = ModelSchema::builder("Other")
        .field(Field::string("code"))
        .build()
        .unwrap();
    let model = Model::new(&schema);

    assert!(model.is_instance_of(&schema));
    assert!(model.is_instance_of(&basic_response()));
    assert!(!model.is_instance_of(&other));
}
