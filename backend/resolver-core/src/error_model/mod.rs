//! The error model every handled exception resolves into.

mod restful;

use crate::context::ResolutionContext;

use models::{FieldValue, Model, ModelError, ModelSchema};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A handler producing an error model instance for one resolution.
pub type HandlerFn =
    Arc<dyn Fn(&ResolutionContext<'_>) -> Result<Model, ModelError> + Send + Sync>;

/// Error model type: a schema plus predefined handlers keyed by handler
/// token (`not_found`, `http404`, ...).
#[derive(Clone)]
pub struct ErrorModel {
    schema: Arc<ModelSchema>,
    predefined: HashMap<String, HandlerFn>,
}

impl ErrorModel {
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        Self {
            schema,
            predefined: HashMap::new(),
        }
    }

    /// `RestfulError` with predefined handlers for every default kind.
    pub fn restful() -> Result<Self, ModelError> {
        restful::restful_error_model()
    }

    pub fn with_handler<F>(mut self, token: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&ResolutionContext<'_>) -> Result<Model, ModelError> + Send + Sync + 'static,
    {
        self.predefined.insert(token.into(), Arc::new(handler));
        self
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// Fresh instance with every field at its default.
    pub fn instance(&self) -> Model {
        Model::new(&self.schema)
    }

    pub fn construct<I, K, V>(&self, values: I) -> Result<Model, ModelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        Model::construct(&self.schema, values)
    }

    pub fn predefined_handler(&self, token: &str) -> Option<&HandlerFn> {
        self.predefined.get(token)
    }

    pub fn predefined_tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.predefined.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }
}

impl fmt::Debug for ErrorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorModel")
            .field("schema", &self.schema.name())
            .field("predefined", &self.predefined_tokens())
            .finish()
    }
}

/// Bind `{code, details}` to the first of `error` / `data` the model declares.
///
/// Nested-model fields are rebuilt from the object; anything else takes it
/// as a mapping. Returns whether a field was bound.
pub fn bind_error_details(
    model: &mut Model,
    code: &str,
    details: serde_json::Value,
) -> Result<bool, ModelError> {
    let mut object = serde_json::Map::new();
    object.insert(String::from("code"), serde_json::Value::from(code));
    object.insert(String::from("details"), details);

    for name in ["error", "data"] {
        let Some(field) = model.schema().field(name) else {
            continue;
        };
        let value = match field.nested_schema() {
            Some(nested) => FieldValue::Model(Model::from_json(nested, object)?),
            None => FieldValue::Mapping(object),
        };
        model.set(name, value)?;
        return Ok(true);
    }

    Ok(false)
}
