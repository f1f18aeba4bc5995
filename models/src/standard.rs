//! Ready-made success and error shapes.

use crate::error::model_error::ModelError;
use crate::{Field, ModelSchema};

use std::sync::Arc;

pub const RESTFUL_RESPONSE: &str = "RestfulResponse";
pub const RESTFUL_ERROR: &str = "RestfulError";
pub const RESTFUL_ERROR_DETAIL: &str = "RestfulErrorDetail";

/// `{status, message, data, this, links}` success envelope.
pub fn restful_response() -> Result<Arc<ModelSchema>, ModelError> {
    ModelSchema::builder(RESTFUL_RESPONSE)
        .field(Field::boolean("status").with_default(true))
        .field(Field::string("message").with_default(""))
        .field(Field::mapping("data"))
        .field(Field::string("this"))
        .field(Field::list("links"))
        .build()
}

/// `{code, details}` body nested under `error` in [`restful_error`].
pub fn restful_error_detail() -> Result<Arc<ModelSchema>, ModelError> {
    ModelSchema::builder(RESTFUL_ERROR_DETAIL)
        .field(Field::string("code"))
        .field(Field::data("details"))
        .build()
}

/// `{status, message, error: {code, details}, this}` error envelope.
pub fn restful_error() -> Result<Arc<ModelSchema>, ModelError> {
    let detail = restful_error_detail()?;
    ModelSchema::builder(RESTFUL_ERROR)
        .field(Field::boolean("status").with_default(false))
        .field(Field::string("message").with_default("Error"))
        .field(Field::nested("error", &detail))
        .field(Field::string("this"))
        .build()
}
