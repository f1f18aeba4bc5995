use crate::context::ResolutionContext;
use crate::error_model::{ErrorModel, bind_error_details};

use common::ErrorLocation;
use models::{Model, ModelError, standard};

use std::panic::Location;

/// Handler token → error code emitted by the standard error model.
const RESTFUL_CODES: [(&str, &str); 11] = [
    ("parse_error", "parsing_error"),
    ("not_authenticated", "not_authenticated"),
    ("authentication_failed", "authenticated_error"),
    ("invalid_token", "invalid_token"),
    ("validation_error", "validation_error"),
    ("not_found", "not_found"),
    ("throttled", "throttled"),
    ("method_not_allowed", "method_not_allowed"),
    ("permission_denied", "permission_denied"),
    ("service_unavailable", "service_unavailable"),
    ("http404", "not_found"),
];

pub(super) fn restful_error_model() -> Result<ErrorModel, ModelError> {
    let mut error_model = ErrorModel::new(standard::restful_error()?);

    for (token, code) in RESTFUL_CODES {
        error_model = error_model.with_handler(token, move |context| restful_handler(context, code));
    }

    Ok(error_model)
}

#[track_caller]
fn restful_handler(context: &ResolutionContext<'_>, code: &str) -> Result<Model, ModelError> {
    let details = context.details();
    let mut model = context.error_model.instance();

    model.set("message", details.message.clone())?;
    let details = serde_json::to_value(&details).map_err(|e| ModelError::Serialization {
        message: format!("Failed to serialize exception details: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;
    bind_error_details(&mut model, code, details)?;

    Ok(model)
}
