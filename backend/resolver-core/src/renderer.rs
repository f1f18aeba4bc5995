//! Success-side rendering.
//!
//! Error responses are left alone here; they've already been shaped by
//! [`Resolver::handle_exception`](crate::resolution::Resolver::handle_exception).

use crate::config::ResolverSettings;
use crate::context::{RequestContext, ResponseState, View, view_name};
use crate::error::resolution::ResolutionError;

use common::{ErrorLocation, HttpStatusCode};
use models::{Envelope, Model, ModelSchema};

use std::collections::BTreeMap;
use std::panic::Location;
use std::sync::Arc;

use log::debug;
use serde_json::Value;

const DATA_FIELD: &str = "data";

#[derive(Debug, Clone, Default)]
pub struct SuccessRenderer {
    success_model: Option<Arc<ModelSchema>>,
}

impl SuccessRenderer {
    pub fn new(settings: &ResolverSettings) -> Self {
        Self {
            success_model: settings.success_model.clone(),
        }
    }

    /// Body for a response the view produced.
    ///
    /// Error statuses pass `data` through untouched. Otherwise the view's
    /// `on_success` model is rendered when it returns one.
    pub fn render_success(
        &self,
        view: Option<&dyn View>,
        request: &RequestContext,
        response: &ResponseState,
        data: Value,
    ) -> Value {
        if response.status.is_error() {
            return data;
        }

        match view.and_then(|view| view.on_success(request, &data)) {
            Some(model) => {
                debug!("{} rendered {}", view_name(view), model.name());
                Value::Object(model.to_dict())
            }
            None => data,
        }
    }

    /// The success model for `view`: its own, else the configured one.
    #[track_caller]
    pub fn success_model_for(
        &self,
        view: Option<&dyn View>,
    ) -> Result<Arc<ModelSchema>, ResolutionError> {
        view.and_then(|view| view.success_model())
            .or_else(|| self.success_model.clone())
            .ok_or_else(|| ResolutionError::ConfigurationError {
                message: format!(
                    "No success model declared by {} and none configured",
                    view_name(view)
                ),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Success envelope carrying `data`.
    ///
    /// Uses the view's `on_success` model when it returns one, otherwise a
    /// default instance of the success model with `data` bound to its
    /// `data` field.
    #[track_caller]
    pub fn success_envelope(
        &self,
        view: Option<&dyn View>,
        request: &RequestContext,
        status: HttpStatusCode,
        data: Value,
    ) -> Result<Envelope, ResolutionError> {
        if let Some(model) = view.and_then(|view| view.on_success(request, &data)) {
            return Ok(model.respond(status, BTreeMap::new()));
        }

        let schema = self.success_model_for(view)?;
        let mut model = Model::new(&schema);
        if !model.set_if_declared(DATA_FIELD, data) {
            debug!("{} declares no '{DATA_FIELD}' field, payload dropped", schema.name());
        }

        Ok(model.respond(status, BTreeMap::new()))
    }
}
