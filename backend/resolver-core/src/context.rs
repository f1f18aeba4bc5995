//! Request, response and view contracts plus the per-resolution context.

use crate::error::resolution::ResolutionError;
use crate::error_model::ErrorModel;
use crate::exception::{ApiException, ErrorDetails};

use common::{ErrorLocation, HttpStatusCode};
use models::{Model, ModelSchema};

use std::collections::BTreeMap;
use std::panic::Location;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use url::Url;

const NO_VIEW_NAME: &str = "<no view>";

/// The inbound request as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestContext {
    pub method: String,
    pub url: Url,
    pub body: Option<Value>,
    pub metadata: BTreeMap<String, String>,
    pub principal: Option<String>,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, url: Url) -> Self {
        Self {
            method: method.into(),
            url,
            body: None,
            metadata: BTreeMap::new(),
            principal: None,
        }
    }

    /// Parse an absolute URL into a request context.
    #[track_caller]
    pub fn parse(method: impl Into<String>, url: &str) -> Result<Self, ResolutionError> {
        let url = Url::parse(url).map_err(|e| ResolutionError::ConfigurationError {
            message: format!("Invalid request URL '{url}': {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;
        Ok(Self::new(method, url))
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_principal(mut self, principal: impl Into<String>) -> Self {
        self.principal = Some(principal.into());
        self
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn absolute_url(&self) -> &str {
        self.url.as_str()
    }
}

/// The in-flight response: mutable status and headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseState {
    pub status: HttpStatusCode,
    pub headers: BTreeMap<String, String>,
}

impl ResponseState {
    pub fn new(status: HttpStatusCode) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
        }
    }

    /// Response as the framework's default exception translation leaves it.
    pub fn for_exception(exception: &dyn ApiException) -> Self {
        Self {
            status: exception.kind().default_status(),
            headers: exception.headers(),
        }
    }
}

/// The acting view. Every capability is optional.
pub trait View: Send + Sync {
    fn name(&self) -> &str;

    /// Returning `None` continues resolution with the next strategy.
    fn on_error(&self, _context: &ResolutionContext<'_>) -> Option<Model> {
        None
    }

    /// Error model overriding the configured one for this view.
    fn error_model(&self) -> Option<&ErrorModel> {
        None
    }

    fn success_model(&self) -> Option<Arc<ModelSchema>> {
        None
    }

    fn on_success(&self, _request: &RequestContext, _data: &Value) -> Option<Model> {
        None
    }
}

/// Everything one resolution call can see. Dropped once it finishes.
pub struct ResolutionContext<'a> {
    pub exception: &'a dyn ApiException,
    pub view: Option<&'a dyn View>,
    pub request: &'a RequestContext,
    pub response: &'a ResponseState,
    pub error_model: &'a ErrorModel,
}

impl ResolutionContext<'_> {
    pub fn view_name(&self) -> &str {
        view_name(self.view)
    }

    pub fn details(&self) -> ErrorDetails {
        self.exception.full_details()
    }
}

pub(crate) fn view_name(view: Option<&dyn View>) -> &str {
    view.map_or(NO_VIEW_NAME, |view| view.name())
}
