//! Wire envelope handed to the host framework.

use crate::error::model_error::ModelError;

use common::{ErrorLocation, HttpStatusCode};

use std::collections::BTreeMap;
use std::panic::Location;

use serde::Serialize;
use serde_json::Value;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Status, headers and JSON body of one response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub status: HttpStatusCode,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

impl Envelope {
    pub fn new(status: HttpStatusCode, body: Value) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body,
        }
    }

    /// Merge `headers` over the existing ones.
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn content_type(&self) -> &'static str {
        JSON_CONTENT_TYPE
    }

    /// Render the body as response bytes.
    #[track_caller]
    pub fn to_bytes(&self) -> Result<Vec<u8>, ModelError> {
        serde_json::to_vec(&self.body).map_err(|e| ModelError::Serialization {
            message: format!("Failed to render envelope body: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
