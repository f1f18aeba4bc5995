//! Inbound exception contract.
//!
//! The host framework's errors implement [`ApiException`]. The resolver
//! only ever sees them through this trait: a kind, a code/message pair,
//! optional response headers, and by-name attribute lookup for the
//! generic scrape strategy.

pub mod kind;
pub mod standard;

pub use kind::{DEFAULT_KINDS, ExceptionKind, SPECIAL_KINDS};
pub use standard::StandardException;

use crate::context::ResolutionContext;

use models::FieldValue;

use std::collections::BTreeMap;
use std::error::Error as StdError;

use serde::Serialize;

/// The code/message pair an exception reports about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl ErrorDetails {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Computes a field value from the resolution context and exception details.
pub type AttributeGetter<'a> =
    Box<dyn Fn(&ResolutionContext<'_>, &ErrorDetails) -> FieldValue + 'a>;

/// A named attribute exposed by an exception.
pub enum ExceptionAttribute<'a> {
    /// Bound to the model field verbatim.
    Value(FieldValue),
    /// Called, and its result bound to the model field.
    Getter(AttributeGetter<'a>),
}

pub trait ApiException: StdError + Send + Sync {
    fn kind(&self) -> ExceptionKind;

    fn full_details(&self) -> ErrorDetails {
        ErrorDetails::new(self.kind().handler_token(), self.to_string())
    }

    /// Attribute named like an error model field, if the exception has one.
    fn attribute(&self, _name: &str) -> Option<ExceptionAttribute<'_>> {
        None
    }

    /// Headers to merge into the response, e.g. `WWW-Authenticate`.
    fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// Short human outcome used by generic registered handlers.
    fn outcome(&self) -> Option<String> {
        None
    }
}
