use crate::exception::{ApiException, ErrorDetails, ExceptionAttribute, ExceptionKind};

use models::FieldValue;

use std::collections::BTreeMap;

use thiserror::Error;

/// General-purpose exception value for hosts without their own error types.
///
/// Carries a kind, details, response headers and a bag of plain
/// attributes exposed to the scrape strategy.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {}", .details.message)]
pub struct StandardException {
    kind: ExceptionKind,
    details: ErrorDetails,
    outcome: Option<String>,
    headers: BTreeMap<String, String>,
    attributes: BTreeMap<String, FieldValue>,
}

impl StandardException {
    /// Exception with the kind's handler token as its code.
    pub fn new(kind: impl Into<ExceptionKind>, message: impl Into<String>) -> Self {
        let kind = kind.into();
        let code = kind.handler_token().into_owned();
        Self {
            kind,
            details: ErrorDetails::new(code, message),
            outcome: None,
            headers: BTreeMap::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.details.code = code.into();
        self
    }

    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl ApiException for StandardException {
    fn kind(&self) -> ExceptionKind {
        self.kind.clone()
    }

    fn full_details(&self) -> ErrorDetails {
        self.details.clone()
    }

    fn attribute(&self, name: &str) -> Option<ExceptionAttribute<'_>> {
        self.attributes
            .get(name)
            .map(|value| ExceptionAttribute::Value(value.clone()))
    }

    fn headers(&self) -> BTreeMap<String, String> {
        self.headers.clone()
    }

    fn outcome(&self) -> Option<String> {
        self.outcome.clone()
    }
}
