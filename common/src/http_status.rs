//! HTTP status code utilities for envelope rendering and crash reporting.

use serde::{Deserialize, Serialize};

/// HTTP status code carried by an in-flight response.
///
/// Stored directly rather than parsed from framework objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub const OK: Self = Self(200);
    pub const BAD_REQUEST: Self = Self(400);
    pub const UNAUTHORIZED: Self = Self(401);
    pub const FORBIDDEN: Self = Self(403);
    pub const NOT_FOUND: Self = Self(404);
    pub const METHOD_NOT_ALLOWED: Self = Self(405);
    pub const TOO_MANY_REQUESTS: Self = Self(429);
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);
    pub const SERVICE_UNAVAILABLE: Self = Self(503);

    /// 2xx success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 4xx client errors.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx and above. Anything in this class triggers a crash report.
    pub fn is_server_error(&self) -> bool {
        self.0 >= 500
    }

    /// Any status the success renderer must leave alone.
    pub fn is_error(&self) -> bool {
        self.0 >= 400
    }

    /// Canonical reason phrase for the codes the resolver produces.
    pub fn canonical_reason(&self) -> Option<&'static str> {
        match self.0 {
            200 => Some("OK"),
            400 => Some("Bad Request"),
            401 => Some("Unauthorized"),
            403 => Some("Forbidden"),
            404 => Some("Not Found"),
            405 => Some("Method Not Allowed"),
            429 => Some("Too Many Requests"),
            500 => Some("Internal Server Error"),
            503 => Some("Service Unavailable"),
            _ => None,
        }
    }
}

impl Default for HttpStatusCode {
    fn default() -> Self {
        Self::OK
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
