use common::{HttpStatusCode, handler_token};

use std::borrow::Cow;
use std::fmt;

/// Category of a raised exception.
///
/// Handler lookup is by exact kind name. `Custom` carries any
/// application-defined name; `Unknown` is the single fallback for errors
/// that carry no usable name at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    ParseError,
    NotAuthenticated,
    AuthenticationFailed,
    InvalidToken,
    ValidationError,
    NotFound,
    Throttled,
    MethodNotAllowed,
    PermissionDenied,
    ServiceUnavailable,
    /// Not-found raised by routing, outside the API exception family.
    Http404,
    Custom(String),
    Unknown,
}

/// Kinds handled by predefined handlers, in recognition order.
pub const DEFAULT_KINDS: [ExceptionKind; 10] = [
    ExceptionKind::ParseError,
    ExceptionKind::NotAuthenticated,
    ExceptionKind::AuthenticationFailed,
    ExceptionKind::InvalidToken,
    ExceptionKind::ValidationError,
    ExceptionKind::NotFound,
    ExceptionKind::Throttled,
    ExceptionKind::MethodNotAllowed,
    ExceptionKind::PermissionDenied,
    ExceptionKind::ServiceUnavailable,
];

/// Kinds resolved through predefined handlers before the view is asked.
pub const SPECIAL_KINDS: [ExceptionKind; 2] =
    [ExceptionKind::Http404, ExceptionKind::ServiceUnavailable];

const UNKNOWN_KIND_NAME: &str = "Unknown";

impl ExceptionKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ParseError" => Self::ParseError,
            "NotAuthenticated" => Self::NotAuthenticated,
            "AuthenticationFailed" => Self::AuthenticationFailed,
            "InvalidToken" => Self::InvalidToken,
            "ValidationError" => Self::ValidationError,
            "NotFound" => Self::NotFound,
            "Throttled" => Self::Throttled,
            "MethodNotAllowed" => Self::MethodNotAllowed,
            "PermissionDenied" => Self::PermissionDenied,
            "ServiceUnavailable" => Self::ServiceUnavailable,
            "Http404" => Self::Http404,
            "" | UNKNOWN_KIND_NAME => Self::Unknown,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::ParseError => "ParseError",
            Self::NotAuthenticated => "NotAuthenticated",
            Self::AuthenticationFailed => "AuthenticationFailed",
            Self::InvalidToken => "InvalidToken",
            Self::ValidationError => "ValidationError",
            Self::NotFound => "NotFound",
            Self::Throttled => "Throttled",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::PermissionDenied => "PermissionDenied",
            Self::ServiceUnavailable => "ServiceUnavailable",
            Self::Http404 => "Http404",
            Self::Custom(name) => name,
            Self::Unknown => UNKNOWN_KIND_NAME,
        }
    }

    /// Lowercase, underscore-separated token predefined handlers are keyed by.
    pub fn handler_token(&self) -> Cow<'_, str> {
        handler_token(self.name())
    }

    /// Status the host framework's default translation assigns.
    pub fn default_status(&self) -> HttpStatusCode {
        match self {
            Self::ParseError | Self::ValidationError => HttpStatusCode::BAD_REQUEST,
            Self::NotAuthenticated | Self::AuthenticationFailed | Self::InvalidToken => {
                HttpStatusCode::UNAUTHORIZED
            }
            Self::PermissionDenied => HttpStatusCode::FORBIDDEN,
            Self::NotFound | Self::Http404 => HttpStatusCode::NOT_FOUND,
            Self::MethodNotAllowed => HttpStatusCode::METHOD_NOT_ALLOWED,
            Self::Throttled => HttpStatusCode::TOO_MANY_REQUESTS,
            Self::ServiceUnavailable => HttpStatusCode::SERVICE_UNAVAILABLE,
            Self::Custom(_) | Self::Unknown => HttpStatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this kind belongs to the conventional API exception family.
    pub fn is_api_family(&self) -> bool {
        !matches!(self, Self::Http404 | Self::Unknown)
    }
}

impl From<&str> for ExceptionKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
