use crate::handler_token;
use std::borrow::Cow;

/// **VALUE**: Verifies every default exception kind maps to the token its predefined
/// handler is registered under.
///
/// **WHY THIS MATTERS**: Predefined handler lookup is by token. A wrong token means the
/// default handler silently never runs and the request falls through to the scrape path.
///
/// **BUG THIS CATCHES**: Would catch a broken word-boundary rule.
#[test]
fn given_default_kind_names_when_converted_then_produces_snake_tokens() {
    assert_eq!(handler_token("ParseError"), "parse_error");
    assert_eq!(handler_token("NotAuthenticated"), "not_authenticated");
    assert_eq!(handler_token("AuthenticationFailed"), "authentication_failed");
    assert_eq!(handler_token("InvalidToken"), "invalid_token");
    assert_eq!(handler_token("ValidationError"), "validation_error");
    assert_eq!(handler_token("NotFound"), "not_found");
    assert_eq!(handler_token("Throttled"), "throttled");
    assert_eq!(handler_token("MethodNotAllowed"), "method_not_allowed");
    assert_eq!(handler_token("PermissionDenied"), "permission_denied");
    assert_eq!(handler_token("ServiceUnavailable"), "service_unavailable");
}

/// **VALUE**: Verifies digits and acronym runs.
///
/// **WHY THIS MATTERS**: Routing-level kinds like `Http404` and user kinds like
/// `HTTPError` must produce stable tokens.
///
/// **BUG THIS CATCHES**: Would catch splitting every capital of an acronym
/// (`h_t_t_p_error`) or splitting before digits.
#[test]
fn given_digits_and_acronyms_when_converted_then_keeps_runs_together() {
    assert_eq!(handler_token("Http404"), "http404");
    assert_eq!(handler_token("HTTPError"), "http_error");
    assert_eq!(handler_token("Http404Error"), "http404_error");
}

/// **VALUE**: Verifies lowercase names pass through without allocation.
///
/// **BUG THIS CATCHES**: Would catch if already-normalised tokens were rebuilt.
#[test]
fn given_lowercase_token_when_converted_then_returns_borrowed() {
    assert!(matches!(handler_token("not_found"), Cow::Borrowed("not_found")));
}
