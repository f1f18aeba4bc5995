use crate::HttpStatusCode;

/// **VALUE**: Verifies the server-error boundary used to trigger crash reports.
///
/// **WHY THIS MATTERS**: Crash reports fire for statuses >= 500 and only those. An
/// off-by-one here either floods the crash sink or hides real failures.
///
/// **BUG THIS CATCHES**: Would catch if the range check were changed to `500..600`
/// exclusive of 500 or inclusive of 499.
#[test]
fn given_status_codes_when_classified_then_server_error_starts_at_500() {
    assert!(!HttpStatusCode(499).is_server_error());
    assert!(HttpStatusCode(500).is_server_error());
    assert!(HttpStatusCode::SERVICE_UNAVAILABLE.is_server_error());
    assert!(HttpStatusCode::NOT_FOUND.is_client_error());
    assert!(HttpStatusCode::OK.is_success());
    assert!(!HttpStatusCode::OK.is_error());
    assert!(HttpStatusCode::BAD_REQUEST.is_error());
}

/// **VALUE**: Verifies the status serializes as a bare number.
///
/// **WHY THIS MATTERS**: Crash reports and request log lines embed the status; consumers
/// expect `500`, not `{"0":500}`.
///
/// **BUG THIS CATCHES**: Would catch removal of `#[serde(transparent)]`.
#[test]
fn given_status_when_serialized_then_is_plain_number() {
    let json = serde_json::to_string(&HttpStatusCode::INTERNAL_SERVER_ERROR).unwrap();
    assert_eq!(json, "500");
    assert_eq!(
        HttpStatusCode::default().canonical_reason(),
        Some("OK"),
        "Default status should be 200 OK"
    );
}
