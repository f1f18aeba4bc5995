use resolver_core::Strategy;
use resolver_core::error::{ConfigError, CoreError, ResolutionError, SinkError};

use common::ErrorLocation;

use std::error::Error;
use std::panic::Location;

/// **VALUE**: Verifies `ResolutionError` messages carry the title, detail and location.
///
/// **WHY THIS MATTERS**: Contract violations are programming errors. The log line must
/// point at the exact place they were raised.
///
/// **BUG THIS CATCHES**: Would catch someone:
/// - Removing the `location` field from a variant
/// - Breaking the Display format so the location is dropped
#[test]
#[track_caller]
fn given_contract_violation_when_formatted_then_includes_strategy_kind_and_location() {
    // GIVEN
    let err = ResolutionError::HandlerContractViolation {
        strategy: Strategy::RegisteredHandler,
        kind: "PaymentDeclined".to_string(),
        message: "returned Foreign, expected RestfulError".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN
    let error_string = err.to_string();

    // THEN
    assert!(error_string.contains("Handler Contract Violation"));
    assert!(error_string.contains("registered handler"));
    assert!(error_string.contains("PaymentDeclined"));
    assert!(error_string.contains("error.rs"));
}

/// **VALUE**: Verifies `Surfaced` keeps the underlying failure as its source.
///
/// **BUG THIS CATCHES**: Would catch the `#[source]` attribute being dropped, which
/// hides the real failure from error reporters walking the chain.
#[test]
#[track_caller]
fn given_surfaced_error_when_source_requested_then_original_failure_returned() {
    // GIVEN
    let location = ErrorLocation::from(Location::caller());
    let err = ResolutionError::Surfaced {
        kind: "PaymentDeclined".to_string(),
        exception: "PaymentDeclined: Card expired.".to_string(),
        trace: "0: main".to_string(),
        location,
        source: Box::new(ResolutionError::ResolutionExhausted {
            kind: "PaymentDeclined".to_string(),
            location,
        }),
    };

    // WHEN
    let source = err.source().map(ToString::to_string);

    // THEN
    assert!(source.unwrap().contains("Resolution Exhausted Error"));
    assert!(err.to_string().contains("Card expired."));
}

#[test]
#[track_caller]
fn given_errors_when_converted_to_core_error_then_display_is_transparent() {
    let location = ErrorLocation::from(Location::caller());
    let sink = SinkError::CrashReportFailure {
        message: "disk full".to_string(),
        location,
    };
    let config = ConfigError::ValidationError {
        location,
        reason: "Duplicate signal id: audit".to_string(),
    };

    let sink_message = sink.to_string();
    let config_message = config.to_string();

    assert_eq!(CoreError::from(sink).to_string(), sink_message);
    assert_eq!(CoreError::from(config).to_string(), config_message);
    assert!(config_message.starts_with("Config Validation Error"));
}
