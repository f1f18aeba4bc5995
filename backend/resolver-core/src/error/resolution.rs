use crate::resolution::Strategy;

use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failures of one resolution call.
///
/// Everything except `Surfaced` is converted to the fixed internal-error
/// envelope at the boundary in production mode. In debug mode the
/// boundary wraps the failure in `Surfaced` and returns it.
#[derive(Debug, ThisError)]
pub enum ResolutionError {
    #[error("Configuration Error: {message} {location}")]
    ConfigurationError {
        message: String,
        location: ErrorLocation,
    },

    #[error("Handler Contract Violation: {strategy} for {kind}: {message} {location}")]
    HandlerContractViolation {
        strategy: Strategy,
        kind: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unsupported Exception Kind Error: {kind} is recognised but the error model cannot represent it {location}")]
    UnsupportedExceptionKind {
        kind: String,
        location: ErrorLocation,
    },

    #[error("Resolution Exhausted Error: no strategy resolved {kind} {location}")]
    ResolutionExhausted {
        kind: String,
        location: ErrorLocation,
    },

    #[error("Surfaced Error: {kind}: {exception} {location}\n{trace}")]
    Surfaced {
        kind: String,
        exception: String,
        trace: String,
        location: ErrorLocation,
        #[source]
        source: Box<ResolutionError>,
    },
}
