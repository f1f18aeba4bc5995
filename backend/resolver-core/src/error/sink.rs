use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Report sink failures. Always swallowed by the resolver.
#[derive(Debug, ThisError)]
pub enum SinkError {
    #[error("Crash Report Failure: {message} {location}")]
    CrashReportFailure {
        message: String,
        location: ErrorLocation,
    },

    #[error("Request Log Failure: {message} {location}")]
    RequestLogFailure {
        message: String,
        location: ErrorLocation,
    },
}
