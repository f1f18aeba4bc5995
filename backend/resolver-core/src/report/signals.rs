use crate::resolution::Strategy;

use common::HttpStatusCode;

use serde::Serialize;

/// What observers are told once an exception has been handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionSignal {
    pub exception_kind: String,
    pub view: String,
    pub status: HttpStatusCode,
    pub strategy: Option<Strategy>,
    /// The fixed internal-error body was returned.
    pub fallback: bool,
}

/// Receiver for resolution signals, registered by id on the handler
/// registry and enabled through `error_handler_signals`.
pub trait ResolutionObserver: Send + Sync {
    fn on_resolved(&self, signal: &ResolutionSignal);
}
