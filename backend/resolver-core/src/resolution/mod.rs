//! Exception resolution.
//!
//! [`Resolver::resolve`] walks the strategy chain for one exception and
//! returns the first error model instance produced. [`Resolver::handle_exception`]
//! is the boundary the host framework calls: it always yields an envelope
//! in production mode, and emits crash reports, request log entries and
//! observer signals exactly once per call.

mod boundary;
mod engine;

pub use boundary::system_error_envelope;

use crate::config::ResolverSettings;
use crate::registry::HandlerRegistry;
use crate::report::{LogSink, ReportSink};

use models::Model;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Code and details of the fixed internal-error body.
pub const SYSTEM_ERROR_CODE: &str = "system_error";
pub const SYSTEM_ERROR_DETAILS: &str = "An unexpected error occurred during handling an error.";

/// The strategy that produced an error model instance, in attempt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    RegisteredHandler,
    SpecialKind,
    ViewOnError,
    DefaultHandler,
    AttributeScrape,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RegisteredHandler => "registered handler",
            Self::SpecialKind => "special kind handler",
            Self::ViewOnError => "view on_error",
            Self::DefaultHandler => "default handler",
            Self::AttributeScrape => "attribute scrape",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub model: Model,
    pub strategy: Strategy,
}

/// Resolves exceptions against a frozen handler registry.
///
/// Holds no per-request state; share one instance across threads.
pub struct Resolver {
    registry: Arc<HandlerRegistry>,
    settings: ResolverSettings,
    sink: Arc<dyn ReportSink>,
}

impl Resolver {
    pub fn new(
        registry: Arc<HandlerRegistry>,
        settings: ResolverSettings,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        Self {
            registry,
            settings,
            sink,
        }
    }

    /// Resolver reporting through the `log` facade on the targets in
    /// `settings`.
    pub fn with_log_sink(registry: Arc<HandlerRegistry>, settings: ResolverSettings) -> Self {
        let sink = LogSink::new(settings.request_target.as_str(), settings.crash_target.as_str());
        Self::new(registry, settings, Arc::new(sink))
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn is_debug(&self) -> bool {
        self.settings.debug
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
