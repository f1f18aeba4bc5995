pub mod config;
pub mod context;
pub mod error;
pub mod error_model;
pub mod exception;
pub mod registry;
pub mod renderer;
pub mod report;
pub mod resolution;

#[cfg(test)]
mod tests;

pub use config::{ResolverConfig, ResolverSettings};
pub use context::{RequestContext, ResolutionContext, ResponseState, View};
pub use error::{ConfigError, CoreError, ResolutionError, SinkError};
pub use error_model::{ErrorModel, HandlerFn};
pub use exception::{ApiException, ErrorDetails, ExceptionAttribute, ExceptionKind, StandardException};
pub use registry::{HandlerRegistry, HandlerRegistryBuilder};
pub use renderer::SuccessRenderer;
pub use report::{CrashReport, LogSink, ReportSink, RequestLogEntry, ResolutionObserver, ResolutionSignal};
pub use resolution::{Resolved, Resolver, Strategy};

pub const LOG_TARGET_ROOT: &str = "envelope";
pub const REQUEST_LOG_TARGET: &str = const_format::concatcp!(LOG_TARGET_ROOT, "::request");
pub const CRASH_LOG_TARGET: &str = const_format::concatcp!(LOG_TARGET_ROOT, "::crash");
