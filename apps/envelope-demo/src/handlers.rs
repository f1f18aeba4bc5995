//! Handler registry for the demo, frozen before any request is handled.

use resolver_core::{ExceptionKind, HandlerRegistry, ResolutionObserver, ResolutionSignal};

use models::FieldValue;

use std::sync::Arc;

use log::info;

pub const AUDIT_SIGNAL: &str = "audit";

/// Logs one line per handled exception.
#[derive(Debug, Default)]
pub struct AuditObserver;

impl ResolutionObserver for AuditObserver {
    fn on_resolved(&self, signal: &ResolutionSignal) {
        let strategy = signal
            .strategy
            .map_or_else(|| "fallback".to_string(), |strategy| strategy.to_string());
        info!(
            "audit: {} in {} -> {} via {strategy}",
            signal.exception_kind, signal.view, signal.status
        );
    }
}

pub fn registry() -> Arc<HandlerRegistry> {
    HandlerRegistry::builder()
        .register_handler(ExceptionKind::InvalidToken, |context| {
            context.error_model.construct([
                ("status", FieldValue::from(false)),
                ("message", FieldValue::from("bad token")),
                ("this", FieldValue::from(context.request.path())),
            ])
        })
        .register_exceptions(["PaymentDeclined", "QuotaExceeded"])
        .observer(AUDIT_SIGNAL, Arc::new(AuditObserver))
        .build()
}
