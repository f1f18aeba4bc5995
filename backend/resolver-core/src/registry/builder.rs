use crate::context::ResolutionContext;
use crate::error_model::{HandlerFn, bind_error_details};
use crate::exception::{DEFAULT_KINDS, ExceptionKind, SPECIAL_KINDS};
use crate::registry::HandlerRegistry;
use crate::report::signals::ResolutionObserver;

use models::{Model, ModelError};

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::{debug, warn};

/// Collects handlers, extra kinds and observers before the registry is frozen.
pub struct HandlerRegistryBuilder {
    default_kinds: Vec<String>,
    special_kinds: Vec<String>,
    handlers: HashMap<String, HandlerFn>,
    observers: BTreeMap<String, Arc<dyn ResolutionObserver>>,
}

impl HandlerRegistryBuilder {
    pub(crate) fn new() -> Self {
        Self {
            default_kinds: DEFAULT_KINDS.iter().map(|kind| kind.name().to_string()).collect(),
            special_kinds: SPECIAL_KINDS.iter().map(|kind| kind.name().to_string()).collect(),
            handlers: HashMap::new(),
            observers: BTreeMap::new(),
        }
    }

    /// Register `handler` for exactly `kind`. A later registration for the
    /// same kind replaces the earlier one.
    pub fn register_handler<F>(mut self, kind: impl Into<ExceptionKind>, handler: F) -> Self
    where
        F: Fn(&ResolutionContext<'_>) -> Result<Model, ModelError> + Send + Sync + 'static,
    {
        let kind = kind.into();
        if self
            .handlers
            .insert(kind.name().to_string(), Arc::new(handler))
            .is_some()
        {
            warn!("Replacing handler already registered for {kind}");
        } else {
            debug!("Registered handler for {kind}");
        }
        self
    }

    /// Register the generic handler for `kind`.
    ///
    /// It sets `message` to the exception's outcome (falling back to its
    /// message) and binds `{code, details}` to the model's `error` field,
    /// or `data` when there is no `error` field.
    pub fn register_exception(self, kind: impl Into<ExceptionKind>) -> Self {
        self.register_handler(kind, generic_handler)
    }

    pub fn register_exceptions<I, K>(self, kinds: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ExceptionKind>,
    {
        kinds
            .into_iter()
            .fold(self, |builder, kind| builder.register_exception(kind))
    }

    /// Add a kind resolved through the error model's predefined handlers.
    pub fn default_kind(mut self, kind: impl Into<ExceptionKind>) -> Self {
        let name = kind.into().name().to_string();
        if !self.default_kinds.contains(&name) {
            self.default_kinds.push(name);
        }
        self
    }

    /// Add a kind resolved through predefined handlers before the view.
    pub fn special_kind(mut self, kind: impl Into<ExceptionKind>) -> Self {
        let name = kind.into().name().to_string();
        if !self.special_kinds.contains(&name) {
            self.special_kinds.push(name);
        }
        self
    }

    pub fn observer(mut self, id: impl Into<String>, observer: Arc<dyn ResolutionObserver>) -> Self {
        let id = id.into();
        if self.observers.insert(id.clone(), observer).is_some() {
            warn!("Replacing resolution observer '{id}'");
        }
        self
    }

    pub fn build(self) -> Arc<HandlerRegistry> {
        debug!(
            "Handler registry frozen: {} handlers, {} observers",
            self.handlers.len(),
            self.observers.len()
        );
        Arc::new(HandlerRegistry {
            default_kinds: self.default_kinds,
            special_kinds: self.special_kinds,
            handlers: self.handlers,
            observers: self.observers,
        })
    }
}

fn generic_handler(context: &ResolutionContext<'_>) -> Result<Model, ModelError> {
    let details = context.details();
    let message = context
        .exception
        .outcome()
        .unwrap_or_else(|| details.message.clone());

    let mut model = context.error_model.instance();
    model.set_if_declared("message", message);
    bind_error_details(
        &mut model,
        &details.code,
        serde_json::Value::String(details.message),
    )?;

    Ok(model)
}
