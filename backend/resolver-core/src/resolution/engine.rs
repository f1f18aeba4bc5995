use crate::context::ResolutionContext;
use crate::error::resolution::ResolutionError;
use crate::error_model::HandlerFn;
use crate::exception::{ExceptionAttribute, ExceptionKind};
use crate::resolution::{Resolved, Resolver, Strategy};

use common::ErrorLocation;
use models::{FieldValue, Model, ModelError};

use std::panic::Location;

use log::{debug, info};

impl Resolver {
    /// Resolve the context's exception to an instance of its error model.
    ///
    /// Strategies run in order and the first one producing a model wins:
    /// registered handler, special-kind predefined handler, the view's
    /// `on_error`, default-kind predefined handler, attribute scrape.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::HandlerContractViolation`] when a handler fails or
    ///   returns an instance of another model type.
    /// - [`ResolutionError::UnsupportedExceptionKind`] when nothing matched a
    ///   default or special kind.
    /// - [`ResolutionError::ResolutionExhausted`] when nothing matched any
    ///   other kind.
    pub fn resolve(&self, context: &ResolutionContext<'_>) -> Result<Resolved, ResolutionError> {
        let kind = context.exception.kind();
        let token = kind.handler_token();

        if let Some(handler) = self.registry.handler_for(&kind) {
            return self.run(Strategy::RegisteredHandler, &kind, context, handler);
        }

        if self.registry.is_special_kind(&kind) {
            if let Some(handler) = context.error_model.predefined_handler(&token) {
                return self.run(Strategy::SpecialKind, &kind, context, handler);
            }
            debug!("{kind}: no predefined handler '{token}' on {}", context.error_model.name());
        }

        if kind.is_api_family() {
            if let Some(view) = context.view {
                debug!("{kind}: trying {} of {}", Strategy::ViewOnError, view.name());
                if let Some(model) = view.on_error(context) {
                    let model = checked(Strategy::ViewOnError, &kind, context, Ok(model))?;
                    return Ok(resolved(&kind, model, Strategy::ViewOnError));
                }
            }
        }

        if self.registry.is_default_kind(&kind) {
            if let Some(handler) = context.error_model.predefined_handler(&token) {
                return self.run(Strategy::DefaultHandler, &kind, context, handler);
            }
            debug!("{kind}: no predefined handler '{token}' on {}", context.error_model.name());
        }

        debug!("{kind}: trying {}", Strategy::AttributeScrape);
        if let Some(model) = scrape(&kind, context)? {
            return Ok(resolved(&kind, model, Strategy::AttributeScrape));
        }

        let location = ErrorLocation::from(Location::caller());
        if self.registry.is_default_kind(&kind) || self.registry.is_special_kind(&kind) {
            Err(ResolutionError::UnsupportedExceptionKind {
                kind: kind.name().to_string(),
                location,
            })
        } else {
            Err(ResolutionError::ResolutionExhausted {
                kind: kind.name().to_string(),
                location,
            })
        }
    }

    fn run(
        &self,
        strategy: Strategy,
        kind: &ExceptionKind,
        context: &ResolutionContext<'_>,
        handler: &HandlerFn,
    ) -> Result<Resolved, ResolutionError> {
        debug!("{kind}: trying {strategy}");
        let model = checked(strategy, kind, context, handler(context))?;
        Ok(resolved(kind, model, strategy))
    }
}

fn resolved(kind: &ExceptionKind, model: Model, strategy: Strategy) -> Resolved {
    info!("{kind} resolved to {} by {strategy}", model.name());
    Resolved { model, strategy }
}

/// Enforce the handler contract: success, and an instance of the error model.
#[track_caller]
fn checked(
    strategy: Strategy,
    kind: &ExceptionKind,
    context: &ResolutionContext<'_>,
    result: Result<Model, ModelError>,
) -> Result<Model, ResolutionError> {
    let violation = |message: String| ResolutionError::HandlerContractViolation {
        strategy,
        kind: kind.name().to_string(),
        message,
        location: ErrorLocation::from(Location::caller()),
    };

    let model = result.map_err(|e| violation(e.to_string()))?;
    let expected = context.error_model.schema();
    if !model.is_instance_of(expected) {
        return Err(violation(format!(
            "returned {}, expected {}",
            model.name(),
            expected.name()
        )));
    }

    Ok(model)
}

/// Bind every exception attribute named like an error model field.
///
/// Unmatched fields keep their defaults. `None` when nothing matched.
fn scrape(
    kind: &ExceptionKind,
    context: &ResolutionContext<'_>,
) -> Result<Option<Model>, ResolutionError> {
    let details = context.details();
    let mut model = context.error_model.instance();
    let mut matched = 0usize;

    for field in context.error_model.schema().fields() {
        let Some(attribute) = context.exception.attribute(field.name()) else {
            continue;
        };

        let value = match attribute {
            ExceptionAttribute::Value(value) => value,
            ExceptionAttribute::Getter(getter) => getter(context, &details),
        };

        let bound = match (field.nested_schema(), value) {
            (Some(nested), FieldValue::Mapping(object)) => {
                Model::from_json(nested, object).map(FieldValue::Model)
            }
            (_, value) => Ok(value),
        }
        .and_then(|value| model.set(field.name(), value));

        bound.map_err(|e| ResolutionError::HandlerContractViolation {
            strategy: Strategy::AttributeScrape,
            kind: kind.name().to_string(),
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;
        matched += 1;
    }

    debug!(
        "{kind}: scraped {matched} of {} fields of {}",
        context.error_model.schema().len(),
        context.error_model.name()
    );
    Ok((matched > 0).then_some(model))
}
