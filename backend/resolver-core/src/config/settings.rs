use crate::config::ResolverConfig;
use crate::error::resolution::ResolutionError;
use crate::error_model::ErrorModel;
use crate::registry::HandlerRegistry;
use crate::{CRASH_LOG_TARGET, REQUEST_LOG_TARGET};

use common::ErrorLocation;
use models::{ModelSchema, SchemaRegistry};

use std::panic::Location;
use std::sync::Arc;

/// Config with every name resolved to the value it refers to.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub error_model: Option<ErrorModel>,
    pub success_model: Option<Arc<ModelSchema>>,
    pub debug: bool,
    pub signals: Vec<String>,
    /// Log target for request entries.
    pub request_target: String,
    /// Log target for crash reports.
    pub crash_target: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            error_model: None,
            success_model: None,
            debug: false,
            signals: Vec::new(),
            request_target: REQUEST_LOG_TARGET.to_string(),
            crash_target: CRASH_LOG_TARGET.to_string(),
        }
    }
}

impl ResolverSettings {
    pub fn new(error_model: ErrorModel) -> Self {
        Self {
            error_model: Some(error_model),
            ..Self::default()
        }
    }

    pub fn with_success_model(mut self, schema: Arc<ModelSchema>) -> Self {
        self.success_model = Some(schema);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_signal(mut self, id: impl Into<String>) -> Self {
        self.signals.push(id.into());
        self
    }

    pub fn with_log_targets(
        mut self,
        request_target: impl Into<String>,
        crash_target: impl Into<String>,
    ) -> Self {
        self.request_target = request_target.into();
        self.crash_target = crash_target.into();
        self
    }

    /// Resolve model names and signal ids, and carry the logger targets.
    ///
    /// `error_models` are the error model types the host offers, matched by
    /// schema name. The success model comes from `schemas`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::ConfigurationError`] for an unknown model
    /// name or a signal id with no observer registered.
    #[track_caller]
    pub fn from_config(
        config: &ResolverConfig,
        schemas: &SchemaRegistry,
        error_models: &[ErrorModel],
        registry: &HandlerRegistry,
    ) -> Result<Self, ResolutionError> {
        let error_model = match config.error_json_model.as_deref() {
            Some(name) => Some(
                error_models
                    .iter()
                    .find(|model| model.name() == name)
                    .cloned()
                    .ok_or_else(|| configuration_error(format!("Unknown error model '{name}'")))?,
            ),
            None => None,
        };

        let success_model = match config.success_json_model.as_deref() {
            Some(name) => Some(
                schemas
                    .get(name)
                    .ok_or_else(|| configuration_error(format!("Unknown success model '{name}'")))?,
            ),
            None => None,
        };

        if let Some(id) = config
            .error_handler_signals
            .iter()
            .find(|id| !registry.has_observer(id))
        {
            return Err(configuration_error(format!(
                "Signal '{id}' has no registered observer"
            )));
        }

        Ok(Self {
            error_model,
            success_model,
            debug: config.debug,
            signals: config.error_handler_signals.clone(),
            request_target: config.error_handler_logger.clone(),
            crash_target: config.error_handler_crash_logger.clone(),
        })
    }
}

#[track_caller]
fn configuration_error(message: String) -> ResolutionError {
    ResolutionError::ConfigurationError {
        message,
        location: ErrorLocation::from(Location::caller()),
    }
}
