//! Composition root: configuration, registries and the resolver.

use crate::error::DemoError;
use crate::handlers;

use resolver_core::config::load_dotenv;
use resolver_core::{
    ApiException, ErrorModel, RequestContext, Resolver, ResolverConfig, ResolverSettings,
    ResponseState, SuccessRenderer, View,
};

use models::standard::RESTFUL_ERROR;
use models::{Envelope, SchemaRegistry};

use std::path::Path;

use common::HttpStatusCode;
use log::info;
use serde_json::Value;

/// Everything needed to answer requests, built once at start-up.
pub struct EnvelopeApp {
    config: ResolverConfig,
    resolver: Resolver,
    renderer: SuccessRenderer,
}

impl EnvelopeApp {
    /// Load `.env`, `{config_dir}/envelope.toml` and environment overrides,
    /// then freeze the handler registry and resolve configured names.
    ///
    /// The error model defaults to `RestfulError` when none is configured.
    pub fn start(config_dir: &Path) -> Result<Self, DemoError> {
        Self::from_config(Self::load_config(config_dir)?)
    }

    /// Read the config alone, before a logger exists to receive
    /// resolver output.
    pub fn load_config(config_dir: &Path) -> Result<ResolverConfig, DemoError> {
        load_dotenv();

        let mut config = ResolverConfig::load(config_dir).map_err(DemoError::core)?;
        config.apply_env_overrides().map_err(DemoError::core)?;
        Ok(config)
    }

    pub fn from_config(mut config: ResolverConfig) -> Result<Self, DemoError> {
        if config.error_json_model.is_none() {
            info!("No error model configured, using {RESTFUL_ERROR}");
            config.error_json_model = Some(RESTFUL_ERROR.to_string());
        }

        let schemas = SchemaRegistry::with_standard().map_err(DemoError::model)?;
        let error_models = [ErrorModel::restful().map_err(DemoError::model)?];
        let registry = handlers::registry();

        let settings = ResolverSettings::from_config(&config, &schemas, &error_models, &registry)
            .map_err(DemoError::core)?;

        info!(
            "Resolver ready: error model {}, debug {}, signals {:?}, targets {} / {}",
            config.error_json_model.as_deref().unwrap_or_default(),
            settings.debug,
            settings.signals,
            settings.request_target,
            settings.crash_target
        );

        Ok(Self {
            renderer: SuccessRenderer::new(&settings),
            resolver: Resolver::with_log_sink(registry, settings),
            config,
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Error envelope for `exception` raised in `view`.
    pub fn fail(
        &self,
        exception: &dyn ApiException,
        view: Option<&dyn View>,
        request: &RequestContext,
    ) -> Result<Envelope, DemoError> {
        self.resolver
            .handle_exception(exception, view, request)
            .map_err(DemoError::core)
    }

    /// Success envelope for `data` returned by `view`.
    pub fn succeed(
        &self,
        view: Option<&dyn View>,
        request: &RequestContext,
        data: Value,
    ) -> Result<Envelope, DemoError> {
        self.renderer
            .success_envelope(view, request, HttpStatusCode::OK, data)
            .map_err(DemoError::core)
    }

    /// Body for a response a view already produced.
    pub fn render(
        &self,
        view: Option<&dyn View>,
        request: &RequestContext,
        response: &ResponseState,
        data: Value,
    ) -> Value {
        self.renderer.render_success(view, request, response, data)
    }
}
