use common::ErrorLocation;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while starting or driving the demo.
///
/// Resolver failures keep their message and the location they were
/// re-raised from; the typed error is logged where it happens.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum DemoError {
    /// Error from this App
    #[error("Demo Error: {message} {location}")]
    Demo {
        message: String,
        location: ErrorLocation,
    },

    /// Error from resolver-core (config, resolution)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Error from model declaration or serialization
    #[error("Model Error: {message} {location}")]
    Model {
        message: String,
        location: ErrorLocation,
    },
}

impl DemoError {
    #[track_caller]
    pub fn core(error: impl Into<resolver_core::CoreError>) -> Self {
        Self::Core {
            message: error.into().to_string(),
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }

    #[track_caller]
    pub fn model(error: models::ModelError) -> Self {
        Self::Model {
            message: error.to_string(),
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}
