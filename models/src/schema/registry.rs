//! Name → schema lookup for configured models.
//!
//! Configuration names the error and success models by string; this
//! table is where those names are resolved.

use crate::error::model_error::ModelError;
use crate::{ModelSchema, standard};

use common::ErrorLocation;

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<ModelSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with `RestfulResponse` and `RestfulError`.
    pub fn with_standard() -> Result<Self, ModelError> {
        let mut registry = Self::new();
        registry.register(standard::restful_response()?)?;
        registry.register(standard::restful_error()?)?;
        Ok(registry)
    }

    /// Register a schema under its own name.
    ///
    /// Registering the same schema twice is a no-op; a different schema
    /// under a taken name is rejected.
    #[track_caller]
    pub fn register(&mut self, schema: Arc<ModelSchema>) -> Result<(), ModelError> {
        if let Some(existing) = self.schemas.get(schema.name()) {
            if *existing == schema {
                return Ok(());
            }
            return Err(ModelError::Validation {
                message: format!("A different model is already registered as '{}'", schema.name()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.schemas.insert(schema.name().to_string(), schema);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<ModelSchema>> {
        self.schemas.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
