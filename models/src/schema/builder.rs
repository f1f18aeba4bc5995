use crate::error::model_error::ModelError;
use crate::{Field, ModelSchema};

use common::ErrorLocation;

use std::collections::HashSet;
use std::panic::Location;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

const FIELD_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

static FIELD_NAME: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(FIELD_NAME_PATTERN));

/// Builder for validated, immutable [`ModelSchema`] values.
///
/// Inheritance is explicit: [`extend`](Self::extend) flattens a parent
/// schema's fields ahead of the fields declared on this builder. A field
/// declared here with a parent's name replaces the parent declaration in
/// place.
#[derive(Debug)]
pub struct ModelSchemaBuilder {
    name: String,
    fields: Vec<Field>,
    inherited: usize,
    own: HashSet<String>,
    duplicates: Vec<String>,
}

impl ModelSchemaBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            inherited: 0,
            own: HashSet::new(),
            duplicates: Vec::new(),
        }
    }

    /// Flatten `parent`'s fields into this schema.
    pub fn extend(mut self, parent: &ModelSchema) -> Self {
        for field in parent.fields() {
            if self.fields.iter().any(|f| f.name() == field.name()) {
                continue;
            }
            self.fields.insert(self.inherited, field.clone());
            self.inherited += 1;
        }
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        if !self.own.insert(field.name().to_string()) {
            self.duplicates.push(field.name().to_string());
            return self;
        }

        match self.fields.iter().position(|f| f.name() == field.name()) {
            Some(index) => self.fields[index] = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Build the schema with validation.
    #[track_caller]
    pub fn build(self) -> Result<Arc<ModelSchema>, ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Model name cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(duplicate) = self.duplicates.first() {
            return Err(ModelError::Validation {
                message: format!("{} declares field '{duplicate}' more than once", self.name),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let pattern = FIELD_NAME.as_ref().map_err(|e| ModelError::Validation {
            message: format!("Field name pattern failed to compile: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if let Some(invalid) = self.fields.iter().find(|f| !pattern.is_match(f.name())) {
            return Err(ModelError::Validation {
                message: format!("{} has invalid field name '{}'", self.name, invalid.name()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Arc::new(ModelSchema::from_parts(self.name, self.fields)))
    }
}
