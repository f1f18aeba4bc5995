//! Model schemas: the fixed, ordered field list of one model type.

pub mod builder;
pub mod registry;

use crate::Field;
use crate::schema::builder::ModelSchemaBuilder;

/// Named, ordered collection of field declarations.
///
/// Built once through [`ModelSchema::builder`] and shared behind an
/// `Arc`; every [`crate::Model`] instance points at its schema.
#[derive(Debug, PartialEq)]
pub struct ModelSchema {
    name: String,
    fields: Vec<Field>,
}

impl ModelSchema {
    pub fn builder(name: impl Into<String>) -> ModelSchemaBuilder {
        ModelSchemaBuilder::new(name)
    }

    pub(crate) fn from_parts(name: String, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
