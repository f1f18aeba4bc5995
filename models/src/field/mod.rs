//! Field declarations.
//!
//! A [`Field`] is a declaration, not a value holder: the value lives on
//! the owning [`Model`] instance. Declarations are immutable once a
//! schema is built.

pub mod value;

use crate::field::value::FieldValue;
use crate::{Model, ModelSchema};

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

/// Semantic kind of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    DateTime,
    Date,
    List,
    Mapping,
    Model,
    Data,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::DateTime => "datetime",
            FieldKind::Date => "date",
            FieldKind::List => "list",
            FieldKind::Mapping => "mapping",
            FieldKind::Model => "model",
            FieldKind::Data => "data",
        };
        f.write_str(name)
    }
}

/// One named, typed, defaulted attribute of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    kind: FieldKind,
    default: FieldValue,
    nested: Option<Arc<ModelSchema>>,
    nullable: bool,
    required: bool,
    read_only: bool,
    help_text: Option<String>,
}

impl Field {
    fn declare(name: impl Into<String>, kind: FieldKind, default: FieldValue) -> Self {
        Self {
            name: name.into(),
            kind,
            default,
            nested: None,
            nullable: true,
            required: false,
            read_only: false,
            help_text: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::declare(name, FieldKind::String, FieldValue::Null)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::declare(name, FieldKind::Integer, FieldValue::Null)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::declare(name, FieldKind::Boolean, FieldValue::Null)
    }

    pub fn datetime(name: impl Into<String>) -> Self {
        Self::declare(name, FieldKind::DateTime, FieldValue::Null)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::declare(name, FieldKind::Date, FieldValue::Null)
    }

    /// List field; defaults to an empty list.
    pub fn list(name: impl Into<String>) -> Self {
        Self::declare(name, FieldKind::List, FieldValue::List(Vec::new()))
    }

    /// Mapping field; defaults to an empty mapping.
    pub fn mapping(name: impl Into<String>) -> Self {
        Self::declare(name, FieldKind::Mapping, FieldValue::Mapping(Map::new()))
    }

    /// Opaque data field, emitted verbatim.
    pub fn data(name: impl Into<String>) -> Self {
        Self::declare(name, FieldKind::Data, FieldValue::Null)
    }

    /// Nested model field. Unset values become a fresh instance of `schema`.
    pub fn nested(name: impl Into<String>, schema: &Arc<ModelSchema>) -> Self {
        let mut field = Self::declare(name, FieldKind::Model, FieldValue::Null);
        field.nested = Some(Arc::clone(schema));
        field
    }

    pub fn with_default(mut self, default: impl Into<FieldValue>) -> Self {
        self.default = default.into();
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn default_value(&self) -> &FieldValue {
        &self.default
    }

    pub fn nested_schema(&self) -> Option<&Arc<ModelSchema>> {
        self.nested.as_ref()
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn help(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    /// Apply the default-substitution rule to a supplied value.
    ///
    /// A null value takes the declared default when that default is not
    /// null; anything else is kept verbatim. Nested-model fields left
    /// null are bound to a fresh default instance.
    pub fn resolve(&self, value: FieldValue) -> FieldValue {
        if !value.is_null() {
            return value;
        }
        if let Some(schema) = &self.nested {
            return FieldValue::Model(Model::new(schema));
        }
        if !self.default.is_null() {
            return self.default.clone();
        }
        value
    }

    /// Convert a raw JSON value for this field, building nested models
    /// from JSON objects.
    pub(crate) fn value_from_json(&self, value: Value) -> Result<FieldValue, crate::ModelError> {
        match (&self.nested, value) {
            (Some(schema), Value::Object(map)) => Ok(FieldValue::Model(Model::from_json(schema, map)?)),
            (_, Value::Null) => Ok(FieldValue::Null),
            (_, other) if self.kind == FieldKind::Data => Ok(FieldValue::Data(other)),
            (_, other) => Ok(FieldValue::from(other)),
        }
    }
}
