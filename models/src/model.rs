//! Model instances.

use crate::envelope::Envelope;
use crate::error::model_error::ModelError;
use crate::field::value::FieldValue;
use crate::{Field, ModelSchema};

use common::{ErrorLocation, HttpStatusCode};

use std::collections::BTreeMap;
use std::panic::Location;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One instance of a [`ModelSchema`].
///
/// Values are stored index-aligned with the schema's fields, so an
/// instance always exposes exactly the declared field set. Nested models
/// are owned by their parent; mutate them through [`Model::nested_mut`].
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    schema: Arc<ModelSchema>,
    values: Vec<FieldValue>,
}

impl Model {
    /// Instance with every field bound to its resolved default.
    pub fn new(schema: &Arc<ModelSchema>) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|field| field.resolve(FieldValue::Null))
            .collect();

        Self {
            schema: Arc::clone(schema),
            values,
        }
    }

    /// Build an instance from supplied values.
    ///
    /// Each declared field takes its supplied value, or null, and then the
    /// field's default-substitution rule. Names the schema does not
    /// declare are rejected.
    #[track_caller]
    pub fn construct<I, K, V>(schema: &Arc<ModelSchema>, values: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        let mut supplied: Vec<FieldValue> = vec![FieldValue::Null; schema.len()];

        for (name, value) in values {
            let name = name.as_ref();
            let index = schema.position(name).ok_or_else(|| ModelError::UnknownField {
                model: schema.name().to_string(),
                field: name.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;
            supplied[index] = value.into();
        }

        let values = schema
            .fields()
            .iter()
            .zip(supplied)
            .map(|(field, value)| field.resolve(value))
            .collect();

        Ok(Self {
            schema: Arc::clone(schema),
            values,
        })
    }

    /// Build an instance from a JSON object, recursing into nested models.
    #[track_caller]
    pub fn from_json(schema: &Arc<ModelSchema>, object: Map<String, Value>) -> Result<Self, ModelError> {
        let mut values = Vec::with_capacity(object.len());
        for (name, raw) in object {
            let field = schema.field(&name).ok_or_else(|| ModelError::UnknownField {
                model: schema.name().to_string(),
                field: name.clone(),
                location: ErrorLocation::from(Location::caller()),
            })?;
            values.push((name, field.value_from_json(raw)?));
        }
        Self::construct(schema, values)
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// Whether this instance is of the given model type.
    pub fn is_instance_of(&self, schema: &Arc<ModelSchema>) -> bool {
        Arc::ptr_eq(&self.schema, schema) || *self.schema == **schema
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.schema.position(name).map(|index| &self.values[index])
    }

    #[track_caller]
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), ModelError> {
        let index = self.index_of(name)?;
        self.values[index] = value.into();
        Ok(())
    }

    /// Set `name` if the schema declares it. Returns whether it did.
    pub fn set_if_declared(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        match self.schema.position(name) {
            Some(index) => {
                self.values[index] = value.into();
                true
            }
            None => false,
        }
    }

    #[track_caller]
    pub fn nested(&self, name: &str) -> Result<&Model, ModelError> {
        let index = self.index_of(name)?;
        match &self.values[index] {
            FieldValue::Model(model) => Ok(model),
            _ => Err(self.not_nested(name)),
        }
    }

    #[track_caller]
    pub fn nested_mut(&mut self, name: &str) -> Result<&mut Model, ModelError> {
        let index = self.index_of(name)?;
        match &mut self.values[index] {
            FieldValue::Model(model) => Ok(model),
            _ => Err(ModelError::NotNested {
                model: self.schema.name().to_string(),
                field: name.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Declarations paired with their bound values, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&Field, &FieldValue)> {
        self.schema.fields().iter().zip(self.values.iter())
    }

    /// Plain ordered key → value tree of this instance.
    pub fn to_dict(&self) -> Map<String, Value> {
        self.fields()
            .map(|(field, value)| (field.name().to_string(), value.to_json_value()))
            .collect()
    }

    #[track_caller]
    pub fn to_json(&self) -> Result<String, ModelError> {
        serde_json::to_string(&self.to_dict()).map_err(|e| ModelError::Serialization {
            message: format!("Failed to serialize {}: {e}", self.name()),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Package this model as a response envelope.
    pub fn respond(&self, status: HttpStatusCode, headers: BTreeMap<String, String>) -> Envelope {
        Envelope::new(status, Value::Object(self.to_dict())).with_headers(headers)
    }

    #[track_caller]
    fn index_of(&self, name: &str) -> Result<usize, ModelError> {
        self.schema.position(name).ok_or_else(|| ModelError::UnknownField {
            model: self.name().to_string(),
            field: name.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn not_nested(&self, name: &str) -> ModelError {
        ModelError::NotNested {
            model: self.name().to_string(),
            field: name.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_dict().serialize(serializer)
    }
}
