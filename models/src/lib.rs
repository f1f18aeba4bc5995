//! Typed envelope models.
//!
//! A [`ModelSchema`] is an ordered list of [`Field`] declarations, fixed
//! when the schema is built. A [`Model`] is an instance bound to one
//! schema, holding exactly one [`FieldValue`] per declared field, so the
//! keys of [`Model::to_dict`] always equal the declared field names.
//!
//! Models carry no resolution logic - they're just the payload shapes
//! that `resolver-core` fills in and the host framework writes out as
//! an [`Envelope`].

pub mod envelope;
pub mod error;
pub mod field;
pub mod model;
pub mod schema;
pub mod standard;

#[cfg(test)]
mod tests;

pub use envelope::Envelope;
pub use error::model_error::ModelError;
pub use field::value::FieldValue;
pub use field::{Field, FieldKind};
pub use model::Model;
pub use schema::builder::ModelSchemaBuilder;
pub use schema::registry::SchemaRegistry;
pub use schema::ModelSchema;
