use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown Field Error: {model} has no field '{field}' {location}")]
    UnknownField {
        model: String,
        field: String,
        location: ErrorLocation,
    },

    #[error("Not Nested Error: {model}.{field} is not bound to a nested model {location}")]
    NotNested {
        model: String,
        field: String,
        location: ErrorLocation,
    },

    #[error("Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
