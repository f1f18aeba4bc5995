//! Shared leaf types for the envelope workspace.
//!
//! Everything here is dependency-light and used by every other crate:
//! source-location tracking for errors, HTTP status classification, and
//! the naming rule that turns an exception kind into a handler token.
//!
//! ## Architecture
//!
//! - **common** (this crate): Leaf types with no business logic
//! - **models**: Field / Model declaration engine
//! - **resolver-core**: Exception resolution operating on models
//! - **envelope-demo**: Application wiring everything together

pub mod error;
pub mod http_status;
pub mod naming;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use http_status::HttpStatusCode;
pub use naming::handler_token;
