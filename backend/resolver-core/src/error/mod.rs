pub mod config;
pub mod resolution;
pub mod sink;

pub use config::ConfigError;
pub use resolution::ResolutionError;
pub use sink::SinkError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Resolution(#[from] resolution::ResolutionError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Sink(#[from] sink::SinkError),

    #[error(transparent)]
    Model(#[from] models::ModelError),
}
