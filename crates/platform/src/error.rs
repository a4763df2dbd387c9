//! Error types for the platform layer

use pegstone_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Unknown project: {0}")]
    ProjectNotFound(usize),
}

impl From<std::io::Error> for PlatformError {
    fn from(err: std::io::Error) -> Self {
        PlatformError::Io(err.to_string())
    }
}

/// Result type using platform errors
pub type PlatformResult<T> = Result<T, PlatformError>;
