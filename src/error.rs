use std::io;

/// All error types for the eye model builder.
#[derive(thiserror::Error, Debug)]
pub enum EyeModelError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
    #[error("Degenerate geometry: {0}")]
    GeometryDegenerate(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EyeModelError>;
