//! Error types for MovaType.

use thiserror::Error;

/// Main error type for MovaType operations.
#[derive(Error, Debug)]
pub enum MovaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decoder error: {0}")]
    Decoder(String),

    #[error("Encoder error: {0}")]
    Encoder(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for MovaType operations.
pub type Result<T> = std::result::Result<T, MovaError>;
