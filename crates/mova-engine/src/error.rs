//! Error types for the segmentation engine.

use thiserror::Error;

/// Errors that can occur while transcribing or segmenting.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The transcription backend cannot be loaded or reached.
    /// Fatal to the current job; no clip is written.
    #[error("Transcription model unavailable: {0}")]
    ModelUnavailable(String),

    /// The transcription sidecar ran but failed.
    #[error("Transcription failed: {0}")]
    Transcribe(String),

    /// The source file could not be decoded.
    #[error("Source decode failed: {0}")]
    Decode(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<mova_core::MovaError> for EngineError {
    fn from(err: mova_core::MovaError) -> Self {
        match err {
            mova_core::MovaError::Io(e) => EngineError::Io(e),
            other => EngineError::Decode(other.to_string()),
        }
    }
}

/// Result type alias for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
