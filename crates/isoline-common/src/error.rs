//! Error types for isoline extraction and its collaborators.

use thiserror::Error;

/// Result type alias using IsolineError.
pub type IsolineResult<T> = Result<T, IsolineError>;

/// Primary error type for the workspace.
///
/// Degenerate grids and out-of-range reads are deliberately absent: the
/// former produce an empty result, the latter panic.
#[derive(Debug, Error)]
pub enum IsolineError {
    // === Grid Errors ===
    #[error("Sample count {actual} does not match {width}x{height} grid (expected {expected})")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),

    // === Collaborator Errors ===
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for IsolineError {
    fn from(err: std::io::Error) -> Self {
        IsolineError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for IsolineError {
    fn from(err: serde_json::Error) -> Self {
        IsolineError::Serialization(format!("JSON error: {}", err))
    }
}
