//! Error types for cinematic persistence (thiserror-based).

use camline_timeline::WireError;
use thiserror::Error;

/// Errors from blob storage and the cinematic library.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No cinematic saved under the requested id.
    #[error("no cinematic saved with id '{id}'")]
    NotFound { id: String },

    /// Persisted JSON failed to parse or violated the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed JSON carried values outside the wire format.
    #[error("malformed cinematic data: {0}")]
    Wire(#[from] WireError),

    /// Underlying storage I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
