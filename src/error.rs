//! Error types and handling
//!
//! Common error types used across the crate.

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("capture binary not found: \"{0}\"")]
    BinaryNotFound(String),

    #[error("capture binary failed validation: {0}")]
    BinaryValidationFailed(String),

    #[error("no recording process is running")]
    ProcessNotRunning,

    #[error("a recording is already in progress")]
    AlreadyRecording,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using RecorderError
pub type RecorderResult<T> = Result<T, RecorderError>;
