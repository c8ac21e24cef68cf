//! Error types for flyview.

use thiserror::Error;

/// The main error type for flyview operations.
///
/// Lookups on unknown timer ids are not errors; they report `false`, `0` or
/// [`TimerId::NONE`](crate::TimerId::NONE) instead.
#[derive(Error, Debug)]
pub enum InteractorError {
    /// The platform refused to allocate a native timer, or timer ids ran out.
    #[error("could not create a {kind} timer of {duration_ms} ms")]
    TimerCreationFailed {
        kind: crate::TimerKind,
        duration_ms: u64,
    },

    /// A flight was requested with zero frames.
    #[error("flight frame count must be at least 1")]
    InvalidFrameCount,

    /// A renderer index did not name a registered renderer.
    #[error("renderer {0} not found")]
    RendererNotFound(usize),

    /// An option value is out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for flyview operations.
pub type Result<T> = std::result::Result<T, InteractorError>;
