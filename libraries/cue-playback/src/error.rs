//! Error types for playback management
//!
//! The engine itself never fails: anomalies are absorbed into state.
//! These errors come from the surfaces around it (document loading, the
//! browser host).

use cue_document::DocumentError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Document could not be loaded
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Host platform error
    #[error("Host error: {0}")]
    Host(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
