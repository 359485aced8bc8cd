//! Error types for document operations.

use thiserror::Error;

/// Result type for document operations.
pub type ArtResult<T> = Result<T, ArtError>;

/// Errors that can occur in document operations.
///
/// A stale emoji id is deliberately *not* represented here: move, scale,
/// and selection toggles absorb a missing id as a no-op, so a gesture
/// whose target was removed mid-flight never fails.
#[derive(Debug, Error)]
pub enum ArtError {
    /// Persisted blob could not be parsed.
    #[error("malformed document blob: {0}")]
    Decode(#[from] serde_json::Error),

    /// Blob parsed but violates a document invariant.
    #[error("invalid document blob: {0}")]
    InvalidBlob(String),

    /// Rejected emoji parameters.
    #[error("invalid emoji: {0}")]
    InvalidEmoji(String),

    /// An I/O error from the persistence layer.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
