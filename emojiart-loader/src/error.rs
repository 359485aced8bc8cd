//! Error types for background loading.

use thiserror::Error;

/// Result type for background loading.
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors that can occur while fetching or decoding a background image.
///
/// None of these are fatal to a document: the session absorbs a failed
/// fetch by leaving the background image unset.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed or returned a non-success status.
    #[error("http fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Local file read failed.
    #[error("file read failed: {0}")]
    Io(#[from] std::io::Error),

    /// Fetched bytes could not be decoded as an image.
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// Malformed `data:` URI.
    #[error("invalid data URI: {0}")]
    DataUri(String),

    /// The reference does not point at anything fetchable.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// The reference scheme has no fetch strategy.
    #[error("unsupported reference scheme: {0}")]
    UnsupportedScheme(String),
}
