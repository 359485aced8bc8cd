//! Fetch-by-reference for background images.

use emojiart_core::{BackgroundImage, DocumentState};
use reqwest::Client;
use url::Url;

use crate::decode::{decode_data_uri, decode_image};
use crate::error::{FetchError, FetchResult};

/// Fetch and decode the image a reference points at.
///
/// Dispatches on the reference scheme: `http`/`https` through the shared
/// client, `file` through the local filesystem, `data` straight from the
/// URI payload.
///
/// # Errors
///
/// Returns a [`FetchError`] when the bytes cannot be fetched or decoded,
/// or the scheme has no fetch strategy. Callers absorb the error at the
/// document boundary; it never propagates past the session.
pub async fn load_background(client: &Client, reference: &Url) -> FetchResult<BackgroundImage> {
    match reference.scheme() {
        "http" | "https" => {
            let response = client
                .get(reference.clone())
                .send()
                .await?
                .error_for_status()?;
            let bytes = response.bytes().await?;
            decode_image(&bytes)
        }
        "file" => {
            let path = reference.to_file_path().map_err(|()| {
                FetchError::InvalidReference(format!("{reference} has no local path"))
            })?;
            let bytes = tokio::fs::read(path).await?;
            decode_image(&bytes)
        }
        "data" => decode_data_uri(reference.as_str()),
        other => Err(FetchError::UnsupportedScheme(other.to_owned())),
    }
}

/// Run one background fetch cycle for a document session.
///
/// Snapshots the current reference, fetches and decodes away from the
/// document, then publishes through the session's stale-reference guard.
/// Returns `true` only if an image was published. A failed fetch is
/// absorbed: the background image stays unset, a warning is logged, and
/// the document remains fully usable.
pub async fn refresh_background(state: &mut DocumentState, client: &Client) -> bool {
    let Some(reference) = state.background().cloned() else {
        return false;
    };
    match load_background(client, &reference).await {
        Ok(image) => state.publish_background(&reference, image),
        Err(e) => {
            tracing::warn!("background fetch for {reference} failed: {e}");
            state.background_fetch_failed(&reference);
            false
        }
    }
}
