//! Decoding fetched bytes into a publishable background image.

use base64::Engine;
use emojiart_core::BackgroundImage;

use crate::error::{FetchError, FetchResult};

/// Decode raw image bytes into RGBA pixel data.
///
/// The container format (PNG, JPEG, WebP, ...) is sniffed from the bytes.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] if the bytes are not a decodable image.
pub fn decode_image(data: &[u8]) -> FetchResult<BackgroundImage> {
    let img = image::load_from_memory(data)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(BackgroundImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// Decode an image embedded in a `data:` URI.
///
/// Supports base64 payloads (`data:image/png;base64,...`) and
/// percent-encoded ones.
///
/// # Errors
///
/// Returns [`FetchError::DataUri`] for a malformed URI and
/// [`FetchError::Decode`] if the payload is not an image.
pub fn decode_data_uri(uri: &str) -> FetchResult<BackgroundImage> {
    let Some(uri_data) = uri.strip_prefix("data:") else {
        return Err(FetchError::DataUri("missing data: prefix".into()));
    };

    let comma = uri_data
        .find(',')
        .ok_or_else(|| FetchError::DataUri("missing comma".into()))?;
    let metadata = &uri_data[..comma];
    let payload = &uri_data[comma + 1..];

    let bytes = if metadata.contains(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| FetchError::DataUri(format!("bad base64 payload: {e}")))?
    } else {
        percent_decode(payload)?
    };

    decode_image(&bytes)
}

/// Decode a percent-encoded payload to raw bytes.
#[allow(clippy::cast_possible_truncation)]
fn percent_decode(input: &str) -> FetchResult<Vec<u8>> {
    let mut result = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2 {
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    result.push(byte);
                    continue;
                }
            }
            return Err(FetchError::DataUri("bad percent encoding".into()));
        }
        result.push(c as u8);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    // A minimal valid PNG: one red pixel.
    const PNG_1X1_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

    fn png_bytes() -> Vec<u8> {
        base64::engine::general_purpose::STANDARD
            .decode(PNG_1X1_B64)
            .expect("valid base64")
    }

    #[test]
    fn test_decode_png_bytes() {
        let image = decode_image(&png_bytes()).expect("decode");
        assert_eq!((image.width, image.height), (1, 1));
        assert_eq!(image.rgba.len(), 4);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            decode_image(b"not an image"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_data_uri_base64() {
        let uri = format!("data:image/png;base64,{PNG_1X1_B64}");
        let image = decode_data_uri(&uri).expect("decode");
        assert_eq!((image.width, image.height), (1, 1));
    }

    #[test]
    fn test_decode_data_uri_malformed() {
        assert!(matches!(
            decode_data_uri("not a data uri"),
            Err(FetchError::DataUri(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/png;base64"),
            Err(FetchError::DataUri(_))
        ));
    }
}
