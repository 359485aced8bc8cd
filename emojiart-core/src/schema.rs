//! Canonical serialized representation of a composition.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::document::EmojiArt;
use crate::emoji::{Emoji, EmojiId};
use crate::error::{ArtError, ArtResult};

/// Wire form of a placed emoji.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobEmoji {
    /// Glyph content.
    pub text: String,
    /// Horizontal position in document space.
    pub x: i32,
    /// Vertical position in document space.
    pub y: i32,
    /// Nominal font size.
    pub size: i32,
    /// Identity within the document.
    pub id: u32,
}

impl From<&Emoji> for BlobEmoji {
    fn from(emoji: &Emoji) -> Self {
        Self {
            text: emoji.text().to_owned(),
            x: emoji.x(),
            y: emoji.y(),
            size: emoji.size(),
            id: emoji.id().value(),
        }
    }
}

/// Canonical document blob: background reference plus emoji in paint
/// order, as JSON.
///
/// The id counter is not part of the blob; decoding re-derives it from
/// the highest id present, so ids stay unique after a round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentBlob {
    /// Background image reference, if any.
    #[serde(default)]
    pub background: Option<Url>,
    /// Emoji in paint order.
    pub emojis: Vec<BlobEmoji>,
}

impl DocumentBlob {
    /// Build a blob from a runtime document.
    #[must_use]
    pub fn from_art(art: &EmojiArt) -> Self {
        Self {
            background: art.background().cloned(),
            emojis: art.emojis().iter().map(BlobEmoji::from).collect(),
        }
    }

    /// Rebuild the runtime document.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::InvalidBlob`] if two entries share an id, a
    /// size is not positive, or a glyph is empty.
    pub fn into_art(self) -> ArtResult<EmojiArt> {
        let mut seen = HashSet::with_capacity(self.emojis.len());
        let mut emojis = Vec::with_capacity(self.emojis.len());
        for entry in self.emojis {
            if !seen.insert(entry.id) {
                return Err(ArtError::InvalidBlob(format!(
                    "duplicate emoji id {}",
                    entry.id
                )));
            }
            if entry.size <= 0 {
                return Err(ArtError::InvalidBlob(format!(
                    "emoji {} has non-positive size {}",
                    entry.id, entry.size
                )));
            }
            if entry.text.trim().is_empty() {
                return Err(ArtError::InvalidBlob(format!(
                    "emoji {} has an empty glyph",
                    entry.id
                )));
            }
            emojis.push(Emoji::new(
                entry.text,
                entry.x,
                entry.y,
                entry.size,
                EmojiId(entry.id),
            ));
        }
        Ok(EmojiArt::from_parts(self.background, emojis))
    }

    /// Serialize to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::Decode`] if serialization fails.
    pub fn to_bytes(&self) -> ArtResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::Decode`] on malformed input.
    pub fn from_bytes(bytes: &[u8]) -> ArtResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
