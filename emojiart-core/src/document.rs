//! The emoji-art document: ordered glyphs over an optional background.

use url::Url;

use crate::emoji::{Emoji, EmojiId};
use crate::error::{ArtError, ArtResult};
use crate::schema::DocumentBlob;

/// An emoji-art composition.
///
/// Owns the ordered emoji list (insertion order is paint order, later
/// entries draw on top) and the optional background reference. This is
/// the single source of truth for a document; transform state lives in
/// [`CanvasTransform`](crate::CanvasTransform) and is never persisted.
///
/// Every id the document hands out is unique for its lifetime, so stale
/// ids from finished gestures can be absorbed safely: `move_emoji` and
/// `scale_emoji` are silent no-ops when the target is gone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmojiArt {
    background: Option<Url>,
    emojis: Vec<Emoji>,
    id_counter: u32,
}

impl EmojiArt {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(background: Option<Url>, emojis: Vec<Emoji>) -> Self {
        let id_counter = emojis.iter().map(|e| e.id.value()).max().unwrap_or(0);
        Self { background, emojis, id_counter }
    }

    /// Append a new emoji and return its freshly allocated id.
    ///
    /// # Errors
    ///
    /// Rejects an empty (or whitespace-only) glyph and a non-positive
    /// size with [`ArtError::InvalidEmoji`].
    pub fn add_emoji(&mut self, text: &str, x: i32, y: i32, size: i32) -> ArtResult<EmojiId> {
        if text.trim().is_empty() {
            return Err(ArtError::InvalidEmoji("glyph text is empty".into()));
        }
        if size <= 0 {
            return Err(ArtError::InvalidEmoji(format!(
                "size must be positive, got {size}"
            )));
        }
        self.id_counter += 1;
        let id = EmojiId(self.id_counter);
        self.emojis.push(Emoji::new(text.to_owned(), x, y, size, id));
        Ok(id)
    }

    /// Remove every emoji. Already-allocated ids are not reused afterwards.
    pub fn remove_all(&mut self) {
        self.emojis.clear();
    }

    /// Shift an emoji by the given deltas.
    ///
    /// Fractional deltas truncate toward zero (sizes, by contrast, round
    /// half-to-even in [`scale_emoji`](Self::scale_emoji)). A stale id is
    /// a silent no-op.
    #[allow(clippy::cast_possible_truncation)]
    pub fn move_emoji(&mut self, id: EmojiId, dx: f32, dy: f32) {
        let Some(emoji) = self.emojis.iter_mut().find(|e| e.id == id) else {
            tracing::debug!("move ignored, no emoji {id}");
            return;
        };
        emoji.x += dx as i32;
        emoji.y += dy as i32;
    }

    /// Multiply an emoji's size by `factor`, rounding half-to-even and
    /// clamping to a minimum of 1. A stale id is a silent no-op.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn scale_emoji(&mut self, id: EmojiId, factor: f32) {
        let Some(emoji) = self.emojis.iter_mut().find(|e| e.id == id) else {
            tracing::debug!("scale ignored, no emoji {id}");
            return;
        };
        emoji.size = ((emoji.size as f32 * factor).round_ties_even() as i32).max(1);
    }

    /// Replace the background reference.
    pub fn set_background(&mut self, reference: Option<Url>) {
        self.background = reference;
    }

    /// The current background reference, if any.
    #[must_use]
    pub fn background(&self) -> Option<&Url> {
        self.background.as_ref()
    }

    /// Look up an emoji by id.
    #[must_use]
    pub fn emoji(&self, id: EmojiId) -> Option<&Emoji> {
        self.emojis.iter().find(|e| e.id == id)
    }

    /// Whether an emoji with this id is present.
    #[must_use]
    pub fn contains(&self, id: EmojiId) -> bool {
        self.emojis.iter().any(|e| e.id == id)
    }

    /// All emoji in paint order.
    #[must_use]
    pub fn emojis(&self) -> &[Emoji] {
        &self.emojis
    }

    /// Number of emoji in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    /// Returns `true` if the document holds no emoji.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }

    /// Encode the composition as a stable, self-describing blob.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::Decode`] if serialization fails.
    pub fn to_blob(&self) -> ArtResult<Vec<u8>> {
        DocumentBlob::from_art(self).to_bytes()
    }

    /// Decode a composition from a blob produced by [`to_blob`](Self::to_blob).
    ///
    /// The id counter is re-derived from the highest id present, so ids
    /// allocated after a round-trip stay unique.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::Decode`] on malformed input and
    /// [`ArtError::InvalidBlob`] if the blob violates a document
    /// invariant (duplicate ids, non-positive size, empty glyph).
    pub fn from_blob(bytes: &[u8]) -> ArtResult<Self> {
        DocumentBlob::from_bytes(bytes)?.into_art()
    }
}
