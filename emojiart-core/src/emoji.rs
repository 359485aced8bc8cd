//! Placed emoji - the glyphs that make up a composition.

use serde::{Deserialize, Serialize};

/// Nominal font size for a freshly dropped emoji.
pub const DEFAULT_EMOJI_SIZE: i32 = 40;

/// Unique identifier for an emoji within one document.
///
/// Ids are allocated by the owning [`EmojiArt`](crate::EmojiArt) from a
/// monotonically increasing counter and never reused for the lifetime of
/// the document. Lookup and selection membership are identity-based: two
/// emoji with the same glyph, position, and size are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmojiId(pub(crate) u32);

impl EmojiId {
    /// The raw integer value.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EmojiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A placed emoji: an immutable glyph with a mutable placement.
///
/// Positions are in document space, origin at the document center, and
/// `size` is the nominal font size, kept `>= 1` by every mutation path.
/// Placement changes flow through [`EmojiArt`](crate::EmojiArt); the
/// glyph and the id are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emoji {
    pub(crate) text: String,
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) size: i32,
    pub(crate) id: EmojiId,
}

impl Emoji {
    pub(crate) fn new(text: String, x: i32, y: i32, size: i32, id: EmojiId) -> Self {
        Self { text, x, y, size, id }
    }

    /// The glyph content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Horizontal position in document space.
    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Vertical position in document space.
    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Nominal font size.
    #[must_use]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Identity within the owning document.
    #[must_use]
    pub fn id(&self) -> EmojiId {
        self.id
    }

    /// Nominal font size as a projection-ready float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn font_size(&self) -> f32 {
        self.size as f32
    }
}
