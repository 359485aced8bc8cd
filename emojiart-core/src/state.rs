//! Document session state: the façade a UI drives.

use url::Url;

use crate::canvas::{CanvasTransform, Offset, PinchCommit, ViewSize};
use crate::document::EmojiArt;
use crate::emoji::{Emoji, EmojiId};
use crate::error::ArtResult;
use crate::gesture::{TapAction, TapDiscriminator, TapTarget};
use crate::selection::Selection;
use crate::store::{DocumentId, DocumentStore};

/// A decoded background image as published after a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel.
    pub rgba: Vec<u8>,
}

impl BackgroundImage {
    /// Width and height as a pair.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// One open document plus its per-session companions: the selection set,
/// the tap discriminator, the persistence handle, and the published
/// background image.
///
/// Every mutating intent autosaves the document through the store,
/// best-effort — a failed save never interrupts the mutation. All access
/// runs on the single owning thread; the background fetch is the only
/// off-thread collaborator and re-enters through
/// [`publish_background`](Self::publish_background), where a
/// stale-reference guard drops results whose originating reference no
/// longer matches the document.
#[derive(Debug, Clone)]
pub struct DocumentState {
    art: EmojiArt,
    selection: Selection,
    taps: TapDiscriminator,
    store: DocumentStore,
    key: String,
    background_image: Option<BackgroundImage>,
}

impl DocumentState {
    /// Open a document from the store, falling back to an empty one.
    ///
    /// An absent blob means a new document; a corrupt blob is discarded
    /// with a warning. Opening never fails — a document must always come
    /// up usable.
    #[must_use]
    pub fn open(store: DocumentStore, id: DocumentId) -> Self {
        let key = id.storage_key();
        let art = match store.read(&key) {
            Some(bytes) => EmojiArt::from_blob(&bytes).unwrap_or_else(|e| {
                tracing::warn!("discarding corrupt blob for {key}: {e}");
                EmojiArt::new()
            }),
            None => EmojiArt::new(),
        };
        Self {
            art,
            selection: Selection::new(),
            taps: TapDiscriminator::new(),
            store,
            key,
            background_image: None,
        }
    }

    // --- Queries ---

    /// The underlying document.
    #[must_use]
    pub fn art(&self) -> &EmojiArt {
        &self.art
    }

    /// All emoji in paint order.
    #[must_use]
    pub fn emojis(&self) -> &[Emoji] {
        self.art.emojis()
    }

    /// The current background reference, if any.
    #[must_use]
    pub fn background(&self) -> Option<&Url> {
        self.art.background()
    }

    /// The published background image, if a fetch has completed.
    #[must_use]
    pub fn background_image(&self) -> Option<&BackgroundImage> {
        self.background_image.as_ref()
    }

    /// Published background dimensions, ready for zoom-to-fit.
    #[must_use]
    pub fn background_size(&self) -> Option<(u32, u32)> {
        self.background_image.as_ref().map(BackgroundImage::size)
    }

    /// Whether a background reference is set but its image has not been
    /// published yet.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.background_image.is_none() && self.art.background().is_some()
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether any emoji is selected.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    // --- Document intents ---

    /// Add an emoji and autosave.
    ///
    /// # Errors
    ///
    /// Propagates [`ArtError::InvalidEmoji`](crate::ArtError::InvalidEmoji)
    /// for an empty glyph or non-positive size.
    pub fn add_emoji(&mut self, text: &str, x: i32, y: i32, size: i32) -> ArtResult<EmojiId> {
        let id = self.art.add_emoji(text, x, y, size)?;
        self.autosave();
        Ok(id)
    }

    /// Move an emoji by document-space deltas and autosave. A stale id is
    /// a no-op and does not save.
    pub fn move_emoji(&mut self, id: EmojiId, dx: f32, dy: f32) {
        if !self.art.contains(id) {
            tracing::debug!("move ignored, no emoji {id}");
            return;
        }
        self.art.move_emoji(id, dx, dy);
        self.autosave();
    }

    /// Scale an emoji's size and autosave. A stale id is a no-op and does
    /// not save.
    pub fn scale_emoji(&mut self, id: EmojiId, factor: f32) {
        if !self.art.contains(id) {
            tracing::debug!("scale ignored, no emoji {id}");
            return;
        }
        self.art.scale_emoji(id, factor);
        self.autosave();
    }

    /// Clear the emoji list and the selection together, then autosave.
    pub fn reset_emojis(&mut self) {
        self.selection.clear();
        self.art.remove_all();
        self.autosave();
    }

    // --- Selection intents ---

    /// Toggle selection membership for an emoji. Unknown ids are ignored,
    /// which keeps the selection a subset of the document.
    pub fn toggle_selection(&mut self, id: EmojiId) {
        if !self.art.contains(id) {
            tracing::debug!("toggle ignored, no emoji {id}");
            return;
        }
        self.selection.toggle(id);
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    // --- Background ---

    /// Replace the background reference and autosave.
    ///
    /// The published image is dropped immediately; the returned reference
    /// is what the caller should fetch. Any earlier in-flight fetch is
    /// abandoned by the stale guard when it eventually reports back.
    pub fn set_background(&mut self, reference: Option<Url>) -> Option<Url> {
        self.background_image = None;
        self.art.set_background(reference.clone());
        self.autosave();
        reference
    }

    /// Publish a fetched background image.
    ///
    /// Returns `false` and discards the image when `reference` no longer
    /// matches the document's current background — the result of a fetch
    /// that was superseded mid-flight.
    pub fn publish_background(&mut self, reference: &Url, image: BackgroundImage) -> bool {
        if self.art.background() == Some(reference) {
            self.background_image = Some(image);
            true
        } else {
            tracing::debug!("discarding stale background fetch for {reference}");
            false
        }
    }

    /// Record a failed background fetch. The image stays unset; the
    /// document remains fully usable.
    pub fn background_fetch_failed(&mut self, reference: &Url) {
        tracing::warn!("background fetch failed for {reference}");
    }

    // --- Gesture commits ---

    /// Commit a finished canvas pan.
    pub fn end_pan(&self, translation: Offset, canvas: &mut CanvasTransform) {
        canvas.pan_ended(translation, self.has_selection());
    }

    /// Commit a finished pinch: canvas zoom without a selection, a
    /// per-emoji scale of every selected emoji with one.
    pub fn end_pinch(&mut self, factor: f32, canvas: &mut CanvasTransform) {
        match canvas.pinch_ended(factor, self.has_selection()) {
            PinchCommit::Canvas => {}
            PinchCommit::ScaleSelection(factor) => {
                let ids: Vec<EmojiId> = self.selection.iter().collect();
                for id in ids {
                    self.art.scale_emoji(id, factor);
                }
                self.autosave();
            }
        }
    }

    /// Commit a finished group move of the selected emoji.
    pub fn end_selection_drag(&mut self, translation: Offset, canvas: &mut CanvasTransform) {
        let delta = canvas.selection_drag_ended(translation);
        let ids: Vec<EmojiId> = self.selection.iter().collect();
        if ids.is_empty() {
            return;
        }
        for id in ids {
            self.art.move_emoji(id, delta.x, delta.y);
        }
        self.autosave();
    }

    /// Commit a finished drag of one unselected emoji. The selection is
    /// untouched.
    pub fn end_emoji_drag(&mut self, id: EmojiId, translation: Offset, canvas: &mut CanvasTransform) {
        let delta = canvas.emoji_drag_ended(translation, self.has_selection());
        self.move_emoji(id, delta.x, delta.y);
    }

    // --- Taps ---

    /// Feed one tap through the discriminator and apply whatever it
    /// resolves to: toggle for emoji taps, zoom-to-fit for background
    /// double taps.
    pub fn tap(
        &mut self,
        target: TapTarget,
        at_ms: u64,
        canvas: &mut CanvasTransform,
        view: ViewSize,
    ) {
        if let Some(action) = self.taps.tap(target, at_ms) {
            self.apply_tap(action, canvas, view);
        }
    }

    /// Resolve a lapsed single background tap (deselect), if one is due.
    pub fn flush_taps(&mut self, now_ms: u64, canvas: &mut CanvasTransform, view: ViewSize) {
        if let Some(action) = self.taps.flush(now_ms) {
            self.apply_tap(action, canvas, view);
        }
    }

    fn apply_tap(&mut self, action: TapAction, canvas: &mut CanvasTransform, view: ViewSize) {
        match action {
            TapAction::ZoomToFit => canvas.zoom_to_fit(self.background_size(), view),
            TapAction::DeselectAll => self.deselect_all(),
            TapAction::ToggleSelection(id) => self.toggle_selection(id),
        }
    }

    fn autosave(&self) {
        match self.art.to_blob() {
            Ok(bytes) => self.store.write(&self.key, bytes),
            Err(e) => tracing::warn!("failed to encode document {}: {e}", self.key),
        }
    }
}
