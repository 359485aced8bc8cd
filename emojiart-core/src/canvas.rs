//! Canvas transform state: pan/zoom with steady and in-flight phases.
//!
//! Every interaction is modeled as a committed steady value plus an
//! optional live delta that exists only while its gesture is active.
//! Queries merge the two, so an in-flight gesture previews on screen
//! without touching committed state until it ends.

use serde::{Deserialize, Serialize};

use crate::emoji::{Emoji, EmojiId};
use crate::selection::Selection;

/// A 2D offset in screen points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Offset {
    /// The zero offset.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create an offset from components.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Multiply both components by a scalar.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }
}

impl std::ops::Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::AddAssign for Offset {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// Viewport dimensions in screen points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSize {
    /// Width in points.
    pub width: f32,
    /// Height in points.
    pub height: f32,
}

impl ViewSize {
    /// Create a view size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Where and how large an emoji appears on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedEmoji {
    /// Horizontal screen position of the glyph center.
    pub x: f32,
    /// Vertical screen position of the glyph center.
    pub y: f32,
    /// Font size after zoom and any live pinch preview.
    pub font_size: f32,
}

/// Scale and offset to apply to the background image, anchored at the
/// view center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundPlacement {
    /// Uniform scale factor.
    pub scale: f32,
    /// Offset from the centered position, in screen points.
    pub offset: Offset,
}

/// Outcome of committing a pinch gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchCommit {
    /// No selection existed: the canvas zoom absorbed the factor.
    Canvas,
    /// A selection existed: apply the factor to every selected emoji;
    /// steady zoom was left untouched.
    ScaleSelection(f32),
}

/// Pan/zoom state for one viewing session.
///
/// `steady_pan` is stored in zoom-1.0 units and scaled up at projection
/// time, so committed pans are resolution-independent. Nothing here is
/// persisted; a session starts at defaults or from
/// [`zoom_to_fit`](Self::zoom_to_fit) when a background image arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasTransform {
    steady_zoom: f32,
    steady_pan: Offset,
    live_zoom: Option<f32>,
    live_pan: Option<Offset>,
    live_selection_drag: Option<Offset>,
    live_emoji_drag: Option<(EmojiId, Offset)>,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            steady_zoom: 1.0,
            steady_pan: Offset::ZERO,
            live_zoom: None,
            live_pan: None,
            live_selection_drag: None,
            live_emoji_drag: None,
        }
    }
}

impl CanvasTransform {
    /// Create a transform at defaults (zoom 1.0, no pan).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed zoom scale.
    #[must_use]
    pub fn steady_zoom(&self) -> f32 {
        self.steady_zoom
    }

    /// The committed pan offset, in zoom-1.0 units.
    #[must_use]
    pub fn steady_pan(&self) -> Offset {
        self.steady_pan
    }

    /// Zoom used for projection.
    ///
    /// While a selection exists, a live pinch previews the selected emoji
    /// instead of the canvas, so only the steady value applies.
    #[must_use]
    pub fn effective_zoom(&self, has_selection: bool) -> f32 {
        if has_selection {
            self.steady_zoom
        } else {
            self.steady_zoom * self.live_zoom.unwrap_or(1.0)
        }
    }

    /// Pan used for projection: steady plus live delta, scaled up by the
    /// effective zoom.
    #[must_use]
    pub fn effective_pan(&self, has_selection: bool) -> Offset {
        (self.steady_pan + self.live_pan.unwrap_or(Offset::ZERO))
            .scaled(self.effective_zoom(has_selection))
    }

    /// Scale and offset to apply to the background image.
    #[must_use]
    pub fn project_background(&self, has_selection: bool) -> BackgroundPlacement {
        BackgroundPlacement {
            scale: self.effective_zoom(has_selection),
            offset: self.effective_pan(has_selection),
        }
    }

    /// Screen position and font size for one emoji.
    ///
    /// Selected emoji carry the live group-move delta and preview the
    /// live pinch factor in their font size; the one emoji targeted by a
    /// live single drag carries that delta instead.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn project_emoji(
        &self,
        emoji: &Emoji,
        selection: &Selection,
        view: ViewSize,
    ) -> ProjectedEmoji {
        let has_selection = !selection.is_empty();
        let selected = selection.contains(emoji.id());
        let zoom = self.effective_zoom(has_selection);
        let pan = self.effective_pan(has_selection);

        let mut x = emoji.x() as f32 * zoom + view.width / 2.0 + pan.x;
        let mut y = emoji.y() as f32 * zoom + view.height / 2.0 + pan.y;
        if selected {
            if let Some(delta) = self.live_selection_drag {
                x += delta.x * zoom;
                y += delta.y * zoom;
            }
        } else if let Some((target, delta)) = self.live_emoji_drag {
            if target == emoji.id() {
                x += delta.x * zoom;
                y += delta.y * zoom;
            }
        }

        let mut font_size = emoji.font_size() * zoom;
        if selected {
            if let Some(factor) = self.live_zoom {
                font_size *= factor;
            }
        }

        ProjectedEmoji { x, y, font_size }
    }

    /// Reset the pan and fit the background image inside the view.
    ///
    /// The pan always resets; the zoom only changes when every dimension
    /// is positive, so an absent or degenerate image cannot divide by
    /// zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn zoom_to_fit(&mut self, image: Option<(u32, u32)>, view: ViewSize) {
        self.steady_pan = Offset::ZERO;
        let Some((width, height)) = image else { return };
        if width == 0 || height == 0 || view.width <= 0.0 || view.height <= 0.0 {
            return;
        }
        let h_zoom = view.width / width as f32;
        let v_zoom = view.height / height as f32;
        self.steady_zoom = h_zoom.min(v_zoom);
    }

    // --- Gesture phases ---

    /// Track an in-flight canvas pan.
    pub fn pan_changed(&mut self, translation: Offset, has_selection: bool) {
        let zoom = self.effective_zoom(has_selection);
        self.live_pan = Some(translation.scaled(1.0 / zoom));
    }

    /// Commit a finished canvas pan into the steady offset.
    pub fn pan_ended(&mut self, translation: Offset, has_selection: bool) {
        let zoom = self.effective_zoom(has_selection);
        self.live_pan = None;
        self.steady_pan += translation.scaled(1.0 / zoom);
    }

    /// Track an in-flight pinch factor.
    pub fn pinch_changed(&mut self, factor: f32) {
        self.live_zoom = Some(factor);
    }

    /// Commit a finished pinch.
    ///
    /// Without a selection the steady zoom multiplies by the factor; with
    /// one, the factor is handed back for per-emoji scaling and the
    /// steady zoom is left untouched.
    pub fn pinch_ended(&mut self, factor: f32, has_selection: bool) -> PinchCommit {
        self.live_zoom = None;
        if has_selection {
            PinchCommit::ScaleSelection(factor)
        } else {
            self.steady_zoom *= factor;
            PinchCommit::Canvas
        }
    }

    /// Track an in-flight group move of the selected emoji.
    pub fn selection_drag_changed(&mut self, translation: Offset) {
        let zoom = self.effective_zoom(true);
        self.live_selection_drag = Some(translation.scaled(1.0 / zoom));
    }

    /// Finish a group move, returning the document-space delta to apply
    /// to every selected emoji.
    pub fn selection_drag_ended(&mut self, translation: Offset) -> Offset {
        self.live_selection_drag = None;
        translation.scaled(1.0 / self.effective_zoom(true))
    }

    /// Track an in-flight drag of one unselected emoji.
    pub fn emoji_drag_changed(&mut self, id: EmojiId, translation: Offset, has_selection: bool) {
        let zoom = self.effective_zoom(has_selection);
        self.live_emoji_drag = Some((id, translation.scaled(1.0 / zoom)));
    }

    /// Finish a single-emoji drag, returning the document-space delta for
    /// the dragged emoji.
    pub fn emoji_drag_ended(&mut self, translation: Offset, has_selection: bool) -> Offset {
        self.live_emoji_drag = None;
        translation.scaled(1.0 / self.effective_zoom(has_selection))
    }
}
