//! # EmojiArt Core
//!
//! Document model and canvas transform state for emoji-art compositions:
//! emoji glyphs placed over an optional background image, with pan/zoom,
//! multi-selection, and blob persistence.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               emojiart-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Document Model   │  Canvas Transform       │
//! │  - Placed emoji   │  - Steady pan/zoom      │
//! │  - Background ref │  - Live gesture deltas  │
//! │  - Blob codec     │  - Screen projection    │
//! ├─────────────────────────────────────────────┤
//! │  Session State    │  Persistence            │
//! │  - Selection set  │  - Key-value store      │
//! │  - Tap dispatch   │  - Autosave on mutation │
//! │  - Fetch guard    │  - Corrupt-blob fallback│
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The document is the single source of truth; transform state is derived,
//! per viewing session, and never persisted. All mutation happens on one
//! owning thread — the only asynchronous collaborator is the background
//! image fetch, which re-enters through
//! [`DocumentState::publish_background`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod document;
pub mod emoji;
pub mod error;
pub mod gesture;
pub mod palette;
pub mod schema;
pub mod selection;
pub mod state;
pub mod store;

pub use canvas::{
    BackgroundPlacement, CanvasTransform, Offset, PinchCommit, ProjectedEmoji, ViewSize,
};
pub use document::EmojiArt;
pub use emoji::{Emoji, EmojiId, DEFAULT_EMOJI_SIZE};
pub use error::{ArtError, ArtResult};
pub use gesture::{TapAction, TapDiscriminator, TapTarget, DOUBLE_TAP_WINDOW_MS};
pub use palette::Palettes;
pub use schema::DocumentBlob;
pub use selection::Selection;
pub use state::{BackgroundImage, DocumentState};
pub use store::{DocumentId, DocumentStore};

pub use url::Url;

/// Core crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
