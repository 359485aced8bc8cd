//! # EmojiArt Loader
//!
//! The one asynchronous collaborator of the document core: fetching a
//! background image by reference and decoding it for publication.
//!
//! A fetch runs off the document's owning thread and re-enters through
//! [`DocumentState::publish_background`](emojiart_core::DocumentState::publish_background),
//! whose stale-reference guard discards results that were superseded
//! mid-flight. Fetch failures are absorbed — the background stays unset
//! and the document remains fully usable.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod error;
pub mod fetch;

pub use decode::{decode_data_uri, decode_image};
pub use error::{FetchError, FetchResult};
pub use fetch::{load_background, refresh_background};

/// Loader crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
