//! Cue Player - Playlist Documents
//!
//! The authored side of a playlist:
//! - Document model with schema defaults (title, autoplay, loop, media list)
//! - Lenient time parsing for trim points (`ss`, `mm:ss`, `hh:mm:ss`)
//! - Structural validation reporting `{path, message}` errors
//! - Storage key resolution and a key-value store seam
//!
//! # Example
//!
//! ```rust
//! use cue_document::{DocumentRepository, MemoryStore, PlaylistDocument, storage_key};
//!
//! let doc = PlaylistDocument::from_json(r#"{
//!     "title": "Lobby",
//!     "loop": 0,
//!     "media": [{"type": "image", "url": "welcome.png", "title": "Welcome", "duration": 5}]
//! }"#).unwrap();
//!
//! let key = storage_key("?id=lobby");
//! let mut repo = DocumentRepository::new(MemoryStore::new());
//! repo.save(&key, &doc).unwrap();
//!
//! assert_eq!(repo.load(&key).unwrap(), Some(doc));
//! ```

mod error;
mod storage;
mod time;
mod types;
mod validate;

pub use error::{DocumentError, Result, ValidationError};
pub use storage::{
    is_editor_mode, storage_key, DocumentRepository, KeyValueStore, MemoryStore,
    DEFAULT_STORAGE_KEY,
};
pub use time::{parse_time, try_parse_time};
pub use types::{MediaItem, MediaKind, OnStop, PlaylistDocument, Repeat, MAX_SPEED, MIN_SPEED};
pub use validate::validate;
