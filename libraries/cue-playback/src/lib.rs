//! Cue Player - Playlist Playback
//!
//! Platform-agnostic playback engine for authored playlists.
//!
//! This crate provides:
//! - Sequential playback of video, audio and image items
//! - Per-item trimming (start/end offsets) and playback rate
//! - Per-item loops and whole-playlist loops (finite or infinite)
//! - End-of-playlist policy (restart, stop, navigate back)
//! - Click-to-toggle when native controls are hidden
//! - Pause/resume on page visibility changes
//!
//! # Architecture
//!
//! `cue-playback` never touches the DOM directly. The page is reached
//! through the [`MediaHost`] trait, and lifecycle callbacks come back as
//! [`MediaEvent`]s. Every render issues a fresh [`ElementId`]; events
//! carrying an older id are dropped, which keeps a late `ended` from a
//! torn-down element from advancing the playlist twice.
//!
//! The `wasm` feature adds a `web-sys` host and a `wasm-bindgen` player.
//!
//! # Example
//!
//! ```rust
//! use cue_playback::{
//!     Bindings, ElementId, MediaEvent, MediaHost, PlaybackSession, RenderDirective, TimerId,
//! };
//! use std::time::Duration;
//!
//! // Implement MediaHost for your platform
//! #[derive(Default)]
//! struct Headless {
//!     mounted: Vec<String>,
//! }
//!
//! impl MediaHost for Headless {
//!     fn mount(&mut self, _element: ElementId, directive: &RenderDirective) {
//!         self.mounted.push(directive.url.clone());
//!     }
//!     fn attach(&mut self, _element: ElementId, _bindings: Bindings) {}
//!     fn detach(&mut self, _element: ElementId) {}
//!     fn seek(&mut self, _element: ElementId, _position: f64) {}
//!     fn play(&mut self, _element: ElementId) {}
//!     fn pause(&mut self, _element: ElementId) {}
//!     fn is_paused(&self, _element: ElementId) -> bool { true }
//!     fn schedule_timer(&mut self, _timer: TimerId, _delay: Duration) {}
//!     fn cancel_timer(&mut self, _timer: TimerId) {}
//!     fn go_back(&mut self) {}
//!     fn show_ended(&mut self) {}
//! }
//!
//! let mut host = Headless::default();
//! let mut session = PlaybackSession::new();
//! session
//!     .load_json(&mut host, r#"{"loop": 0, "media": [
//!         {"url": "a.mp4", "title": "A"},
//!         {"url": "b.mp4", "title": "B"}
//!     ]}"#)
//!     .unwrap();
//!
//! // The platform reports the natural end of the first element
//! let first = session.stage().active_id().unwrap();
//! session.handle_event(&mut host, MediaEvent::Ended(first));
//!
//! assert_eq!(session.current_index(), 1);
//! assert_eq!(host.mounted, vec!["a.mp4", "b.mp4"]);
//! ```

mod error;
mod events;
mod host;
mod render;
mod session;
pub mod types;
mod visibility;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use cue_document::{MediaItem, MediaKind, PlaylistDocument};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use host::MediaHost;
pub use render::{ActiveElement, Bindings, Navigation, RenderDirective, RenderMode, Stage};
pub use session::PlaybackSession;
pub use types::{ElementId, MediaEvent, SessionState, TimerId, Visibility};
pub use visibility::on_visibility_change;
