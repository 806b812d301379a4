//! WASM bindings for cue-playback
//!
//! This module provides a `web-sys` media host and a JavaScript-facing
//! player, allowing the playback engine to drive real page elements.

pub mod host;
pub mod player;
pub mod storage;

pub use host::{HostSignal, WebMediaHost};
pub use player::WasmPlaylistPlayer;
pub use storage::LocalStorageStore;
