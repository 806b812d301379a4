//! Playback Events
//!
//! Event-based communication for UI synchronization during playback.
//! Events are recorded at key points:
//! - Document loads
//! - Item changes (forward, backward, playlist restart)
//! - Item repeats
//! - Playlist end
//! - Pause/resume driven by page visibility

use serde::{Deserialize, Serialize};

/// Events recorded by the playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A document was loaded and its first item rendered
    DocumentLoaded {
        /// Number of media items
        items: usize,
        /// Index rendered first
        index: usize,
    },

    /// The current item changed
    ItemChanged {
        /// Index of the new current item
        index: usize,
        /// Index of the item that was current before
        previous: usize,
    },

    /// The current item was re-entered instead of advancing
    ItemRepeated {
        /// Index of the repeated item
        index: usize,
        /// Repeats consumed so far; `None` for an infinite loop
        pass: Option<u32>,
    },

    /// Ran off the last item and wrapped to the first
    PlaylistRestarted {
        /// Remaining playlist loop value after this restart (`-1` = forever)
        remaining: i64,
    },

    /// Ran off the last item with no restart left
    PlaylistEnded {
        /// Whether a backward navigation was requested
        went_back: bool,
    },

    /// Active media paused because the page was hidden
    SuspendedByVisibility,

    /// Active media resumed because the page became visible
    ResumedByVisibility,
}
