//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one rendered media element
///
/// A fresh id is issued on every render, so an event tagged with an older
/// id can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Handle for a scheduled one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Host page visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Lifecycle callbacks a host reports back to the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Metadata loaded; the element can be seeked
    Ready(ElementId),

    /// Playback position advanced (seconds)
    Progress { element: ElementId, position: f64 },

    /// Media reached its natural end
    Ended(ElementId),

    /// Primary click on the media element
    Click(ElementId),

    /// Click on the banner overlay
    BannerClick(ElementId),

    /// A scheduled timer fired
    TimerFired(TimerId),
}

/// Coarse session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No document, or a document without media
    Empty,

    /// An item is current and playback may proceed
    Active,

    /// The playlist terminated; the last item is shown stopped
    Ended,
}
