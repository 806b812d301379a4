//! Render/binding layer
//!
//! Turns the cursor position into a concrete [`RenderDirective`] and owns
//! the single active element. Replacing the active element is one scoped
//! operation: detach the outgoing listeners, cancel its timer, mount the
//! new element, attach its listeners.

use crate::host::MediaHost;
use crate::types::{ElementId, MediaEvent, TimerId};
use cue_document::{MediaKind, PlaylistDocument};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Lifecycle listeners to register on a media element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    /// Seek to the trim-in point once metadata is loaded
    pub ready: bool,
    /// Compare position to the trim-out point
    pub progress: bool,
    /// Natural end of media
    pub ended: bool,
    /// Click toggles play/pause (only when native controls are hidden)
    pub click_toggle: bool,
}

impl Bindings {
    /// Listeners for a playable item
    pub fn playable(controls: bool) -> Self {
        Self {
            ready: true,
            progress: true,
            ended: true,
            click_toggle: !controls,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn any(self) -> bool {
        self.ready || self.progress || self.ended || self.click_toggle
    }
}

/// Previous/next affordance with a 1-based position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub position: usize,
    pub total: usize,
}

impl Navigation {
    pub fn label(&self) -> String {
        format!("Media {} of {}", self.position, self.total)
    }
}

/// How the item is being entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Normal entry: autoplay and image timers apply
    Enter,
    /// Terminal render after the playlist ended: nothing starts by itself
    Stopped,
}

/// Everything a host needs to present one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderDirective {
    /// Playlist heading
    pub heading: Option<String>,
    pub title: String,
    pub kind: MediaKind,
    pub url: String,
    /// Trim-in point, seconds
    pub start: f64,
    /// Trim-out point, seconds
    pub end: Option<f64>,
    pub playback_rate: f64,
    /// Native controls visible
    pub controls: bool,
    pub autoplay: bool,
    pub poster: Option<String>,
    pub banner: Option<String>,
    /// Banner click toggles play/pause of the main element
    pub banner_toggle: bool,
    /// Image display time before the item ends
    pub display_for: Option<Duration>,
    pub bindings: Bindings,
    pub navigation: Navigation,
}

impl RenderDirective {
    /// Build the directive for `doc.media[index]`
    ///
    /// Returns `None` when the index is out of range.
    pub fn for_item(doc: &PlaylistDocument, index: usize, mode: RenderMode) -> Option<Self> {
        let item = doc.item(index)?;
        let playable = item.kind.is_playable();
        let controls = playable && doc.effective_controls(item);
        let entering = mode == RenderMode::Enter;

        Some(Self {
            heading: doc.title.clone(),
            title: item.title.clone(),
            kind: item.kind,
            url: item.url.clone(),
            start: item.start_seconds(),
            end: item.end_seconds(),
            playback_rate: doc.effective_speed(item),
            controls,
            autoplay: playable && entering && doc.autoplay,
            poster: item.poster.clone(),
            banner: item.banner.clone(),
            banner_toggle: playable && item.banner.is_some(),
            display_for: if playable || !entering {
                None
            } else {
                item.display_duration()
            },
            bindings: if playable {
                Bindings::playable(controls)
            } else {
                Bindings::none()
            },
            navigation: Navigation {
                position: index + 1,
                total: doc.len(),
            },
        })
    }
}

/// The element currently owned by the stage
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveElement {
    pub id: ElementId,
    pub kind: MediaKind,
    pub bindings: Bindings,
    pub banner_toggle: bool,
    /// Listeners are currently registered
    pub listening: bool,
    /// Pending image timer
    pub timer: Option<TimerId>,
}

/// Owner of the single active element and its timer
#[derive(Debug, Default)]
pub struct Stage {
    active: Option<ActiveElement>,
    next_element: u64,
    next_timer: u64,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveElement> {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> Option<ElementId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Tear down the active element (if any) and present a new one
    pub fn replace<H: MediaHost>(&mut self, host: &mut H, directive: &RenderDirective) -> ElementId {
        self.clear(host);

        self.next_element += 1;
        let id = ElementId(self.next_element);

        host.mount(id, directive);

        let listening = directive.bindings.any();
        if listening {
            host.attach(id, directive.bindings);
        }

        self.active = Some(ActiveElement {
            id,
            kind: directive.kind,
            bindings: directive.bindings,
            banner_toggle: directive.banner_toggle,
            listening,
            timer: None,
        });

        if let Some(delay) = directive.display_for {
            self.schedule(host, delay);
        }

        debug!("Mounted {} ({:?})", id, directive.kind);
        id
    }

    /// Detach listeners and cancel the timer of the active element
    pub fn clear<H: MediaHost>(&mut self, host: &mut H) {
        if let Some(old) = self.active.take() {
            if old.listening {
                host.detach(old.id);
            }
            if let Some(timer) = old.timer {
                host.cancel_timer(timer);
            }
        }
    }

    /// Remove the active element's listeners but keep it on stage
    pub fn release_bindings<H: MediaHost>(&mut self, host: &mut H) {
        if let Some(active) = self.active.as_mut().filter(|a| a.listening) {
            host.detach(active.id);
            active.listening = false;
        }
    }

    /// Re-register the active element's listeners after a release
    pub fn rearm<H: MediaHost>(&mut self, host: &mut H) {
        if let Some(active) = self.active.as_mut() {
            if !active.listening && active.bindings.any() {
                host.attach(active.id, active.bindings);
                active.listening = true;
            }
        }
    }

    /// Schedule a timer for the active element, replacing any pending one
    pub fn schedule<H: MediaHost>(&mut self, host: &mut H, delay: Duration) -> Option<TimerId> {
        let active = self.active.as_mut()?;
        if let Some(pending) = active.timer.take() {
            host.cancel_timer(pending);
        }

        self.next_timer += 1;
        let timer = TimerId(self.next_timer);
        host.schedule_timer(timer, delay);
        active.timer = Some(timer);
        Some(timer)
    }

    /// Claim a fired timer; false when it no longer belongs to the stage
    pub fn take_timer(&mut self, timer: TimerId) -> bool {
        match self.active.as_mut() {
            Some(active) if active.timer == Some(timer) => {
                active.timer = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a lifecycle event should reach the state machine
    ///
    /// Events from replaced elements, or from an element whose listeners
    /// were released, are stale.
    pub fn accepts(&self, event: &MediaEvent) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };

        match *event {
            MediaEvent::Ready(id) => active.listening && id == active.id && active.bindings.ready,
            MediaEvent::Progress { element, .. } => {
                active.listening && element == active.id && active.bindings.progress
            }
            MediaEvent::Ended(id) => active.listening && id == active.id && active.bindings.ended,
            MediaEvent::Click(id) => {
                active.listening && id == active.id && active.bindings.click_toggle
            }
            MediaEvent::BannerClick(id) => id == active.id && active.banner_toggle,
            MediaEvent::TimerFired(timer) => active.timer == Some(timer),
        }
    }
}
