//! Playback session - the playlist state machine
//!
//! Walks the media list item by item. Each item is entered (rendered,
//! trim-in pending), plays or is displayed, and eventually ends, at which
//! point the end-of-item decision either repeats it or advances.
//!
//! All operations are silent no-ops until a document with media is loaded.

use crate::error::Result;
use crate::events::PlaybackEvent;
use crate::host::MediaHost;
use crate::render::{RenderDirective, RenderMode, Stage};
use crate::types::{ElementId, MediaEvent, SessionState, Visibility};
use crate::visibility::on_visibility_change;
use cue_document::{MediaItem, PlaylistDocument, Repeat};
use tracing::{debug, info};

/// One independent playlist player
///
/// Owns the document, the cursor (current index and the current item's
/// loop counter) and the stage holding the active element. The platform is
/// passed in to every operation that touches it.
#[derive(Debug, Default)]
pub struct PlaybackSession {
    document: Option<PlaylistDocument>,
    index: usize,
    loop_count: u32,
    ended: bool,
    stage: Stage,
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Document =====

    /// Replace the document wholesale and render its first item
    ///
    /// The first item is the `playing` hint when it is in range, else 0.
    pub fn load<H: MediaHost>(&mut self, host: &mut H, document: PlaylistDocument) {
        self.stage.clear(host);
        self.index = document.initial_index().unwrap_or(0);
        self.loop_count = 0;
        self.ended = false;

        let items = document.len();
        self.document = Some(document);

        if items == 0 {
            debug!("Loaded playlist without media");
            return;
        }

        info!("Loaded playlist with {} items", items);
        self.render(host, RenderMode::Enter);
        self.pending_events.push(PlaybackEvent::DocumentLoaded {
            items,
            index: self.index,
        });
    }

    /// Parse, validate and load a JSON document
    pub fn load_json<H: MediaHost>(&mut self, host: &mut H, text: &str) -> Result<()> {
        let document = PlaylistDocument::from_json(text)?;
        self.load(host, document);
        Ok(())
    }

    /// Drop the document and tear down the active element
    pub fn unload<H: MediaHost>(&mut self, host: &mut H) {
        self.stage.clear(host);
        self.document = None;
        self.index = 0;
        self.loop_count = 0;
        self.ended = false;
    }

    // ===== Navigation =====

    /// Advance to the next item, applying the playlist-end policy when
    /// running off the last one
    pub fn next<H: MediaHost>(&mut self, host: &mut H) {
        let Some(len) = self.media_len() else {
            return;
        };

        let previous = self.index;
        self.index += 1;
        self.loop_count = 0;
        self.ended = false;

        if self.index < len {
            self.render(host, RenderMode::Enter);
            self.pending_events.push(PlaybackEvent::ItemChanged {
                index: self.index,
                previous,
            });
            return;
        }

        let Some(doc) = self.document.as_mut() else {
            return;
        };

        if doc.loop_count == -1 || doc.loop_count > 1 {
            if doc.loop_count > 1 {
                doc.loop_count -= 1;
            }
            let remaining = doc.loop_count;
            self.index = 0;
            info!("Restarting playlist (loop {})", remaining);
            self.render(host, RenderMode::Enter);
            self.pending_events
                .push(PlaybackEvent::PlaylistRestarted { remaining });
            return;
        }

        self.finish_playlist(host, len);
    }

    /// Step back one item, wrapping from the first to the last
    pub fn previous<H: MediaHost>(&mut self, host: &mut H) {
        let Some(len) = self.media_len() else {
            return;
        };

        let previous = self.index;
        self.index = if self.index == 0 {
            len - 1
        } else {
            self.index - 1
        };
        self.loop_count = 0;
        self.ended = false;

        self.render(host, RenderMode::Enter);
        self.pending_events.push(PlaybackEvent::ItemChanged {
            index: self.index,
            previous,
        });
    }

    /// Repeat the current item or advance, per the item's loop setting
    pub fn finish_item<H: MediaHost>(&mut self, host: &mut H) {
        let Some(item) = self.current_item() else {
            return;
        };

        let repeat = match item.repeat() {
            Repeat::Forever => Some(None),
            Repeat::Times(limit) if self.loop_count < limit => {
                self.loop_count += 1;
                Some(Some(self.loop_count))
            }
            Repeat::Times(_) => None,
        };

        match repeat {
            Some(pass) => self.repeat_current(host, pass),
            None => {
                self.loop_count = 0;
                self.next(host);
            }
        }
    }

    // ===== Host callbacks =====

    /// Route a lifecycle event from the host
    ///
    /// Events from elements that have since been replaced or detached, and
    /// timers that were cancelled, are dropped.
    pub fn handle_event<H: MediaHost>(&mut self, host: &mut H, event: MediaEvent) {
        if !self.stage.accepts(&event) {
            debug!("Ignoring stale {:?}", event);
            return;
        }

        match event {
            MediaEvent::Ready(id) => {
                let start = self.current_item().map_or(0.0, MediaItem::start_seconds);
                host.seek(id, start);
            }
            MediaEvent::Progress { element, position } => {
                let end = self.current_item().and_then(MediaItem::end_seconds);
                if let Some(end) = end.filter(|end| position >= *end) {
                    debug!("Reached trim-out {}s on {}", end, element);
                    self.stage.release_bindings(host);
                    host.pause(element);
                    self.finish_item(host);
                }
            }
            MediaEvent::Ended(_) => self.finish_item(host),
            MediaEvent::Click(id) | MediaEvent::BannerClick(id) => toggle(host, id),
            MediaEvent::TimerFired(timer) => {
                if self.stage.take_timer(timer) {
                    self.finish_item(host);
                }
            }
        }
    }

    /// Pause or resume the active media for a page visibility change
    pub fn visibility_changed<H: MediaHost>(&mut self, host: &mut H, visibility: Visibility) {
        if let Some(event) = on_visibility_change(&self.stage, host, visibility) {
            self.pending_events.push(event);
        }
    }

    // ===== State Queries =====

    pub fn state(&self) -> SessionState {
        match self.media_len() {
            None => SessionState::Empty,
            Some(_) if self.ended => SessionState::Ended,
            Some(_) => SessionState::Active,
        }
    }

    pub fn document(&self) -> Option<&PlaylistDocument> {
        self.document.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Repeats consumed by the current item
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.document.as_ref()?.item(self.index)
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Directive for the current item, as last rendered
    pub fn current_directive(&self) -> Option<RenderDirective> {
        let mode = if self.ended {
            RenderMode::Stopped
        } else {
            RenderMode::Enter
        };
        RenderDirective::for_item(self.document.as_ref()?, self.index, mode)
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    fn media_len(&self) -> Option<usize> {
        self.document
            .as_ref()
            .map(PlaylistDocument::len)
            .filter(|len| *len > 0)
    }

    fn render<H: MediaHost>(&mut self, host: &mut H, mode: RenderMode) {
        let Some(doc) = self.document.as_ref() else {
            return;
        };
        if let Some(directive) = RenderDirective::for_item(doc, self.index, mode) {
            self.stage.replace(host, &directive);
        }
    }

    fn repeat_current<H: MediaHost>(&mut self, host: &mut H, pass: Option<u32>) {
        let Some(item) = self.current_item() else {
            return;
        };
        let start = item.start_seconds();
        let display_for = item.display_duration();
        let playable = item.kind.is_playable();

        if playable {
            if let Some(id) = self.stage.active_id() {
                self.stage.rearm(host);
                host.seek(id, start);
                host.play(id);
            }
        } else if let Some(delay) = display_for {
            self.stage.schedule(host, delay);
        }

        debug!("Repeating item {} (pass {:?})", self.index, pass);
        self.pending_events.push(PlaybackEvent::ItemRepeated {
            index: self.index,
            pass,
        });
    }

    fn finish_playlist<H: MediaHost>(&mut self, host: &mut H, len: usize) {
        self.index = len - 1;
        self.render(host, RenderMode::Stopped);

        if let Some(active) = self.stage.active().filter(|a| a.kind.is_playable()) {
            host.pause(active.id);
        }

        let go_back = self
            .document
            .as_ref()
            .is_some_and(PlaylistDocument::go_back_on_stop);
        if go_back {
            host.go_back();
        }

        self.ended = true;
        host.show_ended();
        info!("Playlist ended");
        self.pending_events
            .push(PlaybackEvent::PlaylistEnded { went_back: go_back });
    }
}

fn toggle<H: MediaHost>(host: &mut H, element: ElementId) {
    if host.is_paused(element) {
        host.play(element);
    } else {
        host.pause(element);
    }
}
