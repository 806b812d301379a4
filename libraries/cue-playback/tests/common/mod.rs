//! Shared test host
//!
//! A headless MediaHost that records every call, tracks which element is
//! mounted and whether it is paused, and runs timers on a manual clock.

#![allow(dead_code)]

use cue_playback::{
    Bindings, ElementId, MediaEvent, MediaHost, MediaItem, MediaKind, PlaybackSession,
    PlaylistDocument, RenderDirective, TimerId,
};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Mount(ElementId, String),
    Attach(ElementId),
    Detach(ElementId),
    Seek(ElementId, f64),
    Play(ElementId),
    Pause(ElementId),
    Schedule(TimerId, Duration),
    Cancel(TimerId),
    GoBack,
    ShowEnded,
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<Call>,
    pub mounted: Option<(ElementId, RenderDirective)>,
    pub paused: bool,
    pub now: Duration,
    pub timers: Vec<(TimerId, Duration)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            paused: true,
            ..Default::default()
        }
    }

    pub fn element(&self) -> ElementId {
        self.mounted.as_ref().expect("nothing mounted").0
    }

    pub fn directive(&self) -> &RenderDirective {
        &self.mounted.as_ref().expect("nothing mounted").1
    }

    pub fn mounted_urls(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Mount(_, url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn ended_shown(&self) -> usize {
        self.count(&Call::ShowEnded)
    }

    /// Advance the manual clock, firing due timers into the session
    pub fn advance(&mut self, session: &mut PlaybackSession, by: Duration) {
        self.now += by;
        loop {
            let due = self
                .timers
                .iter()
                .position(|(_, at)| *at <= self.now);
            let Some(pos) = due else { break };
            let (timer, _) = self.timers.remove(pos);
            session.handle_event(self, MediaEvent::TimerFired(timer));
        }
    }
}

impl MediaHost for RecordingHost {
    fn mount(&mut self, element: ElementId, directive: &RenderDirective) {
        self.calls.push(Call::Mount(element, directive.url.clone()));
        self.mounted = Some((element, directive.clone()));
        self.paused = !directive.autoplay;
    }

    fn attach(&mut self, element: ElementId, _bindings: Bindings) {
        self.calls.push(Call::Attach(element));
    }

    fn detach(&mut self, element: ElementId) {
        self.calls.push(Call::Detach(element));
    }

    fn seek(&mut self, element: ElementId, position: f64) {
        self.calls.push(Call::Seek(element, position));
    }

    fn play(&mut self, element: ElementId) {
        self.calls.push(Call::Play(element));
        self.paused = false;
    }

    fn pause(&mut self, element: ElementId) {
        self.calls.push(Call::Pause(element));
        self.paused = true;
    }

    fn is_paused(&self, _element: ElementId) -> bool {
        self.paused
    }

    fn schedule_timer(&mut self, timer: TimerId, delay: Duration) {
        self.calls.push(Call::Schedule(timer, delay));
        self.timers.push((timer, self.now + delay));
    }

    fn cancel_timer(&mut self, timer: TimerId) {
        self.calls.push(Call::Cancel(timer));
        self.timers.retain(|(t, _)| *t != timer);
    }

    fn go_back(&mut self) {
        self.calls.push(Call::GoBack);
    }

    fn show_ended(&mut self) {
        self.calls.push(Call::ShowEnded);
    }
}

pub fn video(name: &str) -> MediaItem {
    MediaItem::new(MediaKind::Video, format!("{name}.mp4"), name)
}

pub fn audio(name: &str) -> MediaItem {
    MediaItem::new(MediaKind::Audio, format!("{name}.mp3"), name)
}

pub fn image(name: &str, seconds: Option<f64>) -> MediaItem {
    let mut item = MediaItem::new(MediaKind::Image, format!("{name}.png"), name);
    item.duration = seconds;
    item
}

pub fn playlist(loop_count: i64, media: Vec<MediaItem>) -> PlaylistDocument {
    let mut doc = PlaylistDocument::new(media);
    doc.loop_count = loop_count;
    doc
}

/// Report the natural end of whatever is mounted
pub fn end_current(host: &mut RecordingHost, session: &mut PlaybackSession) {
    let element = host.element();
    session.handle_event(host, MediaEvent::Ended(element));
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
