//! Platform-agnostic media host trait
//!
//! Abstracts the page for different platforms (browser DOM, test fakes).

use crate::render::{Bindings, RenderDirective};
use crate::types::{ElementId, TimerId};
use std::time::Duration;

/// Platform primitives the playback session drives
///
/// Implementors own the actual elements. The session only ever refers to
/// them by [`ElementId`], and only one element is live at a time: a host
/// may tear down whatever it mounted before when `mount` is called again.
///
/// Lifecycle callbacks travel the other way, as
/// [`MediaEvent`](crate::MediaEvent)s passed to
/// [`PlaybackSession::handle_event`](crate::PlaybackSession::handle_event).
#[cfg_attr(test, mockall::automock)]
pub trait MediaHost {
    /// Create and show a fresh element for `directive`
    ///
    /// Includes the heading, item title, optional banner and the
    /// previous/next navigation. No lifecycle listeners yet.
    fn mount(&mut self, element: ElementId, directive: &RenderDirective);

    /// Register the lifecycle listeners selected in `bindings`
    fn attach(&mut self, element: ElementId, bindings: Bindings);

    /// Remove every lifecycle listener from `element`
    fn detach(&mut self, element: ElementId);

    /// Set the playback position in seconds
    fn seek(&mut self, element: ElementId, position: f64);

    fn play(&mut self, element: ElementId);

    fn pause(&mut self, element: ElementId);

    /// Whether `element` is paused; elements without a timeline report true
    fn is_paused(&self, element: ElementId) -> bool;

    /// Fire [`MediaEvent::TimerFired`](crate::MediaEvent::TimerFired) once
    /// after `delay`
    fn schedule_timer(&mut self, timer: TimerId, delay: Duration);

    /// Drop a pending timer; unknown or already fired timers are ignored
    fn cancel_timer(&mut self, timer: TimerId);

    /// Navigate back in session history
    fn go_back(&mut self);

    /// Show the "playlist ended" indicator
    fn show_ended(&mut self);
}
