//! Visibility coordinator
//!
//! Pauses the active media while the page is hidden and resumes it when
//! the page comes back. The pause reason is not tracked, so media the user
//! paused before hiding the page resumes as well. The cursor is untouched.

use crate::events::PlaybackEvent;
use crate::host::MediaHost;
use crate::render::Stage;
use crate::types::Visibility;
use tracing::debug;

/// Apply a visibility change to the active element
///
/// Returns the event describing what was done, if anything.
pub fn on_visibility_change<H: MediaHost>(
    stage: &Stage,
    host: &mut H,
    visibility: Visibility,
) -> Option<PlaybackEvent> {
    let active = stage.active().filter(|a| a.kind.is_playable())?;
    let paused = host.is_paused(active.id);

    match visibility {
        Visibility::Hidden if !paused => {
            debug!("Page hidden, pausing {}", active.id);
            host.pause(active.id);
            Some(PlaybackEvent::SuspendedByVisibility)
        }
        Visibility::Visible if paused => {
            debug!("Page visible, resuming {}", active.id);
            host.play(active.id);
            Some(PlaybackEvent::ResumedByVisibility)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockMediaHost;
    use crate::render::{RenderDirective, RenderMode};
    use crate::types::ElementId;
    use cue_document::{MediaItem, MediaKind, PlaylistDocument};
    use mockall::predicate::eq;

    fn staged(kind: MediaKind, host: &mut MockMediaHost) -> Stage {
        let mut item = MediaItem::new(kind, "a", "A");
        item.duration = Some(1.0);
        let doc = PlaylistDocument::new(vec![item]);
        let d = RenderDirective::for_item(&doc, 0, RenderMode::Enter).unwrap();

        host.expect_mount().return_const(());
        host.expect_attach().return_const(());
        host.expect_schedule_timer().return_const(());

        let mut stage = Stage::new();
        stage.replace(host, &d);
        stage
    }

    #[test]
    fn hidden_pauses_playing_media() {
        let mut host = MockMediaHost::new();
        let stage = staged(MediaKind::Video, &mut host);
        host.expect_is_paused().return_const(false);
        host.expect_pause().with(eq(ElementId(1))).times(1).return_const(());

        let event = on_visibility_change(&stage, &mut host, Visibility::Hidden);
        assert_eq!(event, Some(PlaybackEvent::SuspendedByVisibility));
    }

    #[test]
    fn visible_resumes_paused_media_regardless_of_reason() {
        let mut host = MockMediaHost::new();
        let stage = staged(MediaKind::Audio, &mut host);
        host.expect_is_paused().return_const(true);
        host.expect_play().with(eq(ElementId(1))).times(1).return_const(());

        let event = on_visibility_change(&stage, &mut host, Visibility::Visible);
        assert_eq!(event, Some(PlaybackEvent::ResumedByVisibility));
    }

    #[test]
    fn no_op_when_state_already_matches() {
        let mut host = MockMediaHost::new();
        let stage = staged(MediaKind::Video, &mut host);
        host.expect_is_paused().return_const(true);
        host.expect_pause().never();
        host.expect_play().never();

        assert_eq!(on_visibility_change(&stage, &mut host, Visibility::Hidden), None);
    }

    #[test]
    fn images_and_empty_stage_are_ignored() {
        let mut host = MockMediaHost::new();
        let stage = staged(MediaKind::Image, &mut host);
        host.expect_is_paused().never();

        assert_eq!(on_visibility_change(&stage, &mut host, Visibility::Hidden), None);
        assert_eq!(
            on_visibility_change(&Stage::new(), &mut host, Visibility::Visible),
            None
        );
    }
}
