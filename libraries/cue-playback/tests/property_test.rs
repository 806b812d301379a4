//! Property-based tests for the playback session
//!
//! Uses proptest to verify cursor invariants across random playlists and
//! random sequences of navigation and lifecycle events.

mod common;

use common::*;
use cue_playback::{MediaEvent, MediaItem, PlaybackSession, PlaylistDocument};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Next,
    Previous,
    End,
    Progress(f64),
}

fn arbitrary_item() -> impl Strategy<Value = MediaItem> {
    (0u8..3, -1i64..4, proptest::option::of(1u32..30)).prop_map(|(kind, loops, end)| {
        let mut item = match kind {
            0 => video("v"),
            1 => audio("a"),
            _ => image("i", Some(2.0)),
        };
        item.loop_count = Some(loops);
        item.end = end.map(|secs| secs.to_string());
        item
    })
}

fn arbitrary_playlist() -> impl Strategy<Value = PlaylistDocument> {
    (prop::collection::vec(arbitrary_item(), 1..8), -1i64..5)
        .prop_map(|(media, loop_count)| playlist(loop_count, media))
}

fn arbitrary_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            Just(Op::Next),
            Just(Op::Previous),
            Just(Op::End),
            (0.0f64..40.0).prop_map(Op::Progress),
        ],
        1..60,
    )
}

fn apply(op: Op, host: &mut RecordingHost, session: &mut PlaybackSession) {
    match op {
        Op::Next => session.next(host),
        Op::Previous => session.previous(host),
        Op::End => end_current(host, session),
        Op::Progress(position) => {
            let element = host.element();
            session.handle_event(host, MediaEvent::Progress { element, position });
        }
    }
}

proptest! {
    /// Property: the cursor always points at an item
    #[test]
    fn index_stays_in_bounds(doc in arbitrary_playlist(), ops in arbitrary_ops()) {
        let len = doc.len();
        let mut host = RecordingHost::new();
        let mut session = PlaybackSession::new();
        session.load(&mut host, doc);

        for op in ops {
            apply(op, &mut host, &mut session);
            prop_assert!(session.current_index() < len);
            prop_assert!(session.current_item().is_some());
        }
    }

    /// Property: every index change starts the item's loop counter at zero
    #[test]
    fn index_change_resets_loop_counter(doc in arbitrary_playlist(), ops in arbitrary_ops()) {
        let mut host = RecordingHost::new();
        let mut session = PlaybackSession::new();
        session.load(&mut host, doc);

        for op in ops {
            let before = session.current_index();
            let mounts_before = host.mounted_urls().len();
            apply(op, &mut host, &mut session);

            let rerendered = host.mounted_urls().len() > mounts_before;
            if session.current_index() != before || rerendered {
                prop_assert_eq!(session.loop_count(), 0);
            }
        }
    }

    /// Property: a single-item playlist with loop n > 1 plays exactly n
    /// passes, and the loop value never drops below 1
    #[test]
    fn playlist_loop_runs_n_passes(n in 2i64..12) {
        let mut host = RecordingHost::new();
        let mut session = PlaybackSession::new();
        session.load(&mut host, playlist(n, vec![video("a")]));

        let mut passes = 1;
        while !session.is_ended() {
            end_current(&mut host, &mut session);
            prop_assert!(session.document().unwrap().loop_count >= 1);
            if !session.is_ended() {
                passes += 1;
            }
            prop_assert!(passes <= n);
        }

        prop_assert_eq!(passes, n);
        prop_assert_eq!(host.ended_shown(), 1);
    }

    /// Property: an infinite playlist wraps to the first item and never ends
    #[test]
    fn infinite_playlist_never_ends(len in 1usize..6, rounds in 1usize..20) {
        let media = (0..len).map(|i| video(&i.to_string())).collect();
        let mut host = RecordingHost::new();
        let mut session = PlaybackSession::new();
        session.load(&mut host, playlist(-1, media));

        for _ in 0..rounds {
            for _ in 0..len {
                end_current(&mut host, &mut session);
            }
            prop_assert_eq!(session.current_index(), 0);
        }

        prop_assert!(!session.is_ended());
        prop_assert_eq!(host.ended_shown(), 0);
    }
}
