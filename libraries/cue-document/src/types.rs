//! Playlist document types
//!
//! The in-memory shape of an authored playlist. Field names follow the
//! authored YAML/JSON (`onStop`, `goBack`, `loop`, `type`), and the schema
//! defaults are applied during deserialization.

use crate::time::parse_time;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Slowest playback rate browsers accept on a media element
pub const MIN_SPEED: f64 = 0.0625;

/// Fastest playback rate browsers accept on a media element
pub const MAX_SPEED: f64 = 16.0;

/// Kind of media element an item renders as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Video,
    Audio,
    Image,
}

impl MediaKind {
    /// Whether the kind has a playback timeline (play/pause/seek/ended)
    pub fn is_playable(self) -> bool {
        !matches!(self, MediaKind::Image)
    }

    /// HTML tag used to present this kind
    pub fn tag_name(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Image => "img",
        }
    }
}

/// Repeat policy decoded from an authored loop count
///
/// `-1` means forever; any other value is a finite count, with negative
/// values other than `-1` treated as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Forever,
    Times(u32),
}

impl Repeat {
    pub fn from_count(count: i64) -> Self {
        if count == -1 {
            Repeat::Forever
        } else {
            Repeat::Times(u32::try_from(count.max(0)).unwrap_or(u32::MAX))
        }
    }
}

/// What to do once the playlist stops for good
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnStop {
    /// Navigate back in session history when playback ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_back: Option<bool>,
}

/// One playable or displayable entry of a playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(rename = "type", default)]
    pub kind: MediaKind,

    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,

    /// Overlay image whose click toggles play/pause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,

    pub title: String,

    /// Display time in seconds; the only way an image advances on its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Trim-in point
    #[serde(default = "default_start")]
    pub start: String,

    /// Trim-out point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<bool>,

    #[serde(rename = "loop", default, skip_serializing_if = "Option::is_none")]
    pub loop_count: Option<i64>,
}

impl MediaItem {
    pub fn new(kind: MediaKind, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            poster: None,
            banner: None,
            title: title.into(),
            duration: None,
            start: default_start(),
            end: None,
            speed: None,
            controls: None,
            loop_count: None,
        }
    }

    /// Trim-in point in seconds
    pub fn start_seconds(&self) -> f64 {
        parse_time(&self.start)
    }

    /// Trim-out point in seconds, if one is set
    ///
    /// An empty `end` string means "no trim-out".
    pub fn end_seconds(&self) -> Option<f64> {
        self.end
            .as_deref()
            .filter(|end| !end.trim().is_empty())
            .map(parse_time)
    }

    /// How long an image stays up before the item ends
    ///
    /// Zero, negative, non-finite and unrepresentably long durations are
    /// treated as absent.
    pub fn display_duration(&self) -> Option<Duration> {
        self.duration
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    pub fn repeat(&self) -> Repeat {
        Repeat::from_count(self.loop_count.unwrap_or(0))
    }
}

/// A validated playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default = "default_autoplay")]
    pub autoplay: bool,

    /// Playlist loop policy: `-1` restarts forever, `0`/`1` plays once,
    /// `n > 1` plays `n` passes in total
    #[serde(rename = "loop", default = "default_playlist_loop")]
    pub loop_count: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<bool>,

    /// Initial index hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playing: Option<i64>,

    #[serde(default)]
    pub on_stop: OnStop,

    pub media: Vec<MediaItem>,
}

impl PlaylistDocument {
    pub fn new(media: Vec<MediaItem>) -> Self {
        Self {
            title: None,
            autoplay: default_autoplay(),
            loop_count: default_playlist_loop(),
            speed: None,
            controls: None,
            playing: None,
            on_stop: OnStop::default(),
            media,
        }
    }

    /// Starter document offered when nothing is stored yet
    pub fn default_document() -> Self {
        let mut sample = MediaItem::new(
            MediaKind::Video,
            "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
            "Sample Video",
        );
        sample.duration = Some(10.0);
        sample.start = "0:05".to_string();
        sample.end = Some("0:15".to_string());
        sample.speed = Some(1.5);
        sample.loop_count = Some(1);

        Self {
            title: Some("My Playlist".to_string()),
            autoplay: false,
            loop_count: 0,
            speed: Some(1.0),
            controls: None,
            playing: Some(0),
            on_stop: OnStop::default(),
            media: vec![sample],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn item(&self, index: usize) -> Option<&MediaItem> {
        self.media.get(index)
    }

    pub fn go_back_on_stop(&self) -> bool {
        self.on_stop.go_back.unwrap_or(false)
    }

    /// Playback rate for an item: its own, else the document's, else 1
    ///
    /// Clamped to [`MIN_SPEED`]..=[`MAX_SPEED`].
    pub fn effective_speed(&self, item: &MediaItem) -> f64 {
        item.speed
            .or(self.speed)
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .map_or(1.0, |rate| rate.clamp(MIN_SPEED, MAX_SPEED))
    }

    /// Native controls visibility for an item: its own, else the
    /// document's, else hidden
    pub fn effective_controls(&self, item: &MediaItem) -> bool {
        item.controls.or(self.controls).unwrap_or(false)
    }

    /// The `playing` hint as an index, if it points inside the list
    pub fn initial_index(&self) -> Option<usize> {
        self.playing
            .and_then(|hint| usize::try_from(hint).ok())
            .filter(|index| *index < self.media.len())
    }
}

fn default_start() -> String {
    "0:00".to_string()
}

fn default_autoplay() -> bool {
    true
}

fn default_playlist_loop() -> i64 {
    -1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_defaults_apply() {
        let doc: PlaylistDocument = serde_json::from_str(
            r#"{"media": [{"url": "a.mp4", "title": "A"}]}"#,
        )
        .unwrap();

        assert!(doc.autoplay);
        assert_eq!(doc.loop_count, -1);
        assert_eq!(doc.title, None);
        assert!(!doc.go_back_on_stop());

        let item = &doc.media[0];
        assert_eq!(item.kind, MediaKind::Video);
        assert_eq!(item.start, "0:00");
        assert_eq!(item.end, None);
        assert_eq!(item.repeat(), Repeat::Times(0));
    }

    #[test]
    fn authored_names_round_trip() {
        let doc: PlaylistDocument = serde_json::from_str(
            r#"{
                "title": "Show",
                "loop": 3,
                "onStop": {"goBack": true},
                "media": [{"type": "image", "url": "a.png", "title": "A", "duration": 3, "loop": -1}]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.loop_count, 3);
        assert!(doc.go_back_on_stop());
        assert_eq!(doc.media[0].kind, MediaKind::Image);
        assert_eq!(doc.media[0].repeat(), Repeat::Forever);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["onStop"]["goBack"], true);
        assert_eq!(json["media"][0]["type"], "image");
        assert_eq!(json["media"][0]["loop"], -1);
    }

    #[test]
    fn repeat_decoding() {
        assert_eq!(Repeat::from_count(-1), Repeat::Forever);
        assert_eq!(Repeat::from_count(0), Repeat::Times(0));
        assert_eq!(Repeat::from_count(4), Repeat::Times(4));
        assert_eq!(Repeat::from_count(-7), Repeat::Times(0));
    }

    #[test]
    fn trim_points() {
        let mut item = MediaItem::new(MediaKind::Video, "a.mp4", "A");
        item.start = "0:05".to_string();
        assert_eq!(item.start_seconds(), 5.0);
        assert_eq!(item.end_seconds(), None);

        item.end = Some(String::new());
        assert_eq!(item.end_seconds(), None);

        item.end = Some("1:00".to_string());
        assert_eq!(item.end_seconds(), Some(60.0));
    }

    #[test]
    fn display_duration_ignores_non_positive() {
        let mut item = MediaItem::new(MediaKind::Image, "a.png", "A");
        assert_eq!(item.display_duration(), None);

        item.duration = Some(0.0);
        assert_eq!(item.display_duration(), None);

        item.duration = Some(2.5);
        assert_eq!(item.display_duration(), Some(Duration::from_millis(2500)));

        item.duration = Some(1e20);
        assert_eq!(item.display_duration(), None);
    }

    #[test]
    fn effective_settings_fall_back_to_document() {
        let mut doc = PlaylistDocument::new(vec![MediaItem::new(MediaKind::Audio, "a.mp3", "A")]);
        let item = doc.media[0].clone();
        assert_eq!(doc.effective_speed(&item), 1.0);
        assert!(!doc.effective_controls(&item));

        doc.speed = Some(2.0);
        doc.controls = Some(true);
        assert_eq!(doc.effective_speed(&item), 2.0);
        assert!(doc.effective_controls(&item));

        let mut own = item;
        own.speed = Some(0.5);
        own.controls = Some(false);
        assert_eq!(doc.effective_speed(&own), 0.5);
        assert!(!doc.effective_controls(&own));
    }

    #[test]
    fn effective_speed_stays_in_browser_range() {
        let doc = PlaylistDocument::new(Vec::new());
        let mut item = MediaItem::new(MediaKind::Video, "a.mp4", "A");

        item.speed = Some(100.0);
        assert_eq!(doc.effective_speed(&item), MAX_SPEED);

        item.speed = Some(0.001);
        assert_eq!(doc.effective_speed(&item), MIN_SPEED);
    }

    #[test]
    fn initial_index_must_be_in_bounds() {
        let mut doc = PlaylistDocument::new(vec![
            MediaItem::new(MediaKind::Video, "a.mp4", "A"),
            MediaItem::new(MediaKind::Video, "b.mp4", "B"),
        ]);
        assert_eq!(doc.initial_index(), None);

        doc.playing = Some(1);
        assert_eq!(doc.initial_index(), Some(1));

        doc.playing = Some(2);
        assert_eq!(doc.initial_index(), None);

        doc.playing = Some(-1);
        assert_eq!(doc.initial_index(), None);
    }

    #[test]
    fn default_document_matches_starter() {
        let doc = PlaylistDocument::default_document();
        assert_eq!(doc.title.as_deref(), Some("My Playlist"));
        assert!(!doc.autoplay);
        assert_eq!(doc.loop_count, 0);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.media[0].start_seconds(), 5.0);
        assert_eq!(doc.media[0].end_seconds(), Some(15.0));
        assert_eq!(doc.media[0].repeat(), Repeat::Times(1));
    }
}
