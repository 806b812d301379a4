//! Structural validation
//!
//! serde enforces types and required fields; this pass covers the value
//! constraints a playlist schema expresses on top of that.

use crate::error::{DocumentError, Result, ValidationError};
use crate::time::try_parse_time;
use crate::types::{MediaItem, PlaylistDocument, MAX_SPEED, MIN_SPEED};
use std::time::Duration;
use tracing::warn;

impl PlaylistDocument {
    /// Parse a JSON document and validate it
    pub fn from_json(text: &str) -> Result<Self> {
        let doc: PlaylistDocument = serde_json::from_str(text)?;
        doc.validated()
    }

    /// Parse an already-decoded JSON value and validate it
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let doc: PlaylistDocument = serde_json::from_value(value)?;
        doc.validated()
    }

    fn validated(self) -> Result<Self> {
        let errors = validate(&self);
        if errors.is_empty() {
            Ok(self)
        } else {
            warn!("Playlist failed validation with {} error(s)", errors.len());
            Err(DocumentError::Invalid(errors))
        }
    }
}

/// Check a document, returning every problem found (empty when valid)
pub fn validate(doc: &PlaylistDocument) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_speed(&mut errors, "/speed", doc.speed);
    check_loop(&mut errors, "/loop", doc.loop_count);

    for (index, item) in doc.media.iter().enumerate() {
        validate_item(&mut errors, index, item);
    }

    errors
}

fn validate_item(errors: &mut Vec<ValidationError>, index: usize, item: &MediaItem) {
    let at = |field: &str| format!("/media/{index}/{field}");

    if item.url.trim().is_empty() {
        errors.push(ValidationError::new(at("url"), "must not be empty"));
    }
    if item.title.trim().is_empty() {
        errors.push(ValidationError::new(at("title"), "must not be empty"));
    }
    if try_parse_time(&item.start).is_none() {
        errors.push(ValidationError::new(
            at("start"),
            "must be a time like ss, mm:ss or hh:mm:ss",
        ));
    }
    if let Some(end) = item.end.as_deref().filter(|end| !end.trim().is_empty()) {
        if try_parse_time(end).is_none() {
            errors.push(ValidationError::new(
                at("end"),
                "must be a time like ss, mm:ss or hh:mm:ss",
            ));
        }
    }
    if let Some(duration) = item.duration {
        if !duration.is_finite() || duration < 0.0 {
            errors.push(ValidationError::new(
                at("duration"),
                "must be a non-negative number",
            ));
        } else if Duration::try_from_secs_f64(duration).is_err() {
            errors.push(ValidationError::new(at("duration"), "is too long"));
        }
    }
    check_speed(errors, &at("speed"), item.speed);
    if let Some(count) = item.loop_count {
        check_loop(errors, &at("loop"), count);
    }
}

fn check_speed(errors: &mut Vec<ValidationError>, path: &str, speed: Option<f64>) {
    if let Some(speed) = speed {
        if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            errors.push(ValidationError::new(
                path,
                format!("must be between {MIN_SPEED} and {MAX_SPEED}"),
            ));
        }
    }
}

fn check_loop(errors: &mut Vec<ValidationError>, path: &str, count: i64) {
    if count < -1 {
        errors.push(ValidationError::new(path, "must be -1 or greater"));
    }
}
