//! Time string parsing
//!
//! Trim points are authored as `ss`, `mm:ss` or `hh:mm:ss`. Parsing is
//! lenient: anything that does not fit one of those shapes yields zero.

/// Parse a time string into seconds
///
/// Each component may be fractional (`"1:02.5"` is 62.5 seconds). An empty
/// component counts as zero, so `""` and `":30"` are accepted.
///
/// ```
/// use cue_document::parse_time;
///
/// assert_eq!(parse_time("5"), 5.0);
/// assert_eq!(parse_time("1:05"), 65.0);
/// assert_eq!(parse_time("1:01:01"), 3661.0);
/// assert_eq!(parse_time("bad"), 0.0);
/// ```
pub fn parse_time(s: &str) -> f64 {
    try_parse_time(s).unwrap_or(0.0)
}

/// Strict variant of [`parse_time`]: `None` when the string is malformed
pub fn try_parse_time(s: &str) -> Option<f64> {
    let parts = s
        .split(':')
        .map(parse_component)
        .collect::<Option<Vec<f64>>>()?;

    let seconds = match parts.as_slice() {
        [ss] => *ss,
        [mm, ss] => mm * 60.0 + ss,
        [hh, mm, ss] => hh * 3600.0 + mm * 60.0 + ss,
        _ => return None,
    };

    seconds.is_finite().then_some(seconds)
}

fn parse_component(part: &str) -> Option<f64> {
    let part = part.trim();
    if part.is_empty() {
        return Some(0.0);
    }
    part.parse::<f64>().ok().filter(|v| v.is_finite())
}
