use crate::config::EMBED_BASE_URL;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// Compiled regexes for pulling a video id out of a pasted URL
static VIDEO_QUERY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]v=([A-Za-z0-9_-]{6,})").unwrap());
static VIDEO_PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtu\.be/|/embed/|/shorts/|/live/)([A-Za-z0-9_-]{6,})").unwrap()
});

/// Reduce a video reference to a bare embed id.
///
/// Accepts either an id (returned trimmed) or a full watch / short / embed URL.
///
/// # Examples
/// ```
/// use hang_list::utils::normalize_video_ref;
/// assert_eq!(normalize_video_ref(" dQw4w9WgXcQ "), "dQw4w9WgXcQ");
/// assert_eq!(normalize_video_ref("https://youtu.be/dQw4w9WgXcQ?t=4"), "dQw4w9WgXcQ");
/// ```
pub fn normalize_video_ref(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.contains('/') && !trimmed.contains('?') {
        return trimmed.to_string();
    }

    VIDEO_QUERY_REGEX
        .captures(trimmed)
        .or_else(|| VIDEO_PATH_REGEX.captures(trimmed))
        .map(|captures| captures[1].to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Read a whole number of seconds from a JSON number or numeric string.
///
/// Fractions are rounded; anything else (null, text, bool) yields `None`.
pub fn value_to_secs(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.round() as i64))
        }
        _ => None,
    }
}

/// Read a string field, accepting numbers as their textual form.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Build the autoplaying, control-less embed URL for a session video.
pub fn embed_url(video_ref: &str, start_secs: u32, origin: Option<&str>) -> String {
    format!(
        "{}{}?autoplay=1&start={}&controls=0&modestbranding=1&rel=0&origin={}",
        EMBED_BASE_URL,
        video_ref,
        start_secs,
        origin.unwrap_or("")
    )
}

/// Format a progress fraction as a CSS width, e.g. `0.5` -> `"50%"`.
pub fn percent_width(fraction: f64) -> String {
    format!("{:.2}%", fraction.clamp(0.0, 1.0) * 100.0)
}
