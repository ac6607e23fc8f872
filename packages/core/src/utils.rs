// ABOUTME: Shared utility functions for Lendflow
// ABOUTME: Timestamp identifiers, clock helpers, content truncation

use chrono::{SecondsFormat, Utc};

use crate::constants::CONTENT_PREVIEW_CHARS;

/// Milliseconds since the Unix epoch
pub fn epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generate a timestamp-based identifier.
///
/// Only probably unique: two calls inside the same millisecond collide.
pub fn timestamp_id() -> String {
    epoch_millis().to_string()
}

/// Current wall-clock time as an RFC 3339 string with millisecond precision
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Truncate text to `max_chars` characters, appending `...` when anything was cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Preview of raw content as embedded in generated documents
pub fn content_preview(content: &str) -> String {
    truncate_chars(content, CONTENT_PREVIEW_CHARS)
}

/// Returns the trimmed value when it is present and not blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
