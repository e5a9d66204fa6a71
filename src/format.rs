//! Display helpers for dates, previews and character counts

use chrono::{DateTime, Utc};

/// Length as a browser text field reports it (UTF-16 code units)
pub fn character_count(text: &str) -> usize {
    text.encode_utf16().count()
}

/// "May 1, 2024"
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "May 1, 09:05 AM"
pub fn format_draft_timestamp(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %I:%M %p").to_string()
}

/// First `max_chars` characters, with "..." appended when cut
pub fn preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_owned(),
    }
}
