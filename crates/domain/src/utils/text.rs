//! String truncation helpers

use crate::constants::TRUNCATE_SUFFIX;

/// Truncate `text` to at most `max_chars` characters, appending
/// [`TRUNCATE_SUFFIX`] when anything was cut.
///
/// Counts characters rather than bytes so multi-byte text is never split.
///
/// ```
/// use daysheet_domain::utils::text::truncate;
///
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("abcdefghij", 8), "abcde...");
/// ```
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(TRUNCATE_SUFFIX.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(TRUNCATE_SUFFIX);
    out
}

/// First line of a multi-line message, trimmed.
#[must_use]
pub fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default().trim()
}
