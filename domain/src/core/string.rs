//! String utilities for the domain layer.

/// Shorten text to at most `max_chars` characters for one-line display.
///
/// Newlines are collapsed to spaces; when the text is cut an ellipsis is
/// appended (counted within `max_chars`).
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = flat.chars().take(keep).collect();
    out.push_str("...");
    out
}
