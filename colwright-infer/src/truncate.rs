//! Character-budget truncation

/// Marker appended to truncated text. Counts toward the budget.
pub const ELLIPSIS: char = '…';

/// Truncate text to at most `max_chars` characters.
///
/// Text within budget is returned unchanged. Longer text keeps its first
/// `max_chars - 1` characters followed by [`ELLIPSIS`]. Counts Unicode scalar
/// values, so multi-byte text is never split mid-character.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    match text.char_indices().nth(max_chars - 1) {
        None => text.to_string(),
        Some(_) if text.chars().count() <= max_chars => text.to_string(),
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + ELLIPSIS.len_utf8());
            truncated.push_str(&text[..cut]);
            truncated.push(ELLIPSIS);
            truncated
        }
    }
}
