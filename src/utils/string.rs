// Fri Oct 16 2026 - Alex

use std::borrow::Cow;

/// First `max_chars` characters of `text`, with "..." appended when
/// anything was cut. Counts characters, so Hangul is never split.
pub fn preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_borrowed() {
        assert!(matches!(preview("SELECT", 10), Cow::Borrowed("SELECT")));
        assert!(matches!(preview("SELECT", 6), Cow::Borrowed(_)));
    }

    #[test]
    fn test_cut_on_char_boundary() {
        assert_eq!(preview("수진자명 SELECT", 3), "수진자...");
        assert_eq!(preview("abcdef", 0), "...");
    }
}
