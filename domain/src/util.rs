//! Shared utility functions.

/// Single-line preview of `s` for log messages.
///
/// Newlines become spaces and the result is cut to at most `max_bytes`
/// (on a UTF-8 boundary), with `...` appended when something was dropped.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let flat: String = s
        .trim()
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.len() <= max_bytes {
        return flat;
    }
    let mut end = max_bytes.saturating_sub(3);
    while end > 0 && !flat.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &flat[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_unchanged() {
        assert_eq!(preview("hi", 10), "hi");
    }

    #[test]
    fn preview_flattens_newlines() {
        assert_eq!(preview("a\nb\r\nc", 20), "a b  c");
    }

    #[test]
    fn preview_truncates_with_ellipsis() {
        assert_eq!(preview("hello world", 8), "hello...");
    }

    #[test]
    fn preview_multibyte_boundary() {
        // 'の' is 3 bytes; a cut inside it backs up to the previous char
        let s = "あのねあのね";
        assert_eq!(preview(s, 7), "あ...");
    }
}
