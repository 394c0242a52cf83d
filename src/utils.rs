use unicode_width::UnicodeWidthChar;

/// Byte offset of the character boundary before `cursor`.
pub fn prev_char_boundary(text: &str, cursor: usize) -> usize {
    text[..cursor.min(text.len())]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}

/// Byte offset of the character boundary after `cursor`.
pub fn next_char_boundary(text: &str, cursor: usize) -> usize {
    let cursor = cursor.min(text.len());
    text[cursor..]
        .chars()
        .next()
        .map_or(cursor, |c| cursor + c.len_utf8())
}

/// (line, column) of a byte-offset cursor once `text` is hard-wrapped at
/// `max_width` display columns. Explicit newlines always start a new line.
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor_index: usize,
    max_width: usize,
) -> (usize, usize) {
    let max_width = max_width.max(1);
    let mut line = 0;
    let mut col = 0;

    for (idx, ch) in text.char_indices() {
        if idx >= cursor_index {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
            continue;
        }
        let width = ch.width().unwrap_or(0);
        if col + width > max_width {
            line += 1;
            col = 0;
        }
        col += width;
    }

    (line, col)
}
