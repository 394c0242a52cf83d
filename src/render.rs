/// Token marking an elided word in a stem.
pub const BLANK_MARKER: &str = "____";

/// Fixed-size underlined box substituted for each blank in HTML output.
pub const HTML_BLANK: &str = "<u style='text-decoration: none; border-bottom: 2px solid black; display: inline-block; width: 80px; height: 24px; line-height: 24px;'>____</u>";

/// Terminal counterpart of [`HTML_BLANK`]; same width for every blank.
pub const TERMINAL_BLANK: &str = "[________]";

/// Replace every blank marker with the HTML placeholder. The rest of the stem
/// is passed through untouched, it is trusted table content.
pub fn render_blanks(stem: &str) -> String {
    render_blanks_with(stem, HTML_BLANK)
}

pub fn render_blanks_with(stem: &str, placeholder: &str) -> String {
    stem.replace(BLANK_MARKER, placeholder)
}

/// Number the blanks of a cloze passage in reading order: `(1)[____]`, ...
pub fn render_numbered_blanks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut n = 1;
    while let Some(pos) = rest.find(BLANK_MARKER) {
        out.push_str(&rest[..pos]);
        out.push_str(&format!("({}){}", n, TERMINAL_BLANK));
        rest = &rest[pos + BLANK_MARKER.len()..];
        n += 1;
    }
    out.push_str(rest);
    out
}
