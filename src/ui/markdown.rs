use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

lazy_static::lazy_static! {
    static ref INLINE: Regex = Regex::new(r"\*\*(.+?)\*\*|\*(.+?)\*|`([^`]+)`").unwrap();
    static ref NUMBERED: Regex = Regex::new(r"^(\d+)[.)]\s+(.*)$").unwrap();
}

/// Render explanation text written in light markdown: headings, bullet and
/// numbered lists, **bold**, *italic* and `code`.
pub fn render_markdown(content: &str) -> Vec<Line<'static>> {
    content.lines().map(render_line).collect()
}

fn render_line(line: &str) -> Line<'static> {
    let trimmed = line.trim();

    if trimmed.starts_with('#') {
        let heading = trimmed.trim_start_matches('#').trim();
        return Line::from(Span::styled(
            heading.to_string(),
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ));
    }

    if let Some(item) = trimmed.strip_prefix("- ").or(trimmed.strip_prefix("* ")) {
        let mut spans = vec![Span::from("  • ")];
        spans.extend(parse_inline(item));
        return Line::from(spans);
    }

    if let Some(caps) = NUMBERED.captures(trimmed)
        && let (Some(num), Some(item)) = (caps.get(1), caps.get(2))
    {
        let mut spans = vec![Span::from(format!("  {}. ", num.as_str()))];
        spans.extend(parse_inline(item.as_str()));
        return Line::from(spans);
    }

    if trimmed.is_empty() {
        Line::from("")
    } else {
        Line::from(parse_inline(line))
    }
}

fn parse_inline(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Span::from(text[last..whole.start()].to_string()));
        }
        let (inner, modifier) = if let Some(bold) = caps.get(1) {
            (bold, Modifier::BOLD)
        } else if let Some(italic) = caps.get(2) {
            (italic, Modifier::ITALIC)
        } else if let Some(code) = caps.get(3) {
            (code, Modifier::DIM)
        } else {
            continue;
        };
        spans.push(Span::styled(
            inner.as_str().to_string(),
            Style::default().add_modifier(modifier),
        ));
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::from(text[last..].to_string()));
    }
    if spans.is_empty() {
        spans.push(Span::from(String::new()));
    }
    spans
}
