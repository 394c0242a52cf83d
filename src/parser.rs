use crate::models::{explanation_or_default, Question, SourceRow, OPTION_COUNT};
use regex::Regex;

pub const OPTION_LABELS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

lazy_static::lazy_static! {
    static ref NUMBERING_PREFIX: Regex = Regex::new(r"^\d+\.").unwrap();
    static ref OPTIONS_START: Regex = Regex::new(r"[A-D]\. ").unwrap();
    static ref OPTION_LABEL: Regex = Regex::new(r"([A-D])\.").unwrap();
}

/// Split a raw question into its stem and the options block that follows it.
///
/// A leading `12.` style numbering is dropped first. The options block starts
/// at the first `A. ` .. `D. `; without one the whole text is the stem and the
/// block is empty.
pub fn parse_question_text(raw: &str) -> (String, String) {
    let text = NUMBERING_PREFIX.replace(raw, "");
    let text = text.trim();

    match OPTIONS_START.find(text) {
        Some(m) => (
            text[..m.start()].trim().to_string(),
            text[m.start()..].to_string(),
        ),
        None => (text.to_string(), String::new()),
    }
}

/// Parse an options block into exactly four `"<Label>. <content>"` entries,
/// ordered A-D. An option's content runs until the next label or the end of
/// its line. Missing labels get empty content; repeated labels keep the first.
pub fn parse_options(block: &str) -> [String; OPTION_COUNT] {
    let labels: Vec<_> = OPTION_LABEL.captures_iter(block).collect();
    let mut found: [Option<&str>; OPTION_COUNT] = [None; OPTION_COUNT];

    for (i, caps) in labels.iter().enumerate() {
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let start = whole.end();
        let next_label = labels
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(block.len(), |m| m.start());
        let line_end = block[start..]
            .find('\n')
            .map_or(block.len(), |offset| start + offset);
        let content = block[start..next_label.min(line_end)].trim();

        let letter = label.as_str().chars().next();
        if let Some(slot) = OPTION_LABELS.iter().position(|l| Some(*l) == letter)
            && found[slot].is_none()
        {
            found[slot] = Some(content);
        }
    }

    std::array::from_fn(|i| format!("{}. {}", OPTION_LABELS[i], found[i].unwrap_or("")))
}

/// Content of a formatted option with its `"X. "` prefix removed.
pub fn option_content(option: &str) -> &str {
    match option.split_once(". ") {
        Some((label, content)) if label.len() == 1 => content,
        _ => option,
    }
}

impl Question {
    pub fn from_row(row: &SourceRow) -> Self {
        let (stem, block) = parse_question_text(&row.question);
        Self {
            stem,
            options: parse_options(&block),
            correct_answer: row.answer.as_deref().unwrap_or("").trim().to_string(),
            explanation: explanation_or_default(row.explanation.as_deref()),
        }
    }

    /// True when none of the four options carries any content.
    pub fn has_no_options(&self) -> bool {
        self.options.iter().all(|o| option_content(o).is_empty())
    }
}
