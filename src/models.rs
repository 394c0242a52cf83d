use crate::error::RowDefect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used whenever a row carries no explanation text.
pub const DEFAULT_EXPLANATION: &str = "no explanation available";

/// Number of blanks in every cloze passage.
pub const BLANK_COUNT: usize = 10;

/// Number of labeled options in every multiple-choice question.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Vocabulary,
    Cloze,
    Reading,
    Translation,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::Vocabulary,
        QuestionType::Cloze,
        QuestionType::Reading,
        QuestionType::Translation,
    ];

    /// Name of the table (CSV file stem) holding this type's rows.
    pub fn sheet_name(self) -> &'static str {
        match self {
            QuestionType::Vocabulary => "vocabulary",
            QuestionType::Cloze => "cloze",
            QuestionType::Reading => "reading",
            QuestionType::Translation => "translation",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            QuestionType::Vocabulary => "Vocabulary",
            QuestionType::Cloze => "Cloze",
            QuestionType::Reading => "Reading",
            QuestionType::Translation => "Translation",
        }
    }

    pub fn is_cloze(self) -> bool {
        self == QuestionType::Cloze
    }

    /// Translation prompts take free text instead of an option pick.
    pub fn takes_free_text(self) -> bool {
        self == QuestionType::Translation
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One raw row as handed over by a tabular data source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    pub question: String,
    pub answer: Option<String>,
    pub explanation: Option<String>,
    pub answers: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub stem: String,
    /// Always one entry per label A-D, formatted as `"<Label>. <content>"`.
    pub options: [String; OPTION_COUNT],
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClozePassage {
    pub text: String,
    pub expected_answers: [String; BLANK_COUNT],
    pub explanation: String,
}

/// A value produced by a parser that never fails, plus what it had to
/// paper over to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub defect: Option<RowDefect>,
}

impl<T> Parsed<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            defect: None,
        }
    }

    pub fn degraded(value: T, defect: RowDefect) -> Self {
        Self {
            value,
            defect: Some(defect),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.defect.is_some()
    }
}

/// Falls back to [`DEFAULT_EXPLANATION`] when the field is absent or blank.
pub fn explanation_or_default(explanation: Option<&str>) -> String {
    match explanation.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => DEFAULT_EXPLANATION.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Quiz,
    QuitConfirm,
}
