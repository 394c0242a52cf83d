use crate::models::QuestionType;
use thiserror::Error;

/// Something wrong with a source row. Never surfaced as a failure: parsers
/// substitute defaults and attach one of these as a diagnostic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowDefect {
    #[error("answer list is not a JSON array: {0}")]
    MalformedAnswerList(String),
    #[error("answer list has {found} entries, expected {expected}")]
    WrongAnswerCount { found: usize, expected: usize },
    #[error("answer list entry {index} is not a string")]
    NonStringAnswer { index: usize },
    #[error("answer list is missing")]
    MissingAnswerList,
}

/// Grading was called with inconsistent input. This is a caller bug.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GradeError {
    #[error("grading needs {required} answers per side, got {user} submitted and {expected} expected")]
    LengthMismatch {
        user: usize,
        expected: usize,
        required: usize,
    },
    #[error("blank {blank} is out of range, passages have {required} blanks")]
    BlankOutOfRange { blank: usize, required: usize },
}

#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to read {ty} rows: {source}")]
    Io {
        ty: QuestionType,
        #[source]
        source: std::io::Error,
    },
    #[error("{ty} table has no `{column}` column")]
    MissingColumn {
        ty: QuestionType,
        column: &'static str,
    },
}
