use crate::error::GradeError;
use crate::models::{ClozePassage, BLANK_COUNT};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeReport {
    pub per_blank_correct: [bool; BLANK_COUNT],
    pub correct_count: usize,
}

impl GradeReport {
    pub fn total(&self) -> usize {
        BLANK_COUNT
    }

    pub fn is_perfect(&self) -> bool {
        self.correct_count == BLANK_COUNT
    }
}

/// Compare two answers ignoring case and surrounding whitespace.
pub fn answers_match(user: &str, expected: &str) -> bool {
    user.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// Grade submitted fill-ins against expected ones, position by position.
///
/// Both sides must hold exactly [`BLANK_COUNT`] entries; anything else means
/// the caller passed inconsistent data and is rejected.
pub fn grade<U, E>(user_answers: &[U], expected: &[E]) -> Result<GradeReport, GradeError>
where
    U: AsRef<str>,
    E: AsRef<str>,
{
    if user_answers.len() != BLANK_COUNT || expected.len() != BLANK_COUNT {
        return Err(GradeError::LengthMismatch {
            user: user_answers.len(),
            expected: expected.len(),
            required: BLANK_COUNT,
        });
    }

    let per_blank_correct: [bool; BLANK_COUNT] =
        std::array::from_fn(|i| answers_match(user_answers[i].as_ref(), expected[i].as_ref()));
    let correct_count = per_blank_correct.iter().filter(|ok| **ok).count();

    Ok(GradeReport {
        per_blank_correct,
        correct_count,
    })
}

pub fn grade_passage<U: AsRef<str>>(
    passage: &ClozePassage,
    user_answers: &[U],
) -> Result<GradeReport, GradeError> {
    grade(user_answers, &passage.expected_answers)
}
