use crate::error::RowDefect;
use crate::models::{explanation_or_default, ClozePassage, Parsed, SourceRow, BLANK_COUNT};
use serde_json::Value;

/// The answer set used whenever a row's list can't be trusted.
pub fn empty_answers() -> [String; BLANK_COUNT] {
    std::array::from_fn(|_| String::new())
}

/// Parse a serialized answer list, falling back to [`empty_answers`] on any
/// defect. Never fails.
pub fn parse_answers(serialized: &str) -> [String; BLANK_COUNT] {
    parse_answers_checked(serialized).value
}

/// Like [`parse_answers`], but reports what was wrong with the input.
///
/// The list must be a JSON array of exactly [`BLANK_COUNT`] strings. It is
/// parsed as data only; nothing in it is evaluated.
pub fn parse_answers_checked(serialized: &str) -> Parsed<[String; BLANK_COUNT]> {
    let items = match serde_json::from_str::<Value>(serialized.trim()) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            return Parsed::degraded(
                empty_answers(),
                RowDefect::MalformedAnswerList(format!("found {}", json_kind(&other))),
            );
        }
        Err(e) => {
            return Parsed::degraded(
                empty_answers(),
                RowDefect::MalformedAnswerList(e.to_string()),
            );
        }
    };

    if items.len() != BLANK_COUNT {
        return Parsed::degraded(
            empty_answers(),
            RowDefect::WrongAnswerCount {
                found: items.len(),
                expected: BLANK_COUNT,
            },
        );
    }

    let mut answers = empty_answers();
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::String(s) => answers[index] = s,
            _ => {
                return Parsed::degraded(empty_answers(), RowDefect::NonStringAnswer { index });
            }
        }
    }

    Parsed::clean(answers)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ClozePassage {
    pub fn from_row(row: &SourceRow) -> Parsed<Self> {
        let answers = match row.answers.as_deref() {
            Some(serialized) => parse_answers_checked(serialized),
            None => Parsed::degraded(empty_answers(), RowDefect::MissingAnswerList),
        };

        Parsed {
            value: Self {
                text: row.question.trim().to_string(),
                expected_answers: answers.value,
                explanation: explanation_or_default(row.explanation.as_deref()),
            },
            defect: answers.defect,
        }
    }
}
