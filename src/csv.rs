use crate::bank::RowSource;
use crate::error::BankError;
use crate::models::{QuestionType, SourceRow};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads `<dir>/<sheet>.csv` for each question type.
#[derive(Debug, Clone)]
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, ty: QuestionType) -> PathBuf {
        self.dir.join(format!("{}.csv", ty.sheet_name()))
    }
}

impl RowSource for CsvSource {
    fn load_rows(&self, ty: QuestionType) -> Result<Vec<SourceRow>, BankError> {
        let content =
            fs::read_to_string(self.path_for(ty)).map_err(|source| BankError::Io { ty, source })?;
        rows_from_records(ty, parse_csv_records(&content))
    }
}

/// Question types that have a CSV file in `dir`, in menu order.
pub fn available_types(dir: &Path) -> Vec<QuestionType> {
    let source = CsvSource::new(dir);
    QuestionType::ALL
        .into_iter()
        .filter(|ty| source.path_for(*ty).is_file())
        .collect()
}

#[derive(Debug, Default)]
struct Columns {
    question: Option<usize>,
    answer: Option<usize>,
    explanation: Option<usize>,
    answers: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Self {
        let mut columns = Columns::default();
        for (i, name) in header.iter().enumerate() {
            let slot = match name.trim().to_lowercase().as_str() {
                "question" | "raw_text" => &mut columns.question,
                "answer" => &mut columns.answer,
                "explanation" => &mut columns.explanation,
                "answers" => &mut columns.answers,
                _ => continue,
            };
            slot.get_or_insert(i);
        }
        columns
    }
}

fn cell(record: &[String], column: Option<usize>) -> Option<String> {
    column
        .and_then(|i| record.get(i))
        .filter(|value| !value.trim().is_empty())
        .cloned()
}

/// Map records onto rows using the first record as header. Rows without
/// question text are skipped.
pub fn rows_from_records(
    ty: QuestionType,
    records: Vec<Vec<String>>,
) -> Result<Vec<SourceRow>, BankError> {
    let mut records = records.into_iter();
    let Some(header) = records.next() else {
        return Ok(Vec::new());
    };

    let columns = Columns::from_header(&header);
    let Some(question_column) = columns.question else {
        return Err(BankError::MissingColumn {
            ty,
            column: "question",
        });
    };

    Ok(records
        .filter_map(|record| {
            let question = cell(&record, Some(question_column))?;
            Some(SourceRow {
                question,
                answer: cell(&record, columns.answer),
                explanation: cell(&record, columns.explanation),
                answers: cell(&record, columns.answers),
            })
        })
        .collect())
}

/// Split CSV text into records. Quoted fields may hold commas, newlines and
/// doubled quotes. Records whose fields are all blank are dropped.
pub fn parse_csv_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => {
                in_quotes = true;
            }
            ',' if !in_quotes => {
                record.push(std::mem::take(&mut field));
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => {
                field.push(c);
            }
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }

    records
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    if record.iter().any(|f| !f.trim().is_empty()) {
        records.push(record);
    }
}
