use crate::error::BankError;
use crate::logger;
use crate::models::{ClozePassage, Question, QuestionType, SourceRow};
use std::collections::HashMap;
use std::sync::Arc;

/// Supplies the raw rows of one question type.
pub trait RowSource {
    fn load_rows(&self, ty: QuestionType) -> Result<Vec<SourceRow>, BankError>;
}

/// Rows already in memory, keyed by type. Missing types have no rows.
impl RowSource for HashMap<QuestionType, Vec<SourceRow>> {
    fn load_rows(&self, ty: QuestionType) -> Result<Vec<SourceRow>, BankError> {
        Ok(self.get(&ty).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSet {
    Choice(Vec<Question>),
    Cloze(Vec<ClozePassage>),
}

impl QuestionSet {
    /// Parse rows for `ty`. Defective rows are kept with defaults and logged.
    pub fn from_rows(ty: QuestionType, rows: &[SourceRow]) -> Self {
        if ty.is_cloze() {
            let passages = rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let parsed = ClozePassage::from_row(row);
                    if let Some(defect) = &parsed.defect {
                        logger::log(&format!("cloze row {}: {}, using defaults", i + 1, defect));
                    }
                    parsed.value
                })
                .collect();
            QuestionSet::Cloze(passages)
        } else {
            QuestionSet::Choice(rows.iter().map(Question::from_row).collect())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            QuestionSet::Choice(questions) => questions.len(),
            QuestionSet::Cloze(passages) => passages.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        match self {
            QuestionSet::Choice(questions) => questions.get(index),
            QuestionSet::Cloze(_) => None,
        }
    }

    pub fn passage(&self, index: usize) -> Option<&ClozePassage> {
        match self {
            QuestionSet::Cloze(passages) => passages.get(index),
            QuestionSet::Choice(_) => None,
        }
    }
}

/// Parses each question type at most once and hands out shared copies.
pub struct QuestionBank<S> {
    source: S,
    cache: HashMap<QuestionType, Arc<QuestionSet>>,
}

impl<S: RowSource> QuestionBank<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// The parsed set for `ty`. Only the first call reads the source; later
    /// calls return the same `Arc`.
    pub fn load(&mut self, ty: QuestionType) -> Result<Arc<QuestionSet>, BankError> {
        if let Some(set) = self.cache.get(&ty) {
            return Ok(Arc::clone(set));
        }

        let rows = self.source.load_rows(ty)?;
        let set = Arc::new(QuestionSet::from_rows(ty, &rows));
        logger::log(&format!("Loaded {} {} rows", set.len(), ty.sheet_name()));
        self.cache.insert(ty, Arc::clone(&set));
        Ok(set)
    }

    pub fn cached(&self, ty: QuestionType) -> Option<Arc<QuestionSet>> {
        self.cache.get(&ty).cloned()
    }

    /// Forget every parsed set; the next `load` reads the source again.
    pub fn reload(&mut self) {
        self.cache.clear();
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloze::empty_answers;
    use std::cell::Cell;

    struct CountingSource {
        rows: HashMap<QuestionType, Vec<SourceRow>>,
        reads: Cell<usize>,
    }

    impl RowSource for CountingSource {
        fn load_rows(&self, ty: QuestionType) -> Result<Vec<SourceRow>, BankError> {
            self.reads.set(self.reads.get() + 1);
            self.rows.load_rows(ty)
        }
    }

    fn row(question: &str) -> SourceRow {
        SourceRow {
            question: question.to_string(),
            ..Default::default()
        }
    }

    fn source() -> CountingSource {
        let mut rows = HashMap::new();
        rows.insert(
            QuestionType::Vocabulary,
            vec![row("1. a ____ A. x B. y"), row("2. b ____ C. z")],
        );
        rows.insert(
            QuestionType::Cloze,
            vec![SourceRow {
                question: "p ____".to_string(),
                answers: Some("[1, 2]".to_string()),
                ..Default::default()
            }],
        );
        CountingSource {
            rows,
            reads: Cell::new(0),
        }
    }

    #[test]
    fn test_repeated_loads_hit_cache() {
        let mut bank = QuestionBank::new(source());
        let first = bank.load(QuestionType::Vocabulary).unwrap();
        let second = bank.load(QuestionType::Vocabulary).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(bank.source().reads.get(), 1);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_cache_is_per_type() {
        let mut bank = QuestionBank::new(source());
        bank.load(QuestionType::Vocabulary).unwrap();
        assert!(bank.cached(QuestionType::Reading).is_none());
        let reading = bank.load(QuestionType::Reading).unwrap();
        assert!(reading.is_empty());
        assert_eq!(bank.source().reads.get(), 2);
    }

    #[test]
    fn test_reload_reads_again() {
        let mut bank = QuestionBank::new(source());
        let before = bank.load(QuestionType::Vocabulary).unwrap();
        bank.reload();
        let after = bank.load(QuestionType::Vocabulary).unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
        assert_eq!(bank.source().reads.get(), 2);
    }

    #[test]
    fn test_bad_cloze_row_degrades() {
        let mut bank = QuestionBank::new(source());
        let set = bank.load(QuestionType::Cloze).unwrap();
        let passage = set.passage(0).unwrap();
        assert_eq!(passage.expected_answers, empty_answers());
        assert!(set.question(0).is_none());
    }

    #[test]
    fn test_choice_set_parses_questions() {
        let mut bank = QuestionBank::new(source());
        let set = bank.load(QuestionType::Vocabulary).unwrap();
        let q = set.question(1).unwrap();
        assert_eq!(q.stem, "b ____");
        assert_eq!(q.options, ["A. ", "B. ", "C. z", "D. "]);
        assert!(set.passage(0).is_none());
    }
}
