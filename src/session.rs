use crate::cloze::empty_answers;
use crate::error::GradeError;
use crate::grader::{grade_passage, GradeReport};
use crate::logger;
use crate::models::{ClozePassage, QuestionType, BLANK_COUNT};
use std::collections::HashMap;

pub const LAST_QUESTION_NOTICE: &str = "This is already the last question.";
pub const EXHAUSTED_NOTICE: &str = "No more questions. Pick another question type or reload.";

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved(usize),
    /// `next()` at the last question; the index is unchanged.
    LastQuestion,
    /// `prev()` at the first question; the index is unchanged.
    AtStart,
}

impl Step {
    /// Informational notice to show the user, if any.
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Step::LastQuestion => Some(LAST_QUESTION_NOTICE),
            Step::Moved(_) | Step::AtStart => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Question(usize),
    Exhausted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reveal {
    pub answer: bool,
    pub explanation: bool,
}

/// Navigation shared by vocabulary, reading and translation.
#[derive(Debug, Clone)]
struct QuestionCursor {
    serving: QuestionType,
    index: usize,
}

/// Navigation and fill-ins for cloze passages. Type switches never touch it.
#[derive(Debug, Clone, Default)]
struct ClozeCursor {
    index: usize,
    inputs: HashMap<usize, [String; BLANK_COUNT]>,
    grades: HashMap<usize, GradeReport>,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    question_type: QuestionType,
    questions: QuestionCursor,
    cloze: ClozeCursor,
    answers: HashMap<usize, String>,
    reveal: Reveal,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(QuestionType::Vocabulary)
    }
}

impl QuizSession {
    pub fn new(question_type: QuestionType) -> Self {
        let serving = if question_type.is_cloze() {
            QuestionType::Vocabulary
        } else {
            question_type
        };
        Self {
            question_type,
            questions: QuestionCursor { serving, index: 0 },
            cloze: ClozeCursor::default(),
            answers: HashMap::new(),
            reveal: Reveal::default(),
        }
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    /// Switch to another question type. Returns false when `ty` is already
    /// selected, in which case nothing changes.
    ///
    /// Any real switch clears the recorded answers and resets the index of
    /// the type being entered. The shared index is only reset when a
    /// different non-cloze type starts being served, so hopping into cloze
    /// and back keeps it. Cloze fill-ins and grades are kept per passage.
    pub fn select_type(&mut self, ty: QuestionType) -> bool {
        if ty == self.question_type {
            return false;
        }

        logger::log(&format!(
            "Switching question type {} -> {}, dropping {} answers",
            self.question_type,
            ty,
            self.answers.len()
        ));

        self.question_type = ty;
        self.answers.clear();
        self.reveal = Reveal::default();

        if ty.is_cloze() {
            self.cloze.index = 0;
        } else if ty != self.questions.serving {
            self.questions = QuestionCursor {
                serving: ty,
                index: 0,
            };
        }
        true
    }

    /// Index of the current item for the selected type.
    pub fn current_index(&self) -> usize {
        if self.question_type.is_cloze() {
            self.cloze.index
        } else {
            self.questions.index
        }
    }

    pub fn question_index(&self) -> usize {
        self.questions.index
    }

    pub fn cloze_index(&self) -> usize {
        self.cloze.index
    }

    fn set_current_index(&mut self, index: usize) {
        if self.question_type.is_cloze() {
            self.cloze.index = index;
        } else {
            self.questions.index = index;
        }
        self.reveal = Reveal::default();
    }

    pub fn next(&mut self, total: usize) -> Step {
        let index = self.current_index();
        if index + 1 < total {
            self.set_current_index(index + 1);
            Step::Moved(index + 1)
        } else {
            Step::LastQuestion
        }
    }

    pub fn prev(&mut self) -> Step {
        let index = self.current_index();
        if index > 0 {
            self.set_current_index(index - 1);
            Step::Moved(index - 1)
        } else {
            Step::AtStart
        }
    }

    /// What to show for a question set of `total` items.
    pub fn display(&self, total: usize) -> Display {
        let index = self.current_index();
        if index < total {
            Display::Question(index)
        } else {
            Display::Exhausted
        }
    }

    /// Upsert the answer for question `index`. Any string is accepted.
    pub fn record_answer(&mut self, index: usize, value: impl Into<String>) {
        self.answers.insert(index, value.into());
    }

    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn answers(&self) -> &HashMap<usize, String> {
        &self.answers
    }

    /// Position of the recorded answer among `options`, or 0 when there is
    /// none or it no longer matches any option.
    pub fn selected_option(&self, index: usize, options: &[String]) -> usize {
        self.answer(index)
            .and_then(|answer| options.iter().position(|o| o == answer))
            .unwrap_or(0)
    }

    pub fn record_blank(
        &mut self,
        passage: usize,
        blank: usize,
        value: impl Into<String>,
    ) -> Result<(), GradeError> {
        if blank >= BLANK_COUNT {
            return Err(GradeError::BlankOutOfRange {
                blank,
                required: BLANK_COUNT,
            });
        }
        let value = value.into();
        let inputs = self.cloze.inputs.entry(passage).or_insert_with(empty_answers);
        if inputs[blank] != value {
            inputs[blank] = value;
            self.cloze.grades.remove(&passage);
        }
        Ok(())
    }

    pub fn blank_input(&self, passage: usize, blank: usize) -> &str {
        self.cloze
            .inputs
            .get(&passage)
            .and_then(|inputs| inputs.get(blank))
            .map_or("", String::as_str)
    }

    /// Grade the fill-ins recorded for `passage_index` and keep the report.
    pub fn submit_cloze(
        &mut self,
        passage_index: usize,
        passage: &ClozePassage,
    ) -> Result<&GradeReport, GradeError> {
        let report = match self.cloze.inputs.get(&passage_index) {
            Some(inputs) => grade_passage(passage, inputs)?,
            None => grade_passage(passage, &empty_answers())?,
        };
        logger::log(&format!(
            "Graded cloze passage {}: {}/{}",
            passage_index + 1,
            report.correct_count,
            report.total()
        ));
        self.cloze.grades.insert(passage_index, report);
        Ok(&self.cloze.grades[&passage_index])
    }

    pub fn cloze_grade(&self, passage: usize) -> Option<&GradeReport> {
        self.cloze.grades.get(&passage)
    }

    pub fn reveal(&self) -> Reveal {
        self.reveal
    }

    pub fn toggle_answer(&mut self) {
        self.reveal.answer = !self.reveal.answer;
    }

    pub fn toggle_explanation(&mut self) {
        self.reveal.explanation = !self.reveal.explanation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(expected: [&str; BLANK_COUNT]) -> ClozePassage {
        ClozePassage {
            text: "____ ".repeat(BLANK_COUNT),
            expected_answers: expected.map(str::to_string),
            explanation: String::new(),
        }
    }

    #[test]
    fn test_type_switch_clears_answers() {
        let mut session = QuizSession::new(QuestionType::Vocabulary);
        session.record_answer(2, "B. goes");
        assert_eq!(session.answer(2), Some("B. goes"));

        assert!(session.select_type(QuestionType::Reading));
        assert!(session.select_type(QuestionType::Vocabulary));

        // Same questions, but the switch wiped what was recorded.
        assert_eq!(session.answer(2), None);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_selecting_current_type_is_noop() {
        let mut session = QuizSession::new(QuestionType::Reading);
        session.next(5);
        session.record_answer(1, "C. x");

        assert!(!session.select_type(QuestionType::Reading));
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.answer(1), Some("C. x"));
    }

    #[test]
    fn test_switch_between_choice_types_resets_index() {
        let mut session = QuizSession::new(QuestionType::Vocabulary);
        session.next(10);
        session.next(10);
        assert_eq!(session.current_index(), 2);

        session.select_type(QuestionType::Translation);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_answers_survive_navigation_within_type() {
        let mut session = QuizSession::new(QuestionType::Vocabulary);
        session.record_answer(0, "A. one");
        session.next(3);
        session.record_answer(1, "D. four");
        session.prev();
        assert_eq!(session.answer(0), Some("A. one"));
        assert_eq!(session.answer(1), Some("D. four"));
    }

    #[test]
    fn test_record_answer_upserts_any_value() {
        let mut session = QuizSession::default();
        session.record_answer(0, "A. old");
        session.record_answer(0, "not an option");
        assert_eq!(session.answer(0), Some("not an option"));
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn test_next_at_last_question_signals() {
        let mut session = QuizSession::default();
        assert_eq!(session.next(3), Step::Moved(1));
        assert_eq!(session.next(3), Step::Moved(2));
        let step = session.next(3);
        assert_eq!(step, Step::LastQuestion);
        assert_eq!(step.notice(), Some(LAST_QUESTION_NOTICE));
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn test_prev_at_first_question_is_silent() {
        let mut session = QuizSession::default();
        let step = session.prev();
        assert_eq!(step, Step::AtStart);
        assert_eq!(step.notice(), None);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_empty_set_is_exhausted() {
        let mut session = QuizSession::default();
        assert_eq!(session.display(0), Display::Exhausted);
        assert_eq!(session.next(0), Step::LastQuestion);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.display(4), Display::Question(0));
    }

    #[test]
    fn test_cloze_index_independent_of_other_types() {
        let mut session = QuizSession::new(QuestionType::Cloze);
        session.next(5);
        session.next(5);
        assert_eq!(session.cloze_index(), 2);

        session.select_type(QuestionType::Vocabulary);
        session.next(5);
        session.select_type(QuestionType::Reading);
        session.select_type(QuestionType::Translation);
        assert_eq!(session.cloze_index(), 2);

        session.select_type(QuestionType::Cloze);
        assert_eq!(session.cloze_index(), 0);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_reentering_cloze_keeps_fill_ins() {
        let mut session = QuizSession::new(QuestionType::Cloze);
        session.next(3);
        session.record_blank(1, 0, "went").unwrap();
        session.select_type(QuestionType::Reading);
        session.select_type(QuestionType::Cloze);
        assert_eq!(session.cloze_index(), 0);
        assert_eq!(session.blank_input(1, 0), "went");
    }

    #[test]
    fn test_cloze_round_trip_keeps_question_index() {
        let mut session = QuizSession::new(QuestionType::Reading);
        session.next(4);
        session.next(4);
        session.select_type(QuestionType::Cloze);
        assert_eq!(session.current_index(), 0);
        session.select_type(QuestionType::Reading);
        assert_eq!(session.question_index(), 2);
    }

    #[test]
    fn test_cloze_navigation_leaves_question_index() {
        let mut session = QuizSession::new(QuestionType::Vocabulary);
        session.next(4);
        session.select_type(QuestionType::Cloze);
        session.next(3);
        session.next(3);
        session.prev();
        assert_eq!(session.cloze_index(), 1);
        assert_eq!(session.question_index(), 1);
    }

    #[test]
    fn test_selected_option_falls_back_for_stale_answer() {
        let options = ["A. a", "B. b", "C. c", "D. d"].map(str::to_string);
        let mut session = QuizSession::default();
        assert_eq!(session.selected_option(0, &options), 0);
        session.record_answer(0, "C. c");
        assert_eq!(session.selected_option(0, &options), 2);
        session.record_answer(0, "C. stale");
        assert_eq!(session.selected_option(0, &options), 0);
    }

    #[test]
    fn test_reveal_hidden_after_navigation() {
        let mut session = QuizSession::default();
        session.toggle_answer();
        session.toggle_explanation();
        assert_eq!(
            session.reveal(),
            Reveal {
                answer: true,
                explanation: true
            }
        );
        session.next(2);
        assert_eq!(session.reveal(), Reveal::default());
    }

    #[test]
    fn test_cloze_blanks_and_grading() {
        let p = passage(["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
        let mut session = QuizSession::new(QuestionType::Cloze);
        session.record_blank(0, 0, "A").unwrap();
        session.record_blank(0, 1, " b ").unwrap();
        assert_eq!(session.blank_input(0, 1), " b ");
        assert_eq!(session.blank_input(1, 0), "");

        let report = session.submit_cloze(0, &p).unwrap();
        assert_eq!(report.correct_count, 2);
        assert!(session.cloze_grade(0).is_some());

        // Editing invalidates the stored grade.
        session.record_blank(0, 2, "c").unwrap();
        assert!(session.cloze_grade(0).is_none());
    }

    #[test]
    fn test_record_blank_out_of_range() {
        let mut session = QuizSession::new(QuestionType::Cloze);
        assert_eq!(
            session.record_blank(0, BLANK_COUNT, "x"),
            Err(GradeError::BlankOutOfRange {
                blank: BLANK_COUNT,
                required: BLANK_COUNT
            })
        );
    }

    #[test]
    fn test_submit_without_inputs_grades_empty() {
        let p = passage(["", "", "", "", "", "x", "x", "x", "x", "x"]);
        let mut session = QuizSession::new(QuestionType::Cloze);
        let report = session.submit_cloze(3, &p).unwrap();
        assert_eq!(report.correct_count, 5);
    }
}
