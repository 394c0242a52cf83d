use crate::bank::{QuestionBank, QuestionSet, RowSource};
use crate::logger;
use crate::models::{AppState, QuestionType, BLANK_COUNT, OPTION_COUNT};
use crate::session::{Display, QuizSession, Step, EXHAUSTED_NOTICE};
use crate::utils::{next_char_boundary, prev_char_boundary};
use std::sync::Arc;

/// Everything the terminal front end keeps between two key presses.
pub struct App<S> {
    pub state: AppState,
    pub bank: QuestionBank<S>,
    pub session: QuizSession,
    pub menu_index: usize,
    pub current_set: Option<Arc<QuestionSet>>,
    pub input_buffer: String,
    pub cursor_position: usize,
    pub focused_blank: usize,
    pub input_scroll_y: u16,
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl<S: RowSource> App<S> {
    pub fn new(source: S) -> Self {
        Self {
            state: AppState::Menu,
            bank: QuestionBank::new(source),
            session: QuizSession::default(),
            menu_index: 0,
            current_set: None,
            input_buffer: String::new(),
            cursor_position: 0,
            focused_blank: 0,
            input_scroll_y: 0,
            notice: None,
            should_quit: false,
        }
    }

    pub fn menu_type(&self) -> QuestionType {
        QuestionType::ALL[self.menu_index.min(QuestionType::ALL.len() - 1)]
    }

    /// Select `ty` in the session and load its questions. Load failures stay
    /// on the menu with a notice.
    pub fn open_type(&mut self, ty: QuestionType) {
        match self.bank.load(ty) {
            Ok(set) => {
                self.session.select_type(ty);
                self.current_set = Some(set);
                self.state = AppState::Quiz;
                self.focused_blank = 0;
                self.notice = None;
                self.sync_input();
            }
            Err(e) => {
                logger::log(&format!("Could not open {}: {}", ty, e));
                self.notice = Some(e.to_string());
            }
        }
    }

    pub fn back_to_menu(&mut self) {
        self.commit_input();
        self.state = AppState::Menu;
        self.notice = None;
    }

    pub fn total(&self) -> usize {
        self.current_set.as_ref().map_or(0, |set| set.len())
    }

    /// Current question or passage index, if one is on screen.
    pub fn displayed_index(&self) -> Option<usize> {
        match self.session.display(self.total()) {
            Display::Question(index) => Some(index),
            Display::Exhausted => None,
        }
    }

    /// Whether key presses go to the text input.
    pub fn takes_text(&self) -> bool {
        let ty = self.session.question_type();
        ty.takes_free_text() || ty.is_cloze()
    }

    pub fn next(&mut self) {
        self.commit_input();
        let step = self.session.next(self.total());
        self.after_step(step);
    }

    pub fn prev(&mut self) {
        self.commit_input();
        let step = self.session.prev();
        self.after_step(step);
    }

    fn after_step(&mut self, step: Step) {
        self.notice = match self.session.display(self.total()) {
            Display::Exhausted => Some(EXHAUSTED_NOTICE.to_string()),
            Display::Question(_) => step.notice().map(str::to_string),
        };
        if let Step::Moved(_) = step {
            self.focused_blank = 0;
            self.sync_input();
        }
    }

    /// Record option `position` (0 = A) for the current question.
    pub fn choose_option(&mut self, position: usize) {
        let Some(index) = self.displayed_index() else {
            return;
        };
        let Some(question) = self.current_set.as_ref().and_then(|set| set.question(index)) else {
            return;
        };
        if let Some(option) = question.options.get(position) {
            let option = option.clone();
            self.session.record_answer(index, option);
        }
    }

    /// Step the option selection forward or back, wrapping around.
    pub fn cycle_option(&mut self, forward: bool) {
        let Some(index) = self.displayed_index() else {
            return;
        };
        let Some(question) = self.current_set.as_ref().and_then(|set| set.question(index)) else {
            return;
        };
        let selected = self.session.selected_option(index, &question.options);
        let position = match (self.session.answer(index), forward) {
            (None, true) => 0,
            (None, false) => OPTION_COUNT - 1,
            (Some(_), true) => (selected + 1) % OPTION_COUNT,
            (Some(_), false) => (selected + OPTION_COUNT - 1) % OPTION_COUNT,
        };
        self.choose_option(position);
    }

    pub fn focus_blank(&mut self, forward: bool) {
        self.commit_input();
        let count = BLANK_COUNT;
        self.focused_blank = if forward {
            (self.focused_blank + 1) % count
        } else {
            (self.focused_blank + count - 1) % count
        };
        self.sync_input();
    }

    pub fn submit_cloze(&mut self) {
        self.commit_input();
        let Some(index) = self.displayed_index() else {
            return;
        };
        let Some(set) = self.current_set.clone() else {
            return;
        };
        let Some(passage) = set.passage(index) else {
            return;
        };
        self.notice = Some(match self.session.submit_cloze(index, passage) {
            Ok(report) => format!("{} / {} blanks correct", report.correct_count, report.total()),
            Err(e) => e.to_string(),
        });
    }

    /// Load the stored answer for the current item into the input buffer.
    pub fn sync_input(&mut self) {
        self.input_buffer = match self.displayed_index() {
            Some(index) if self.session.question_type().is_cloze() => self
                .session
                .blank_input(index, self.focused_blank)
                .to_string(),
            Some(index) if self.session.question_type().takes_free_text() => self
                .session
                .answer(index)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        };
        self.cursor_position = self.input_buffer.len();
        self.input_scroll_y = 0;
    }

    /// Write the input buffer back into the session.
    pub fn commit_input(&mut self) {
        if self.state != AppState::Quiz || !self.takes_text() {
            return;
        }
        let Some(index) = self.displayed_index() else {
            return;
        };
        if self.session.question_type().is_cloze() {
            if let Err(e) =
                self.session
                    .record_blank(index, self.focused_blank, self.input_buffer.clone())
            {
                logger::log(&format!("Dropped cloze input: {}", e));
            }
        } else {
            self.session.record_answer(index, self.input_buffer.clone());
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.input_buffer.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            let start = prev_char_boundary(&self.input_buffer, self.cursor_position);
            self.input_buffer.replace_range(start..self.cursor_position, "");
            self.cursor_position = start;
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = prev_char_boundary(&self.input_buffer, self.cursor_position);
    }

    pub fn cursor_right(&mut self) {
        self.cursor_position = next_char_boundary(&self.input_buffer, self.cursor_position);
    }
}
