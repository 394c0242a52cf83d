pub mod app;
pub mod bank;
pub mod cloze;
pub mod config;
pub mod csv;
pub mod error;
pub mod grader;
pub mod input;
pub mod logger;
pub mod models;
pub mod parser;
pub mod render;
pub mod session;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use app::App;
pub use bank::{QuestionBank, QuestionSet, RowSource};
pub use cloze::{empty_answers, parse_answers, parse_answers_checked};
pub use config::Config;
pub use csv::{available_types, CsvSource};
pub use error::{BankError, GradeError, RowDefect};
pub use grader::{grade, grade_passage, GradeReport};
pub use input::handle_key;
pub use models::{AppState, ClozePassage, Parsed, Question, QuestionType, SourceRow};
pub use parser::{parse_options, parse_question_text};
pub use render::{render_blanks, BLANK_MARKER};
pub use session::{Display, QuizSession, Step};
pub use ui::{draw_menu, draw_quit_confirmation, draw_quiz};
pub use utils::calculate_wrapped_cursor_position;
